use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::Environment;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Builds the session cookie with attributes chosen by the runtime mode.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    same_site: Option<SameSite>,
    secure: bool,
}

impl SessionCookie {
    pub fn for_environment(environment: &Environment) -> Self {
        match environment {
            Environment::Development => Self {
                same_site: Some(SameSite::Lax),
                secure: false,
            },
            Environment::Production => Self {
                same_site: Some(SameSite::None),
                secure: true,
            },
            Environment::Unrecognized(_) => Self {
                same_site: None,
                secure: false,
            },
        }
    }

    fn build(&self, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::build((TOKEN_COOKIE, value))
            .http_only(true)
            .path("/")
            .secure(self.secure)
            .build();
        if let Some(same_site) = self.same_site {
            cookie.set_same_site(same_site);
        }
        cookie
    }

    /// Add a cookie holding `token` to the jar.
    pub fn set(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.build(token))
    }

    /// Overwrite the cookie with an empty, already expired value.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.build(String::new());
        cookie.make_removal();
        jar.add(cookie)
    }

    /// The raw token from the request, if one was sent and is non-empty.
    pub fn read(jar: &CookieJar) -> Option<String> {
        jar.get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
}
