#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Response, StatusCode};
use serde_json::json;

use snippet_auth::auth::{Claims, TokenService};
use snippet_auth::config::AppConfig;
use snippet_auth::database::MemoryUserStore;
use snippet_auth::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct-horse";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the router in-process on a free port, backed by an empty in-memory store.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.port = port;
        config.api.enable_request_logging = false;
        config.security.jwt_secret = TEST_SECRET.to_string();
        // Keep bcrypt cheap
        config.security.bcrypt_cost = 4;

        let state = AppState::new(&config, Arc::new(MemoryUserStore::new()))?;
        let app = snippet_auth::app(state, &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, password: &str, verify: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "email": email, "password": password, "passwordVerify": verify }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    /// GET a session endpoint, sending `token` as the session cookie when given
    pub async fn get_session(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.header(header::COOKIE, format!("token={}", token));
        }
        Ok(req.send().await?)
    }

    /// Register then log in, returning (user id, login token)
    pub async fn signed_in_user(&self, email: &str) -> Result<(String, String)> {
        let res = self.register(email, PASSWORD, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

        let res = self.login(email, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let token = session_token(&res).context("login set no cookie")?;
        let claims = decode(&token).context("login token did not verify")?;
        Ok((claims.id.to_string(), token))
    }
}

/// Raw `Set-Cookie` header for the session cookie
pub fn session_set_cookie(res: &Response) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(str::to_string)
}

/// Value of the session cookie set by a response
pub fn session_token(res: &Response) -> Option<String> {
    let raw = session_set_cookie(res)?;
    let value = raw.trim_start_matches("token=").split(';').next()?;
    Some(value.to_string())
}

pub fn decode(token: &str) -> Option<Claims> {
    TokenService::new(TEST_SECRET).ok()?.verify(token)
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}
