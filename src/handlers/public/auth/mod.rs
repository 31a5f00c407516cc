// handlers/public/auth/mod.rs - Credential and session handlers
//
// None of these require a session. The session readers answer `null` when the
// cookie is absent or invalid instead of failing.

pub mod login;    // POST /login
pub mod register; // POST /register
pub mod session;  // GET /session/{identity,username,tags,logout}

pub use login::login;
pub use register::register;
pub use session::{identity, logout, tags, username};
