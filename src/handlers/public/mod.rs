// handlers/public/mod.rs - Handlers reachable without a session
//
// Every route in this service is public; session state only changes what
// the session readers return.

pub mod auth;
pub mod users;

pub use auth::*;
pub use users::append_tag;
