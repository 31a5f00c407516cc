pub mod user;

pub use user::{default_user_tags, User, DEFAULT_USER_TAGS};
