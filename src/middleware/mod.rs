pub mod auth;

pub use auth::{ApiAuthUser, AuthUser, OptionalAuthUser};
