pub mod auth;
pub mod conversations;
pub mod error;
pub mod favorites;
pub mod messages;
pub mod middleware;
pub mod properties;
pub mod users;
