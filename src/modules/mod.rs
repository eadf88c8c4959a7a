pub mod attendance;
pub mod auth;
pub mod events;
pub mod notifications;
pub mod users;
