mod attendance;
mod event;
mod feedback;
mod notification;
mod registration;
mod user;

pub use attendance::*;
pub use event::*;
pub use feedback::*;
pub use notification::*;
pub use registration::*;
pub use user::*;
