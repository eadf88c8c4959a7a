mod attendance_repository;
mod event_repository;
mod feedback_repository;
mod notification_repository;
mod registration_repository;
mod user_repository;

pub use attendance_repository::AttendanceRepository;
pub use event_repository::EventRepository;
pub use feedback_repository::FeedbackRepository;
pub use notification_repository::NotificationRepository;
pub use registration_repository::RegistrationRepository;
pub use user_repository::UserRepository;
