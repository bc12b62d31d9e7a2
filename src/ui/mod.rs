pub mod notify;
pub mod prompts;
pub mod tables;

pub use notify::{Level, Notification, NotificationQueue};
