pub mod action;
pub mod command;
pub mod notification;

pub use action::{Action, NavigateTarget, NotifyLevel};
pub use command::{parse_command, Command};
pub use notification::{Notification, NotificationCenter};
