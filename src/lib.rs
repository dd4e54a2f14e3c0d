pub mod auth;
pub mod error;
pub mod gcal;
pub mod groups;
pub mod queue;
pub mod schedule;

pub use error::{Error, Result};
pub use gcal::CalendarClient;
pub use groups::Group;
pub use queue::QueueClient;
