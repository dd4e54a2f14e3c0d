pub mod groups;
pub mod schedule;
