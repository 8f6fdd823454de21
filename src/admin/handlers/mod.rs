pub mod groups;
pub mod navigation;
pub mod users;
