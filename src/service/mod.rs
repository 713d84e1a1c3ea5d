pub mod admin;
pub mod daily_report;
pub mod filesystem;
pub mod fish;
pub mod photo;
