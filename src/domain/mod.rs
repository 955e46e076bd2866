pub mod access_code;
pub mod grade;
pub mod repository;
pub mod types;
