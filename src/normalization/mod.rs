pub mod mapping;
pub mod tables;
