pub mod fields;
pub mod tables;
