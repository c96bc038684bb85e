pub mod definition;
pub mod error;
pub mod executor;
pub mod report;
pub mod shadower;
