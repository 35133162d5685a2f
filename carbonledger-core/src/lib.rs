pub mod aggregate;
pub mod error;
pub mod library;
pub mod report;
pub mod scenario;
