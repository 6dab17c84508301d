pub mod config;
pub mod db;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod seed;
pub mod services;

// Re-exports for the common embedding surface
pub use config::LoanPolicy;
pub use db::MemoryDb;
pub use domain::{LibraryError, NotificationGateway};
pub use services::BioAlert;
