//! Services Layer
//!
//! Pure business logic over the in-memory store. No delivery or
//! presentation concerns; those sit behind the gateway trait.

pub mod alert_service;
pub mod loan_service;

// Re-export for convenience
pub use alert_service::BioAlert;
pub use loan_service::*;
