//! Concrete backends for the domain capabilities

pub mod console_gateway;

pub use console_gateway::ConsoleEmailGateway;
