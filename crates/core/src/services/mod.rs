pub mod agent;
pub mod orchestrator;
pub mod payment;
