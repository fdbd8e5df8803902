pub mod agent;
pub mod framework;
pub mod payment;
