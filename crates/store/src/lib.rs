//! Persistence collaborator for the agent/payment core.
//!
//! The core itself never performs I/O; these traits are the seam an
//! embedding application implements. In-memory implementations are provided
//! for tests and single-process use.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use agentforge_core::domain::agent::{Agent, AgentId};
use agentforge_core::domain::payment::{Payment, PaymentId};

pub use memory::{InMemoryAgentRepository, InMemoryPaymentRepository};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait AgentRepository: Send + Sync {
    async fn save(&self, agent: Agent) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<Agent>, RepositoryError>;
    async fn delete(&self, id: &AgentId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: Payment) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, RepositoryError>;
}
