use std::collections::HashMap;

use tokio::sync::RwLock;

use agentforge_core::domain::agent::{Agent, AgentId};
use agentforge_core::domain::payment::{Payment, PaymentId};

use super::{AgentRepository, PaymentRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: RwLock<HashMap<String, Agent>>,
}

#[async_trait::async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn save(&self, agent: Agent) -> Result<(), RepositoryError> {
        let mut agents = self.agents.write().await;
        agents.insert(agent.id.0.clone(), agent);
        Ok(())
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.agents.read().await;
        Ok(agents.get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        let agents = self.agents.read().await;
        let mut all: Vec<Agent> = agents.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn delete(&self, id: &AgentId) -> Result<(), RepositoryError> {
        let mut agents = self.agents.write().await;
        match agents.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound { kind: "agent", id: id.0.clone() }),
        }
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<String, Payment>>,
}

#[async_trait::async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: Payment) -> Result<(), RepositoryError> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id.0.clone(), payment);
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, RepositoryError> {
        let payments = self.payments.read().await;
        Ok(payments.get(&id.0).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use agentforge_core::domain::agent::{Agent, AgentId, AgentName, AgentPrompt, AgentStatus};
    use agentforge_core::domain::framework::{FrameworkConfig, FrameworkType};

    use crate::{AgentRepository, InMemoryAgentRepository, RepositoryError};

    fn agent(name: &str) -> Agent {
        let now = Utc::now();
        Agent {
            id: AgentId::generate(),
            name: AgentName::new(name).expect("valid name"),
            prompt: AgentPrompt::new("Do the work").expect("valid prompt"),
            framework_configs: vec![FrameworkConfig::with_defaults(FrameworkType::Adk)],
            status: AgentStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn in_memory_agent_repo_round_trip() {
        let repo = InMemoryAgentRepository::default();
        let agent = agent("Archivist");

        repo.save(agent.clone()).await.expect("save agent");
        let found = repo.find_by_id(&agent.id).await.expect("find agent");

        assert_eq!(found, Some(agent));
    }

    #[tokio::test]
    async fn saving_same_id_replaces_the_stored_aggregate() {
        let repo = InMemoryAgentRepository::default();
        let original = agent("Archivist");
        let updated = original.with_status(agentforge_core::AgentStatus::Deployed);

        repo.save(original.clone()).await.expect("save original");
        repo.save(updated.clone()).await.expect("save updated");

        let found = repo.find_by_id(&original.id).await.expect("find agent");
        assert_eq!(found, Some(updated));
        assert_eq!(repo.find_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_agent_is_not_found() {
        let repo = InMemoryAgentRepository::default();
        let missing = AgentId("ghost".to_string());

        let error = repo.delete(&missing).await.expect_err("missing agent");
        assert_eq!(error, RepositoryError::NotFound { kind: "agent", id: "ghost".to_string() });
    }
}
