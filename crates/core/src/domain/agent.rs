//! The Agent aggregate and its value objects.
//!
//! Agents are immutable: every mutator returns a new aggregate with a
//! refreshed `updated_at`, and callers own the replacement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::framework::{FrameworkConfig, FrameworkType};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("agent id must be non-empty"));
        }
        Ok(Self(value))
    }
}

pub const AGENT_NAME_MAX_CHARS: usize = 100;
pub const AGENT_PROMPT_MAX_CHARS: usize = 10_000;

/// Trimmed 1..=100 character display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentName(String);

impl AgentName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::validation("agent name must not be empty"));
        }
        if trimmed.chars().count() > AGENT_NAME_MAX_CHARS {
            return Err(DomainError::validation(format!(
                "agent name must be at most {AGENT_NAME_MAX_CHARS} characters"
            )));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trimmed 1..=10000 character behavior description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPrompt(String);

impl AgentPrompt {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::validation("agent prompt must not be empty"));
        }
        if trimmed.chars().count() > AGENT_PROMPT_MAX_CHARS {
            return Err(DomainError::validation(format!(
                "agent prompt must be at most {AGENT_PROMPT_MAX_CHARS} characters"
            )));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle label only; no transition graph is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Draft,
    Configured,
    Generated,
    Testing,
    Deployed,
    Archived,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Configured => "configured",
            Self::Generated => "generated",
            Self::Testing => "testing",
            Self::Deployed => "deployed",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "configured" => Some(Self::Configured),
            "generated" => Some(Self::Generated),
            "testing" => Some(Self::Testing),
            "deployed" => Some(Self::Deployed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: AgentName,
    pub prompt: AgentPrompt,
    pub framework_configs: Vec<FrameworkConfig>,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    pub fn has_framework(&self, framework_type: FrameworkType) -> bool {
        self.framework_config(framework_type).is_some()
    }

    pub fn framework_config(&self, framework_type: FrameworkType) -> Option<&FrameworkConfig> {
        self.framework_configs.iter().find(|config| config.framework_type == framework_type)
    }

    /// Add or replace the config for its framework type (at most one config
    /// per type; last write wins).
    pub fn add_framework_config(&self, config: FrameworkConfig) -> Agent {
        let mut next = self.clone();
        match next
            .framework_configs
            .iter_mut()
            .find(|existing| existing.framework_type == config.framework_type)
        {
            Some(existing) => *existing = config,
            None => next.framework_configs.push(config),
        }
        next.updated_at = Utc::now();
        next
    }

    pub fn remove_framework_config(&self, framework_type: FrameworkType) -> Agent {
        let mut next = self.clone();
        next.framework_configs.retain(|config| config.framework_type != framework_type);
        next.updated_at = Utc::now();
        next
    }

    pub fn with_status(&self, status: AgentStatus) -> Agent {
        let mut next = self.clone();
        next.status = status;
        next.updated_at = Utc::now();
        next
    }

    pub fn with_name(&self, name: AgentName) -> Agent {
        let mut next = self.clone();
        next.name = name;
        next.updated_at = Utc::now();
        next
    }

    pub fn with_prompt(&self, prompt: AgentPrompt) -> Agent {
        let mut next = self.clone();
        next.prompt = prompt;
        next.updated_at = Utc::now();
        next
    }

    /// The deployment-ready configuration artifact: an agent summary plus
    /// one optional section per configured framework, each carrying the
    /// defaults-merged parameter bag.
    pub fn generate_configuration(&self) -> GeneratedConfiguration {
        let frameworks =
            self.framework_configs.iter().map(|c| c.framework_type.as_str().to_string()).collect();
        let section = |framework_type| {
            self.framework_config(framework_type)
                .map(|config| Value::Object(config.params_with_defaults()))
        };

        GeneratedConfiguration {
            agent: GeneratedAgentSummary {
                id: self.id.clone(),
                name: self.name.as_str().to_string(),
                description: summarize_prompt(self.prompt.as_str()),
                prompt: self.prompt.as_str().to_string(),
                frameworks,
                created: self.created_at,
                status: self.status.as_str().to_string(),
            },
            a2a: section(FrameworkType::A2a),
            adk: section(FrameworkType::Adk),
            mcp: section(FrameworkType::Mcp),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAgentSummary {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub frameworks: Vec<String>,
    pub created: DateTime<Utc>,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedConfiguration {
    pub agent: GeneratedAgentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a2a: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp: Option<Value>,
}

/// Short description derived from the prompt for the artifact header.
fn summarize_prompt(prompt: &str) -> String {
    const MAX: usize = 100;
    if prompt.chars().count() <= MAX {
        return prompt.to_string();
    }
    let truncated: String = prompt.chars().take(MAX).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Agent, AgentId, AgentName, AgentPrompt, AgentStatus};
    use crate::domain::framework::{FrameworkConfig, FrameworkType};

    fn agent_with(frameworks: &[FrameworkType]) -> Agent {
        let now = Utc::now();
        Agent {
            id: AgentId::generate(),
            name: AgentName::new("Research Assistant").expect("valid name"),
            prompt: AgentPrompt::new("Collect sources and summarize findings").expect("valid"),
            framework_configs: frameworks
                .iter()
                .map(|f| FrameworkConfig::with_defaults(*f))
                .collect(),
            status: AgentStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn name_and_prompt_reject_empty_and_oversized_values() {
        assert!(AgentName::new("   ").is_err());
        assert!(AgentName::new("x".repeat(101)).is_err());
        assert!(AgentPrompt::new("").is_err());
        assert!(AgentPrompt::new("p".repeat(10_001)).is_err());
        assert_eq!(AgentName::new("  Ada  ").expect("valid").as_str(), "Ada");
    }

    #[test]
    fn add_framework_config_leaves_original_unchanged() {
        let agent = agent_with(&[]);
        let updated = agent.add_framework_config(FrameworkConfig::with_defaults(FrameworkType::Mcp));

        assert!(updated.has_framework(FrameworkType::Mcp));
        assert!(!agent.has_framework(FrameworkType::Mcp));
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn adding_same_framework_type_replaces_in_place() {
        let agent = agent_with(&[FrameworkType::Adk]);
        let mut replacement = FrameworkConfig::with_defaults(FrameworkType::Adk);
        replacement.params.insert("workflow".to_string(), serde_json::json!("parallel"));

        let updated = agent.add_framework_config(replacement);
        assert_eq!(updated.framework_configs.len(), 1);
        assert_eq!(
            updated.framework_config(FrameworkType::Adk).expect("config").params["workflow"],
            serde_json::json!("parallel")
        );
    }

    #[test]
    fn status_changes_are_unrestricted() {
        let agent = agent_with(&[]).with_status(AgentStatus::Deployed);
        let reverted = agent.with_status(AgentStatus::Draft);
        assert_eq!(reverted.status, AgentStatus::Draft);
    }

    #[test]
    fn generated_configuration_has_one_section_per_framework() {
        let agent = agent_with(&[FrameworkType::A2a, FrameworkType::Mcp]);
        let configuration = agent.generate_configuration();

        assert!(configuration.a2a.is_some());
        assert!(configuration.mcp.is_some());
        assert!(configuration.adk.is_none());

        let value = serde_json::to_value(&configuration).expect("serialize");
        let keys: Vec<&String> = value.as_object().expect("object").keys().collect();
        assert_eq!(keys, ["a2a", "agent", "mcp"]);
    }
}
