//! Agent construction, validation, and recommendation.
//!
//! Framework and tool recommendation are deterministic substring
//! classifiers over the lowercased prompt, kept as ordered rule tables so
//! priority stays auditable. There is no stemming or negation handling: a
//! prompt may trigger zero, one, or all three frameworks.

use chrono::Utc;
use serde_json::json;

use crate::domain::agent::{Agent, AgentId, AgentName, AgentPrompt, AgentStatus};
use crate::domain::framework::{FrameworkConfig, FrameworkType};
use crate::errors::DomainError;
use crate::templates::AgentTemplate;

/// Per-framework trigger keywords, evaluated independently.
pub const FRAMEWORK_KEYWORDS: &[(FrameworkType, &[&str])] = &[
    (
        FrameworkType::A2a,
        &["agent-to-agent", "a2a", "collaboration", "multi-agent", "communication"],
    ),
    (FrameworkType::Adk, &["development kit", "adk", "workflow", "orchestration", "process"]),
    (
        FrameworkType::Mcp,
        &[
            "model context",
            "mcp",
            "external tools",
            "external apis",
            "data sources",
            "tool integration",
            "resource access",
        ],
    ),
];

/// Topic keyword buckets mapped to fixed tool lists.
const TOOL_BUCKETS: &[(&[&str], &[&str])] = &[
    (&["data", "analysis"], &["data_processor", "analytics_engine"]),
    (&["file", "document"], &["file_manager", "document_parser"]),
    (&["web", "api"], &["web_scraper", "api_client"]),
    (&["database", "storage"], &["database_connector", "storage_manager"]),
    (&["email", "message"], &["email_sender", "message_queue"]),
];

pub const FALLBACK_TOOLS: &[&str] = &["general_tools"];

#[derive(Clone, Copy, Debug, Default)]
pub struct AgentService;

impl AgentService {
    pub fn new() -> Self {
        Self
    }

    /// Build a validated Draft agent. Name, prompt, and every framework
    /// config are validated up front and all violations are reported
    /// together; duplicate framework types collapse with last write wins.
    pub fn create_agent(
        &self,
        name: &str,
        prompt: &str,
        configs: Vec<FrameworkConfig>,
    ) -> Result<Agent, DomainError> {
        let mut violations = Vec::new();

        let name = match AgentName::new(name) {
            Ok(name) => Some(name),
            Err(error) => {
                violations.extend(error.into_violations());
                None
            }
        };
        let prompt = match AgentPrompt::new(prompt) {
            Ok(prompt) => Some(prompt),
            Err(error) => {
                violations.extend(error.into_violations());
                None
            }
        };
        for config in &configs {
            if let Err(error) = config.validate() {
                violations.extend(error.into_violations());
            }
        }

        match (name, prompt) {
            (Some(name), Some(prompt)) if violations.is_empty() => {
                let now = Utc::now();
                Ok(Agent {
                    id: AgentId::generate(),
                    name,
                    prompt,
                    framework_configs: dedup_last_wins(configs),
                    status: AgentStatus::Draft,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(DomainError::Validation { violations }),
        }
    }

    /// Frameworks whose trigger keywords appear in the prompt, in table
    /// order.
    pub fn recommend_frameworks(&self, prompt: &str) -> Vec<FrameworkType> {
        let prompt = prompt.to_lowercase();
        FRAMEWORK_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|keyword| prompt.contains(keyword)))
            .map(|(framework, _)| *framework)
            .collect()
    }

    /// Tools for the matched topic buckets. Falls back to the general
    /// toolset only when nothing matched and MCP is among the selected
    /// frameworks.
    pub fn recommend_tools(&self, prompt: &str, frameworks: &[FrameworkType]) -> Vec<String> {
        let prompt = prompt.to_lowercase();
        let mut tools: Vec<String> = Vec::new();
        for (keywords, bucket_tools) in TOOL_BUCKETS {
            if keywords.iter().any(|keyword| prompt.contains(keyword)) {
                for tool in *bucket_tools {
                    if !tools.iter().any(|existing| existing == tool) {
                        tools.push(tool.to_string());
                    }
                }
            }
        }

        if tools.is_empty() && frameworks.contains(&FrameworkType::Mcp) {
            tools.extend(FALLBACK_TOOLS.iter().map(|tool| tool.to_string()));
        }
        tools
    }

    /// Coarse aggregate-level check, distinct from and in addition to the
    /// per-protocol schema validation.
    pub fn validate_agent(&self, agent: &Agent) -> Result<(), DomainError> {
        let mut violations = Vec::new();
        if agent.name.as_str().trim().is_empty() {
            violations.push("agent name must not be empty".to_string());
        }
        if agent.prompt.as_str().trim().is_empty() {
            violations.push("agent prompt must not be empty".to_string());
        }
        if agent.framework_configs.is_empty() {
            violations.push("agent must have at least one framework configuration".to_string());
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation { violations })
        }
    }

    /// Build an agent from a catalog template: protocol defaults merged
    /// with the template's tools, starting at Configured.
    pub fn create_agent_from_template(
        &self,
        template: &AgentTemplate,
    ) -> Result<Agent, DomainError> {
        let configs = template
            .frameworks
            .iter()
            .map(|framework| {
                let mut config = FrameworkConfig::with_defaults(*framework);
                if framework.supports_tools() && !template.tools.is_empty() {
                    config.params.insert("tools".to_string(), json!(template.tools));
                }
                config
            })
            .collect();

        let agent = self.create_agent(&template.name, &template.prompt, configs)?;
        Ok(agent.with_status(AgentStatus::Configured))
    }
}

fn dedup_last_wins(configs: Vec<FrameworkConfig>) -> Vec<FrameworkConfig> {
    let mut deduped: Vec<FrameworkConfig> = Vec::with_capacity(configs.len());
    for config in configs {
        match deduped.iter_mut().find(|c| c.framework_type == config.framework_type) {
            Some(existing) => *existing = config,
            None => deduped.push(config),
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::AgentService;
    use crate::domain::agent::AgentStatus;
    use crate::domain::framework::{FrameworkConfig, FrameworkType};
    use crate::errors::DomainError;
    use crate::templates::builtin_templates;

    #[test]
    fn duplicate_framework_types_collapse_with_last_write_winning() {
        let service = AgentService::new();
        let mut first = FrameworkConfig::with_defaults(FrameworkType::Adk);
        first.params.insert("workflow".to_string(), json!("sequential"));
        let mut second = FrameworkConfig::with_defaults(FrameworkType::Adk);
        second.params.insert("workflow".to_string(), json!("parallel"));

        let agent = service
            .create_agent(
                "Pipeline Agent",
                "Run the nightly workflow",
                vec![first, second, FrameworkConfig::with_defaults(FrameworkType::Mcp)],
            )
            .expect("valid agent");

        assert_eq!(agent.framework_configs.len(), 2);
        assert_eq!(
            agent.framework_config(FrameworkType::Adk).expect("adk").params["workflow"],
            json!("parallel")
        );
        assert_eq!(agent.status, AgentStatus::Draft);
        assert_eq!(agent.created_at, agent.updated_at);
    }

    #[test]
    fn create_agent_collects_violations_across_inputs() {
        let service = AgentService::new();
        let mut bad_config = FrameworkConfig::with_defaults(FrameworkType::A2a);
        bad_config.params.insert("port".to_string(), json!(70_000));

        let error = service
            .create_agent("", "Do things", vec![bad_config])
            .expect_err("invalid inputs");
        let DomainError::Validation { violations } = error else {
            panic!("expected validation error");
        };
        assert!(violations.iter().any(|v| v.contains("name")));
        assert!(violations.iter().any(|v| v.contains("port")));
    }

    #[test]
    fn prompt_mentioning_all_topics_triggers_all_frameworks() {
        let service = AgentService::new();
        let frameworks = service.recommend_frameworks(
            "Build a multi-agent coordinator with external APIs and workflow orchestration",
        );

        assert_eq!(
            frameworks,
            vec![FrameworkType::A2a, FrameworkType::Adk, FrameworkType::Mcp]
        );
    }

    #[test]
    fn neutral_prompt_triggers_nothing() {
        let service = AgentService::new();
        assert!(service.recommend_frameworks("Tell me a bedtime story").is_empty());
    }

    #[test]
    fn tool_recommendation_unions_matched_buckets() {
        let service = AgentService::new();
        let tools =
            service.recommend_tools("Analyze data from the web api", &[FrameworkType::Adk]);
        assert_eq!(tools, ["data_processor", "analytics_engine", "web_scraper", "api_client"]);
    }

    #[test]
    fn tool_fallback_requires_mcp_selection() {
        let service = AgentService::new();
        assert!(service.recommend_tools("Just chat", &[FrameworkType::A2a]).is_empty());
        assert_eq!(
            service.recommend_tools("Just chat", &[FrameworkType::Mcp]),
            ["general_tools"]
        );
    }

    #[test]
    fn validate_agent_flags_missing_configs() {
        let service = AgentService::new();
        let agent = service
            .create_agent("Bare Agent", "No frameworks yet", Vec::new())
            .expect("constructible without configs");

        let error = service.validate_agent(&agent).expect_err("coarse check fails");
        assert!(matches!(error, DomainError::Validation { violations }
            if violations.iter().any(|v| v.contains("framework"))));
    }

    #[test]
    fn template_agents_start_configured_with_template_tools() {
        let service = AgentService::new();
        let templates = builtin_templates();
        let template = templates.first().expect("catalog is non-empty");

        let agent = service.create_agent_from_template(template).expect("template agent");
        assert_eq!(agent.status, AgentStatus::Configured);
        assert_eq!(agent.framework_configs.len(), template.frameworks.len());

        let with_tools = agent
            .framework_configs
            .iter()
            .find(|config| config.framework_type.supports_tools())
            .expect("template has a tool-bearing framework");
        assert_eq!(with_tools.declared_tools(), template.tools);
    }
}
