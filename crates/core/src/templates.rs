//! Builtin agent template catalog.
//!
//! Templates are input data to agent construction, not core logic: each
//! pairs a prompt with recommended frameworks and tools.

use serde::{Deserialize, Serialize};

use crate::domain::framework::FrameworkType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTemplate {
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub frameworks: Vec<FrameworkType>,
    pub tools: Vec<String>,
}

pub fn builtin_templates() -> Vec<AgentTemplate> {
    vec![
        AgentTemplate {
            name: "Research Assistant".to_string(),
            description: "Gathers sources, analyzes data, and reports findings".to_string(),
            prompt: "Research a topic using external data sources, analyze what you find, \
                     and produce a concise report with citations"
                .to_string(),
            frameworks: vec![FrameworkType::Mcp],
            tools: vec!["data_processor".to_string(), "web_scraper".to_string()],
        },
        AgentTemplate {
            name: "Workflow Automator".to_string(),
            description: "Runs multi-step business processes end to end".to_string(),
            prompt: "Execute a defined workflow step by step, retrying failed stages and \
                     reporting progress after each stage"
                .to_string(),
            frameworks: vec![FrameworkType::Adk],
            tools: vec!["file_manager".to_string()],
        },
        AgentTemplate {
            name: "Support Router".to_string(),
            description: "Coordinates a team of specialist agents on incoming requests".to_string(),
            prompt: "Receive incoming requests, decide which specialist agent should handle \
                     each one, hand the work off, and track completion"
                .to_string(),
            frameworks: vec![FrameworkType::A2a, FrameworkType::Adk],
            tools: vec!["message_queue".to_string()],
        },
        AgentTemplate {
            name: "Data Pipeline Operator".to_string(),
            description: "Moves and transforms data between stores on a schedule".to_string(),
            prompt: "Operate a scheduled data pipeline: pull from the configured sources, \
                     transform records, load them into storage, and flag anomalies"
                .to_string(),
            frameworks: vec![FrameworkType::Adk, FrameworkType::Mcp],
            tools: vec!["database_connector".to_string(), "storage_manager".to_string()],
        },
    ]
}

/// Case-insensitive lookup by template name.
pub fn find_template(name: &str) -> Option<AgentTemplate> {
    let wanted = name.trim().to_lowercase();
    builtin_templates().into_iter().find(|template| template.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::{builtin_templates, find_template};

    #[test]
    fn catalog_templates_are_complete() {
        for template in builtin_templates() {
            assert!(!template.name.is_empty());
            assert!(!template.prompt.is_empty());
            assert!(!template.frameworks.is_empty());
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find_template("research assistant").is_some());
        assert!(find_template("  WORKFLOW AUTOMATOR ").is_some());
        assert!(find_template("nonexistent").is_none());
    }
}
