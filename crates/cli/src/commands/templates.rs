use serde::Serialize;

use agentforge_core::{builtin_templates, AgentTemplate};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct TemplatesReport {
    command: &'static str,
    templates: Vec<AgentTemplate>,
}

pub fn run() -> CommandResult {
    CommandResult::success(&TemplatesReport {
        command: "templates",
        templates: builtin_templates(),
    })
}
