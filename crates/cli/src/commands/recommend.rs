use serde::Serialize;

use agentforge_core::AgentService;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct RecommendReport {
    command: &'static str,
    prompt: String,
    frameworks: Vec<String>,
    tools: Vec<String>,
}

pub fn run(prompt: &str) -> CommandResult {
    let service = AgentService::new();
    let frameworks = service.recommend_frameworks(prompt);
    let tools = service.recommend_tools(prompt, &frameworks);

    CommandResult::success(&RecommendReport {
        command: "recommend",
        prompt: prompt.to_string(),
        frameworks: frameworks.iter().map(|f| f.as_str().to_string()).collect(),
        tools,
    })
}
