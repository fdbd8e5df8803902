use serde::Serialize;

use agentforge_core::{
    AgentService, ErrorReport, FrameworkConfig, GoalFitEvaluation, OrchestratorService,
};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct EvaluateReport {
    command: &'static str,
    frameworks: Vec<String>,
    evaluation: GoalFitEvaluation,
}

/// Builds a default-config agent from the frameworks recommended for the
/// prompt, then scores it against the goal.
pub fn run(prompt: &str, goal: &str) -> CommandResult {
    let agent_service = AgentService::new();
    let frameworks = agent_service.recommend_frameworks(prompt);
    let configs = frameworks.iter().map(|f| FrameworkConfig::with_defaults(*f)).collect();

    let agent = match agent_service.create_agent("ad-hoc evaluation agent", prompt, configs) {
        Ok(agent) => agent,
        Err(error) => return CommandResult::failure(&ErrorReport::from(error), 2),
    };

    let evaluation = OrchestratorService::new().evaluate_agent_for_goal(&agent, goal);
    CommandResult::success(&EvaluateReport {
        command: "evaluate",
        frameworks: frameworks.iter().map(|f| f.as_str().to_string()).collect(),
        evaluation,
    })
}
