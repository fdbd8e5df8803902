use serde::Serialize;

use agentforge_core::{AgenticPlan, FrameworkType, OrchestratorService};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct PlanReport {
    command: &'static str,
    plan: AgenticPlan,
}

#[derive(Debug, Serialize)]
struct PlanError {
    command: &'static str,
    success: bool,
    errors: Vec<String>,
}

pub fn run(goal: &str, tools: &[String], framework: Option<&str>) -> CommandResult {
    let framework = match framework {
        Some(label) => match FrameworkType::parse(label) {
            Some(framework) => framework,
            None => {
                return CommandResult::failure(
                    &PlanError {
                        command: "plan",
                        success: false,
                        errors: vec![format!("unknown framework: {label}")],
                    },
                    2,
                )
            }
        },
        None => FrameworkType::Adk,
    };

    let plan = OrchestratorService::new().create_agentic_plan(goal, tools, framework);
    CommandResult::success(&PlanReport { command: "plan", plan })
}
