pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "agentforge",
    about = "Agentforge operator CLI",
    long_about = "Turn agent behavior descriptions into framework recommendations, \
                  execution plans, and goal-fit evaluations.",
    after_help = "Examples:\n  agentforge recommend --prompt \"multi-agent data workflow\"\n  agentforge plan --goal \"Analyze sales data\" --tool data_processor\n  agentforge templates"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend frameworks and tools for a behavior prompt")]
    Recommend {
        #[arg(long, help = "Natural-language description of the desired agent behavior")]
        prompt: String,
    },
    #[command(about = "Synthesize an execution plan for a goal")]
    Plan {
        #[arg(long, help = "Goal text the plan is derived from")]
        goal: String,
        #[arg(long = "tool", help = "Available tool name (repeatable)")]
        tools: Vec<String>,
        #[arg(long, help = "Target framework: a2a, adk, or mcp (default adk)")]
        framework: Option<String>,
    },
    #[command(about = "Score a prompt-derived agent against a goal")]
    Evaluate {
        #[arg(long, help = "Natural-language description of the desired agent behavior")]
        prompt: String,
        #[arg(long, help = "Goal text to score the agent against")]
        goal: String,
    },
    #[command(about = "List the builtin agent template catalog")]
    Templates,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    tracing::debug!(?cli.command, "dispatching command");

    let result = match cli.command {
        Command::Recommend { prompt } => commands::recommend::run(&prompt),
        Command::Plan { goal, tools, framework } => {
            commands::plan::run(&goal, &tools, framework.as_deref())
        }
        Command::Evaluate { prompt, goal } => commands::evaluate::run(&prompt, &goal),
        Command::Templates => commands::templates::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
