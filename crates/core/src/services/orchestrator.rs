//! Goal-driven plan synthesis, multi-agent coordination, and goal-fit
//! scoring.
//!
//! Every derivation here is a deterministic, ordered rule table over the
//! lowercased goal text. Plans are dependency-annotated step lists where a
//! step may depend only on earlier indices, so the result is a DAG by
//! construction.

use serde::{Deserialize, Serialize};

use crate::domain::agent::{Agent, AgentId};
use crate::domain::framework::FrameworkType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub id: usize,
    pub name: String,
    pub depends_on: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgenticPlan {
    pub goal: String,
    pub framework: FrameworkType,
    pub steps: Vec<PlanStep>,
    pub required_tools: Vec<String>,
    pub success_criteria: Vec<String>,
    pub estimated_time_minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAssignment {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub role: String,
    pub tasks: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinationPlan {
    pub goal: String,
    pub assignments: Vec<AgentAssignment>,
    pub communication_protocol: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFitEvaluation {
    pub agent_id: AgentId,
    pub goal: String,
    pub score: u8,
    pub recommendations: Vec<String>,
}

/// Seam for the prompt-relevance heuristic so real text similarity can
/// replace it without touching the four-bucket scoring contract.
pub trait RelevanceScorer {
    fn is_relevant(&self, prompt: &str, goal: &str) -> bool;
}

/// Weak by design: tokens of 4+ characters from the first 20 characters of
/// the lowercased goal are looked up in the lowercased prompt.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefixOverlapScorer;

impl RelevanceScorer for PrefixOverlapScorer {
    fn is_relevant(&self, prompt: &str, goal: &str) -> bool {
        let prompt = prompt.to_lowercase();
        let prefix: String = goal.to_lowercase().chars().take(20).collect();
        prefix.split_whitespace().filter(|token| token.len() >= 4).any(|token| prompt.contains(token))
    }
}

const MINUTES_PER_STEP: u32 = 5;

/// Plan branches in priority order; the first matching keyword set wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlanBranch {
    Research,
    Creation,
    Coordination,
    General,
}

const BRANCH_KEYWORDS: &[(&[&str], PlanBranch)] = &[
    (&["research", "analyze"], PlanBranch::Research),
    (&["create", "generate"], PlanBranch::Creation),
    (&["coordinate", "manage"], PlanBranch::Coordination),
];

type StepTable = &'static [(&'static str, &'static [usize])];

const RESEARCH_STEPS: StepTable = &[
    ("Gather relevant data from available sources", &[]),
    ("Analyze the collected information", &[0]),
    ("Summarize findings into an insights report", &[1]),
];

const CREATION_STEPS: StepTable = &[
    ("Outline requirements for the deliverable", &[]),
    ("Draft the initial content", &[0]),
    ("Review and refine the draft", &[1]),
    ("Finalize and package the deliverable", &[2]),
];

const COORDINATION_STEPS: StepTable = &[
    ("Identify participating agents and their capabilities", &[]),
    ("Assign roles and distribute tasks", &[0]),
    ("Monitor task execution and handoffs", &[1]),
    ("Consolidate results from all agents", &[2]),
];

const GENERAL_STEPS: StepTable = &[
    ("Clarify the goal and its constraints", &[]),
    ("Identify the capabilities required", &[0]),
    ("Execute the primary task", &[1]),
    ("Validate the outcome against the goal", &[2]),
    ("Report results", &[3]),
];

const RESEARCH_CRITERIA: &[&str] = &[
    "All relevant data sources identified and processed",
    "Analysis completed with quantified findings",
    "Insights documented and actionable",
];

const CREATION_CRITERIA: &[&str] = &[
    "Requirements captured before drafting began",
    "Deliverable reviewed against the requirements",
    "Final output packaged and ready to hand off",
];

const COORDINATION_CRITERIA: &[&str] = &[
    "Every participating agent has a role and task list",
    "Handoffs completed without dropped work",
    "Consolidated result covers all assigned tasks",
];

const GENERAL_CRITERIA: &[&str] = &[
    "Goal restated without open ambiguity",
    "Primary task executed to completion",
    "Outcome validated and reported",
];

/// Tool candidates per goal topic; required tools are the intersection with
/// whatever the caller supplied, never invented.
const REQUIRED_TOOL_BUCKETS: &[(&[&str], &[&str])] = &[
    (&["data", "analysis"], &["data_processor", "analytics_engine"]),
    (&["document", "content"], &["file_manager", "document_generator"]),
    (&["web", "api"], &["web_scraper", "api_client"]),
    (&["notification"], &["email_sender", "notification_service"]),
];

/// Role table per goal topic, framework presence checked in listed order.
const ANALYSIS_ROLES: &[(FrameworkType, &str)] = &[
    (FrameworkType::Mcp, "data_analyst"),
    (FrameworkType::Adk, "analysis_orchestrator"),
    (FrameworkType::A2a, "insight_communicator"),
];
const COMMUNICATION_ROLES: &[(FrameworkType, &str)] = &[
    (FrameworkType::A2a, "communication_hub"),
    (FrameworkType::Adk, "coordination_manager"),
    (FrameworkType::Mcp, "context_provider"),
];
const CREATION_ROLES: &[(FrameworkType, &str)] = &[
    (FrameworkType::Adk, "content_producer"),
    (FrameworkType::Mcp, "resource_gatherer"),
    (FrameworkType::A2a, "review_collaborator"),
];
const DEFAULT_ROLES: &[(FrameworkType, &str)] = &[
    (FrameworkType::Adk, "task_executor"),
    (FrameworkType::A2a, "team_player"),
    (FrameworkType::Mcp, "tool_specialist"),
];

pub const GENERAL_AGENT_ROLE: &str = "general_agent";

const A2A_TASKS: &[&str] =
    &["Exchange status updates with peer agents", "Negotiate task handoffs"];
const ADK_TASKS: &[&str] = &["Execute assigned workflow stages", "Report stage completion"];
const MCP_TASKS: &[&str] = &["Fetch external context and data", "Invoke registered tools"];

const RECOMMEND_A2A: &str =
    "Add an A2A framework configuration for agent-to-agent communication";
const RECOMMEND_ADK: &str = "Add an ADK framework configuration for workflow orchestration";
const RECOMMEND_MCP: &str = "Add an MCP framework configuration for data and tool access";
const RECOMMEND_PROMPT: &str = "Align the agent prompt with the stated goal";

pub struct OrchestratorService<R = PrefixOverlapScorer> {
    relevance: R,
}

impl Default for OrchestratorService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestratorService {
    pub fn new() -> Self {
        Self { relevance: PrefixOverlapScorer }
    }
}

impl<R: RelevanceScorer> OrchestratorService<R> {
    pub fn with_relevance_scorer(relevance: R) -> Self {
        Self { relevance }
    }

    /// Synthesize an execution plan for a goal with explicit tools and
    /// framework.
    pub fn create_agentic_plan(
        &self,
        goal: &str,
        available_tools: &[String],
        framework: FrameworkType,
    ) -> AgenticPlan {
        let branch = classify_branch(goal);
        let steps = branch_steps(branch);
        let estimated_time_minutes = MINUTES_PER_STEP * steps.len() as u32;

        AgenticPlan {
            goal: goal.to_string(),
            framework,
            required_tools: required_tools(goal, available_tools),
            success_criteria: branch_criteria(branch),
            estimated_time_minutes,
            steps,
        }
    }

    /// Plan for a specific agent: tools resolve from its MCP/ADK configs
    /// and the framework by priority ADK > A2A > MCP, defaulting to ADK.
    pub fn create_agentic_plan_for_agent(&self, agent: &Agent, goal: &str) -> AgenticPlan {
        let mut tools = Vec::new();
        for framework in [FrameworkType::Mcp, FrameworkType::Adk] {
            if let Some(config) = agent.framework_config(framework) {
                for tool in config.declared_tools() {
                    if !tools.contains(&tool) {
                        tools.push(tool);
                    }
                }
            }
        }

        let framework = [FrameworkType::Adk, FrameworkType::A2a, FrameworkType::Mcp]
            .into_iter()
            .find(|framework| agent.has_framework(*framework))
            .unwrap_or(FrameworkType::Adk);

        self.create_agentic_plan(goal, &tools, framework)
    }

    /// Assign exactly one role and a framework-gated task list to each
    /// agent. The communication protocol is fixed to "a2a" regardless of
    /// participant capabilities.
    pub fn create_multi_agent_coordination_plan(
        &self,
        agents: &[Agent],
        goal: &str,
    ) -> CoordinationPlan {
        let roles = topic_roles(goal);
        let assignments = agents
            .iter()
            .map(|agent| {
                let role = roles
                    .iter()
                    .find(|(framework, _)| agent.has_framework(*framework))
                    .map(|(_, role)| role.to_string())
                    .unwrap_or_else(|| GENERAL_AGENT_ROLE.to_string());

                let mut tasks = Vec::new();
                for (framework, task_set) in [
                    (FrameworkType::A2a, A2A_TASKS),
                    (FrameworkType::Adk, ADK_TASKS),
                    (FrameworkType::Mcp, MCP_TASKS),
                ] {
                    if agent.has_framework(framework) {
                        tasks.extend(task_set.iter().map(|task| task.to_string()));
                    }
                }

                AgentAssignment {
                    agent_id: agent.id.clone(),
                    agent_name: agent.name.as_str().to_string(),
                    role,
                    tasks,
                }
            })
            .collect();

        CoordinationPlan {
            goal: goal.to_string(),
            assignments,
            communication_protocol: "a2a".to_string(),
        }
    }

    /// Additive 0-100 score over four independent 25-point buckets. An
    /// unmet bucket contributes nothing and appends exactly one matching
    /// recommendation; no bucket is ever negative.
    pub fn evaluate_agent_for_goal(&self, agent: &Agent, goal: &str) -> GoalFitEvaluation {
        let goal_lower = goal.to_lowercase();
        let mentions =
            |keywords: &[&str]| keywords.iter().any(|keyword| goal_lower.contains(keyword));

        let mut score = 0u8;
        let mut recommendations = Vec::new();

        let buckets: [(bool, &str); 3] = [
            (
                mentions(&["communication", "coordinate", "multi-agent"])
                    && agent.has_framework(FrameworkType::A2a),
                RECOMMEND_A2A,
            ),
            (
                mentions(&["workflow", "process", "orchestrate"])
                    && agent.has_framework(FrameworkType::Adk),
                RECOMMEND_ADK,
            ),
            (
                mentions(&["data", "tool", "access"]) && agent.has_framework(FrameworkType::Mcp),
                RECOMMEND_MCP,
            ),
        ];
        for (met, recommendation) in buckets {
            if met {
                score += 25;
            } else {
                recommendations.push(recommendation.to_string());
            }
        }

        if self.relevance.is_relevant(agent.prompt.as_str(), goal) {
            score += 25;
        } else {
            recommendations.push(RECOMMEND_PROMPT.to_string());
        }

        GoalFitEvaluation {
            agent_id: agent.id.clone(),
            goal: goal.to_string(),
            score,
            recommendations,
        }
    }
}

fn classify_branch(goal: &str) -> PlanBranch {
    let goal = goal.to_lowercase();
    BRANCH_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| goal.contains(keyword)))
        .map(|(_, branch)| *branch)
        .unwrap_or(PlanBranch::General)
}

fn branch_steps(branch: PlanBranch) -> Vec<PlanStep> {
    let table = match branch {
        PlanBranch::Research => RESEARCH_STEPS,
        PlanBranch::Creation => CREATION_STEPS,
        PlanBranch::Coordination => COORDINATION_STEPS,
        PlanBranch::General => GENERAL_STEPS,
    };
    table
        .iter()
        .enumerate()
        .map(|(id, (name, depends_on))| PlanStep {
            id,
            name: name.to_string(),
            depends_on: depends_on.to_vec(),
        })
        .collect()
}

fn branch_criteria(branch: PlanBranch) -> Vec<String> {
    let criteria = match branch {
        PlanBranch::Research => RESEARCH_CRITERIA,
        PlanBranch::Creation => CREATION_CRITERIA,
        PlanBranch::Coordination => COORDINATION_CRITERIA,
        PlanBranch::General => GENERAL_CRITERIA,
    };
    criteria.iter().map(|criterion| criterion.to_string()).collect()
}

fn required_tools(goal: &str, available_tools: &[String]) -> Vec<String> {
    let goal = goal.to_lowercase();
    let mut candidates: Vec<&str> = Vec::new();
    for (keywords, tools) in REQUIRED_TOOL_BUCKETS {
        if keywords.iter().any(|keyword| goal.contains(keyword)) {
            candidates.extend(*tools);
        }
    }
    available_tools.iter().filter(|tool| candidates.contains(&tool.as_str())).cloned().collect()
}

fn topic_roles(goal: &str) -> &'static [(FrameworkType, &'static str)] {
    let goal = goal.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| goal.contains(keyword));
    if mentions(&["analysis", "data"]) {
        ANALYSIS_ROLES
    } else if mentions(&["communication", "coordinate"]) {
        COMMUNICATION_ROLES
    } else if mentions(&["create", "generate"]) {
        CREATION_ROLES
    } else {
        DEFAULT_ROLES
    }
}
