pub mod domain;
pub mod errors;
pub mod processor;
pub mod services;
pub mod templates;

pub use domain::agent::{
    Agent, AgentId, AgentName, AgentPrompt, AgentStatus, GeneratedAgentSummary,
    GeneratedConfiguration,
};
pub use domain::framework::{FrameworkConfig, FrameworkType};
pub use domain::payment::{
    Payment, PaymentAmount, PaymentId, PaymentMethod, PaymentMethodType, PaymentStatus,
};
pub use errors::{DomainError, ErrorReport};
pub use processor::{IdempotencyKey, PaymentProcessor, ProcessorOutcome};
pub use services::agent::AgentService;
pub use services::orchestrator::{
    AgentAssignment, AgenticPlan, CoordinationPlan, GoalFitEvaluation, OrchestratorService,
    PlanStep, PrefixOverlapScorer, RelevanceScorer,
};
pub use services::payment::{PaymentPlan, PaymentService, SecurityProfile};
pub use templates::{builtin_templates, find_template, AgentTemplate};
