//! Payment construction, capability gating, security-profile derivation,
//! and payment plan synthesis.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::agent::Agent;
use crate::domain::framework::FrameworkType;
use crate::domain::payment::{
    Payment, PaymentAmount, PaymentId, PaymentMethod, PaymentStatus,
};
use crate::errors::DomainError;
use crate::services::orchestrator::PlanStep;

/// Tool-name substrings that mark an agent as payment-capable.
pub const PAYMENT_TOOL_MARKERS: &[&str] = &["payment", "finance", "transaction"];

const MINUTES_PER_STAGE: u32 = 2;

const FULL_CYCLE_STEPS: &[(&str, &[usize])] = &[
    ("Validate payment details", &[]),
    ("Verify agent payment capabilities", &[0]),
    ("Run fraud screening", &[1]),
    ("Authorize the payment method", &[2]),
    ("Capture authorized funds", &[3]),
    ("Record settlement and issue confirmation", &[4]),
];

const CAPTURE_CYCLE_STEPS: &[(&str, &[usize])] = &[
    ("Verify the authorization is still current", &[]),
    ("Capture authorized funds", &[0]),
    ("Record settlement and issue confirmation", &[1]),
];

const AUTHORIZATION_STEPS: &[(&str, &[usize])] = &[
    ("Validate payment details", &[]),
    ("Run fraud screening", &[0]),
    ("Request authorization from the processor", &[1]),
];

/// Baseline controls with purely additive per-framework extensions; nothing
/// is ever removed from the base profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityProfile {
    pub encryption: String,
    pub authentication: String,
    pub authorization: String,
    pub audit_logging: bool,
    pub fraud_detection: bool,
    pub controls: Vec<String>,
}

impl SecurityProfile {
    pub fn base() -> Self {
        Self {
            encryption: "AES-256".to_string(),
            authentication: "token".to_string(),
            authorization: "role-based".to_string(),
            audit_logging: true,
            fraud_detection: true,
            controls: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    pub steps: Vec<PlanStep>,
    pub security: SecurityProfile,
    pub estimated_time_minutes: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PaymentService;

impl PaymentService {
    pub fn new() -> Self {
        Self
    }

    /// Build a Pending payment. The amount must be strictly positive at
    /// construction time; a zero amount never reaches the processor.
    pub fn create_payment(
        &self,
        amount: Decimal,
        currency: &str,
        method: PaymentMethod,
        description: &str,
        recipient: &str,
    ) -> Result<Payment, DomainError> {
        let amount = match PaymentAmount::new(amount, currency) {
            Ok(amount) if amount.is_zero() => {
                return Err(DomainError::validation(
                    "payment amount must be greater than zero",
                ))
            }
            Ok(amount) => amount,
            Err(error) => return Err(error),
        };

        let now = Utc::now();
        Ok(Payment {
            id: PaymentId::generate(),
            amount,
            method,
            description: description.to_string(),
            recipient: recipient.to_string(),
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Payment on behalf of an agent, gated by the capability check. The
    /// agent's name becomes the recipient.
    pub fn create_agent_payment(
        &self,
        agent: &Agent,
        amount: Decimal,
        currency: &str,
        method: PaymentMethod,
        description: &str,
    ) -> Result<Payment, DomainError> {
        if !self.has_payment_capabilities(agent) {
            return Err(DomainError::validation(format!(
                "agent {} has no payment-capable MCP tooling",
                agent.id.0
            )));
        }
        self.create_payment(amount, currency, method, description, agent.name.as_str())
    }

    /// A capability gate, not a permission system: true only when the agent
    /// has an MCP config whose declared tools mention payments, finance, or
    /// transactions.
    pub fn has_payment_capabilities(&self, agent: &Agent) -> bool {
        agent
            .framework_config(FrameworkType::Mcp)
            .map(|config| {
                config.declared_tools().iter().any(|tool| {
                    let tool = tool.to_lowercase();
                    PAYMENT_TOOL_MARKERS.iter().any(|marker| tool.contains(marker))
                })
            })
            .unwrap_or(false)
    }

    /// Derive the security profile for payments handled by this agent.
    pub fn generate_payment_security(&self, agent: &Agent) -> SecurityProfile {
        let mut profile = SecurityProfile::base();
        if agent.has_framework(FrameworkType::A2a) {
            profile.controls.push("inter-agent authentication".to_string());
            profile.controls.push("end-to-end message encryption".to_string());
        }
        if agent.has_framework(FrameworkType::Adk) {
            profile.controls.push("workflow integrity checks".to_string());
            profile.controls.push("transaction rollback support".to_string());
        }
        if agent.has_framework(FrameworkType::Mcp) {
            profile.controls.push("external API security".to_string());
            profile.controls.push("context verification".to_string());
        }
        profile
    }

    /// Authorization stages for a payment that has not yet been authorized.
    pub fn create_authorization_plan(
        &self,
        payment: &Payment,
        agent: &Agent,
    ) -> Result<PaymentPlan, DomainError> {
        if payment.status != PaymentStatus::Pending {
            return Err(DomainError::validation(format!(
                "no authorization plan for a payment in status {}",
                payment.status.as_str()
            )));
        }
        Ok(self.plan_from_table(payment, agent, AUTHORIZATION_STEPS))
    }

    /// End-to-end processing stages keyed by the payment's current status:
    /// Pending gets the full six-stage cycle, Authorized the three-stage
    /// capture cycle.
    pub fn create_payment_processing_plan(
        &self,
        payment: &Payment,
        agent: &Agent,
    ) -> Result<PaymentPlan, DomainError> {
        let table = match payment.status {
            PaymentStatus::Pending => FULL_CYCLE_STEPS,
            PaymentStatus::Authorized => CAPTURE_CYCLE_STEPS,
            other => {
                return Err(DomainError::validation(format!(
                    "no processing plan for a payment in status {}",
                    other.as_str()
                )))
            }
        };
        Ok(self.plan_from_table(payment, agent, table))
    }

    fn plan_from_table(
        &self,
        payment: &Payment,
        agent: &Agent,
        table: &[(&str, &[usize])],
    ) -> PaymentPlan {
        let steps: Vec<PlanStep> = table
            .iter()
            .enumerate()
            .map(|(id, (name, depends_on))| PlanStep {
                id,
                name: name.to_string(),
                depends_on: depends_on.to_vec(),
            })
            .collect();
        PaymentPlan {
            payment_id: payment.id.clone(),
            status: payment.status,
            estimated_time_minutes: MINUTES_PER_STAGE * steps.len() as u32,
            security: self.generate_payment_security(agent),
            steps,
        }
    }
}
