//! The external payment-processor collaborator.
//!
//! No real payment execution happens in this system; the processor is an
//! opaque, swappable capability behind this trait. Failures come back as
//! values, never as raised errors. Every state-changing call carries an
//! idempotency key so a retried invocation after a timeout cannot
//! double-process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{Payment, PaymentId, PaymentStatus};

/// Outcome contract shared by all processor operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ProcessorOutcome {
    pub fn ok(reference: impl Into<String>) -> Self {
        Self { success: true, error: None, reference: Some(reference.into()) }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()), reference: None }
    }
}

/// Payment id plus the intended transition, so a re-sent request is
/// recognizable at the processor boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey {
    pub payment_id: PaymentId,
    pub transition: PaymentStatus,
}

impl IdempotencyKey {
    pub fn new(payment_id: PaymentId, transition: PaymentStatus) -> Self {
        Self { payment_id, transition }
    }

    pub fn token(&self) -> String {
        format!("{}:{}", self.payment_id.0, self.transition.as_str())
    }
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process_payment(&self, payment: &Payment, key: &IdempotencyKey) -> ProcessorOutcome;
    async fn authorize_payment(&self, payment: &Payment, key: &IdempotencyKey)
        -> ProcessorOutcome;
    async fn capture_payment(&self, payment: &Payment, key: &IdempotencyKey) -> ProcessorOutcome;
    async fn refund_payment(&self, payment: &Payment, key: &IdempotencyKey) -> ProcessorOutcome;
    async fn cancel_payment(&self, payment: &Payment, key: &IdempotencyKey) -> ProcessorOutcome;
    async fn validate_payment(&self, payment: &Payment) -> ProcessorOutcome;
}
