//! The Payment aggregate and its guarded status machine.
//!
//! Allowed edges: Pending -> {Authorized, Cancelled, Failed};
//! Authorized -> {Captured, Failed}; Captured -> {Refunded};
//! Failed, Refunded and Cancelled are terminal. `mark_failed` is the only
//! transition reachable from more than one state: it is rejected solely
//! from Captured, where funds have already settled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub String);

impl PaymentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Non-negative money amount with a 3-letter uppercase currency code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmount {
    amount: Decimal,
    currency: String,
}

impl PaymentAmount {
    pub fn new(amount: Decimal, currency: &str) -> Result<Self, DomainError> {
        let mut violations = Vec::new();
        if amount < Decimal::ZERO {
            violations.push("payment amount must not be negative".to_string());
        }
        let currency = currency.trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            violations.push("currency must be a 3-letter code".to_string());
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation { violations });
        }
        Ok(Self { amount, currency })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    CreditCard,
    DebitCard,
    BankTransfer,
    DigitalWallet,
    Cryptocurrency,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::BankTransfer => "bank_transfer",
            Self::DigitalWallet => "digital_wallet",
            Self::Cryptocurrency => "cryptocurrency",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit_card" => Some(Self::CreditCard),
            "debit_card" => Some(Self::DebitCard),
            "bank_transfer" => Some(Self::BankTransfer),
            "digital_wallet" => Some(Self::DigitalWallet),
            "cryptocurrency" => Some(Self::Cryptocurrency),
            _ => None,
        }
    }
}

/// Method details stay opaque to the core; the processor interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub method_type: PaymentMethodType,
    pub details: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Authorized,
    Captured,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "authorized" => Some(Self::Authorized),
            "captured" => Some(Self::Captured),
            "failed" => Some(Self::Failed),
            "refunded" => Some(Self::Refunded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Refunded | Self::Cancelled)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: PaymentAmount,
    pub method: PaymentMethod,
    pub description: String,
    pub recipient: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn authorize(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentStatus::Authorized, &[PaymentStatus::Pending])
    }

    pub fn capture(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentStatus::Captured, &[PaymentStatus::Authorized])
    }

    pub fn refund(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentStatus::Refunded, &[PaymentStatus::Captured])
    }

    pub fn cancel(&self) -> Result<Payment, DomainError> {
        self.transition(PaymentStatus::Cancelled, &[PaymentStatus::Pending])
    }

    /// Permitted from any non-terminal state except Captured.
    pub fn mark_failed(&self) -> Result<Payment, DomainError> {
        self.transition(
            PaymentStatus::Failed,
            &[PaymentStatus::Pending, PaymentStatus::Authorized],
        )
    }

    fn transition(
        &self,
        attempted: PaymentStatus,
        required: &[PaymentStatus],
    ) -> Result<Payment, DomainError> {
        if !required.contains(&self.status) {
            return Err(DomainError::InvalidPaymentTransition {
                from: self.status,
                attempted,
                required: required.to_vec(),
            });
        }
        let mut next = self.clone();
        next.status = attempted;
        next.updated_at = Utc::now();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{
        Payment, PaymentAmount, PaymentId, PaymentMethod, PaymentMethodType, PaymentStatus,
    };
    use crate::errors::DomainError;

    fn payment(status: PaymentStatus) -> Payment {
        let now = Utc::now();
        Payment {
            id: PaymentId::generate(),
            amount: PaymentAmount::new(Decimal::new(2500, 2), "USD").expect("valid amount"),
            method: PaymentMethod {
                method_type: PaymentMethodType::CreditCard,
                details: json!({"last4": "4242"}),
            },
            description: "API usage".to_string(),
            recipient: "Data Pipeline Operator".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_payment_authorizes_into_new_aggregate() {
        let pending = payment(PaymentStatus::Pending);
        let authorized = pending.authorize().expect("pending -> authorized");

        assert_eq!(authorized.status, PaymentStatus::Authorized);
        assert_eq!(pending.status, PaymentStatus::Pending);
        assert!(authorized.updated_at >= authorized.created_at);
    }

    #[test]
    fn authorizing_twice_is_rejected_with_required_state() {
        let authorized = payment(PaymentStatus::Authorized);
        let error = authorized.authorize().expect_err("already authorized");
        assert!(matches!(
            error,
            DomainError::InvalidPaymentTransition { required, .. }
                if required == vec![PaymentStatus::Pending]
        ));
    }

    #[test]
    fn capturing_a_pending_payment_fails() {
        let pending = payment(PaymentStatus::Pending);
        assert!(pending.capture().is_err());
    }

    #[test]
    fn refund_only_after_capture() {
        let captured = payment(PaymentStatus::Authorized).capture().expect("capture");
        let refunded = captured.refund().expect("captured -> refunded");
        assert_eq!(refunded.status, PaymentStatus::Refunded);

        assert!(payment(PaymentStatus::Pending).refund().is_err());
    }

    #[test]
    fn mark_failed_is_rejected_only_from_captured_and_terminal_states() {
        assert!(payment(PaymentStatus::Pending).mark_failed().is_ok());
        assert!(payment(PaymentStatus::Authorized).mark_failed().is_ok());
        assert!(payment(PaymentStatus::Captured).mark_failed().is_err());
        assert!(payment(PaymentStatus::Refunded).mark_failed().is_err());
        assert!(payment(PaymentStatus::Cancelled).mark_failed().is_err());
    }

    #[test]
    fn terminal_states_admit_no_further_transitions() {
        let cancelled = payment(PaymentStatus::Pending).cancel().expect("cancel");
        assert!(cancelled.authorize().is_err());
        assert!(cancelled.capture().is_err());
        assert!(cancelled.mark_failed().is_err());
    }

    #[test]
    fn amount_rejects_negative_values_and_bad_currency() {
        let error = PaymentAmount::new(Decimal::new(-1, 0), "usdollar").expect_err("invalid");
        let DomainError::Validation { violations } = error else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 2);

        let amount = PaymentAmount::new(Decimal::new(100, 2), " eur ").expect("valid");
        assert_eq!(amount.currency(), "EUR");
    }
}
