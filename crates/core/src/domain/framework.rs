//! Framework configuration and per-protocol validation.
//!
//! A framework is a descriptive label (A2A, ADK, MCP) attached to a
//! protocol-specific parameter bag. The bag is schemaless at rest and is
//! validated against explicit allowed-value tables; validation reports every
//! violated constraint, never just the first.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkType {
    A2a,
    Adk,
    Mcp,
}

impl FrameworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A2a => "a2a",
            Self::Adk => "adk",
            Self::Mcp => "mcp",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a2a" => Some(Self::A2a),
            "adk" => Some(Self::Adk),
            "mcp" => Some(Self::Mcp),
            _ => None,
        }
    }

    /// Whether the protocol carries a `tools` parameter.
    pub fn supports_tools(&self) -> bool {
        matches!(self, Self::Adk | Self::Mcp)
    }
}

const A2A_DISCOVERY_MODES: &[&str] = &["multicast", "registry", "static"];
const A2A_SECURITY_MODES: &[&str] = &["tls", "mutual", "none"];
const ADK_WORKFLOWS: &[&str] = &["sequential", "parallel", "conditional", "event-driven"];
const ADK_ENVIRONMENTS: &[&str] = &["local", "container", "serverless", "distributed"];
const ADK_RETRY_POLICIES: &[&str] = &["exponential", "linear", "immediate", "none"];
const MCP_SERVER_TRANSPORTS: &[&str] = &["stdio", "websocket", "http", "grpc"];

pub const DEFAULT_A2A_CAPABILITIES: &[&str] = &["chat", "task-execution", "collaboration"];
pub const DEFAULT_ADK_RESOURCES: &str = "CPU: 1, Memory: 512MB";
pub const DEFAULT_ADK_TOOLS: &[&str] = &["general_tools"];
pub const DEFAULT_MCP_TOOLS: &[&str] = &["filesystem", "database", "web"];
pub const DEFAULT_MCP_RESOURCES: &[&str] = &["files", "databases", "apis"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    pub framework_type: FrameworkType,
    pub params: Map<String, Value>,
}

impl FrameworkConfig {
    pub fn new(framework_type: FrameworkType, params: Map<String, Value>) -> Self {
        Self { framework_type, params }
    }

    /// A minimal valid configuration for the protocol. Used by template
    /// construction and anywhere an agent is built without explicit
    /// parameter choices.
    pub fn with_defaults(framework_type: FrameworkType) -> Self {
        let mut params = Map::new();
        match framework_type {
            FrameworkType::A2a => {
                params.insert("name".to_string(), json!("agent"));
                params.insert("discovery".to_string(), json!("registry"));
                params.insert("port".to_string(), json!(8080));
                params.insert("security".to_string(), json!("tls"));
            }
            FrameworkType::Adk => {
                params.insert("workflow".to_string(), json!("sequential"));
                params.insert("environment".to_string(), json!("local"));
                params.insert("retry".to_string(), json!("exponential"));
            }
            FrameworkType::Mcp => {
                params.insert("server".to_string(), json!("stdio"));
                params.insert("context_window".to_string(), json!(8192));
            }
        }
        Self { framework_type, params }
    }

    /// Validate against the protocol schema, collecting every violation.
    /// A failing config is rejected wholesale.
    pub fn validate(&self) -> Result<(), DomainError> {
        let violations = self.collect_violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation { violations })
        }
    }

    fn collect_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        match self.framework_type {
            FrameworkType::A2a => {
                match self.params.get("name").and_then(Value::as_str) {
                    Some(name) if !name.trim().is_empty() => {}
                    _ => violations.push("a2a: name is required and must be non-empty".to_string()),
                }
                check_allowed(&self.params, "a2a", "discovery", A2A_DISCOVERY_MODES, &mut violations);
                match self.params.get("port").and_then(Value::as_u64) {
                    Some(port) if (1..=65535).contains(&port) => {}
                    _ => violations.push("a2a: port must be an integer between 1 and 65535".to_string()),
                }
                check_allowed(&self.params, "a2a", "security", A2A_SECURITY_MODES, &mut violations);
            }
            FrameworkType::Adk => {
                check_allowed(&self.params, "adk", "workflow", ADK_WORKFLOWS, &mut violations);
                check_allowed(&self.params, "adk", "environment", ADK_ENVIRONMENTS, &mut violations);
                check_allowed(&self.params, "adk", "retry", ADK_RETRY_POLICIES, &mut violations);
            }
            FrameworkType::Mcp => {
                check_allowed(&self.params, "mcp", "server", MCP_SERVER_TRANSPORTS, &mut violations);
                match self.params.get("context_window").and_then(Value::as_f64) {
                    Some(window) if window > 0.0 => {}
                    _ => violations.push("mcp: context_window must be a positive number".to_string()),
                }
            }
        }
        violations
    }

    /// The parameter bag with documented defaults merged in for absent
    /// optional fields. Present fields are never overwritten.
    pub fn params_with_defaults(&self) -> Map<String, Value> {
        let mut params = self.params.clone();
        match self.framework_type {
            FrameworkType::A2a => {
                params
                    .entry("capabilities".to_string())
                    .or_insert_with(|| json!(DEFAULT_A2A_CAPABILITIES));
            }
            FrameworkType::Adk => {
                params
                    .entry("resources".to_string())
                    .or_insert_with(|| json!(DEFAULT_ADK_RESOURCES));
                params.entry("tools".to_string()).or_insert_with(|| json!(DEFAULT_ADK_TOOLS));
            }
            FrameworkType::Mcp => {
                params.entry("tools".to_string()).or_insert_with(|| json!(DEFAULT_MCP_TOOLS));
                params
                    .entry("resources".to_string())
                    .or_insert_with(|| json!(DEFAULT_MCP_RESOURCES));
            }
        }
        params
    }

    /// The declared `tools` entries, empty when the bag carries none.
    pub fn declared_tools(&self) -> Vec<String> {
        self.params
            .get("tools")
            .and_then(Value::as_array)
            .map(|tools| {
                tools.iter().filter_map(Value::as_str).map(str::to_string).collect()
            })
            .unwrap_or_default()
    }
}

fn check_allowed(
    params: &Map<String, Value>,
    protocol: &str,
    key: &str,
    allowed: &[&str],
    violations: &mut Vec<String>,
) {
    match params.get(key).and_then(Value::as_str) {
        Some(value) if allowed.contains(&value) => {}
        _ => violations.push(format!(
            "{protocol}: {key} is required and must be one of [{}]",
            allowed.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::{FrameworkConfig, FrameworkType};
    use crate::errors::DomainError;

    fn a2a_params() -> Map<String, serde_json::Value> {
        let mut params = Map::new();
        params.insert("name".to_string(), json!("peer"));
        params.insert("discovery".to_string(), json!("multicast"));
        params.insert("port".to_string(), json!(9000));
        params.insert("security".to_string(), json!("mutual"));
        params
    }

    #[test]
    fn valid_a2a_config_passes() {
        let config = FrameworkConfig::new(FrameworkType::A2a, a2a_params());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_a2a_config_reports_every_violation() {
        let mut params = Map::new();
        params.insert("discovery".to_string(), json!("broadcast"));
        params.insert("port".to_string(), json!(0));
        let config = FrameworkConfig::new(FrameworkType::A2a, params);

        let error = config.validate().expect_err("config should fail");
        let DomainError::Validation { violations } = error else {
            panic!("expected validation error");
        };
        // name missing, discovery invalid, port out of range, security missing
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut params = Map::new();
        params.insert("server".to_string(), json!("carrier-pigeon"));
        let config = FrameworkConfig::new(FrameworkType::Mcp, params);

        let first = config.validate().expect_err("should fail");
        let second = config.validate().expect_err("should fail");
        assert_eq!(first, second);
    }

    #[test]
    fn defaults_fill_absent_optional_fields_only() {
        let mut params = Map::new();
        params.insert("server".to_string(), json!("http"));
        params.insert("context_window".to_string(), json!(4096));
        params.insert("tools".to_string(), json!(["payment_gateway"]));
        let config = FrameworkConfig::new(FrameworkType::Mcp, params);

        let merged = config.params_with_defaults();
        assert_eq!(merged["tools"], json!(["payment_gateway"]));
        assert_eq!(merged["resources"], json!(["files", "databases", "apis"]));
    }

    #[test]
    fn default_configs_are_valid_for_every_protocol() {
        for framework in [FrameworkType::A2a, FrameworkType::Adk, FrameworkType::Mcp] {
            let config = FrameworkConfig::with_defaults(framework);
            assert!(config.validate().is_ok(), "defaults for {framework:?} should validate");
        }
    }

    #[test]
    fn framework_type_round_trips_from_label() {
        for framework in [FrameworkType::A2a, FrameworkType::Adk, FrameworkType::Mcp] {
            assert_eq!(FrameworkType::parse(framework.as_str()), Some(framework));
        }
        assert_eq!(FrameworkType::parse("smtp"), None);
    }
}
