pub mod evaluate;
pub mod plan;
pub mod recommend;
pub mod templates;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success<T: Serialize>(payload: &T) -> Self {
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure<T: Serialize>(payload: &T, exit_code: u8) -> Self {
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|error| {
        format!(
            "{{\"success\":false,\"errors\":[\"serialization: {}\"]}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
