//! # Applicability Conditions
//!
//! A requirement may carry conditions that decide whether it applies to a
//! given provider. On the wire a condition is a `{key, operator, value}`
//! triple; in Rust it is a closed enum with one variant per recognized key,
//! so evaluation is an exhaustive `match` rather than string dispatch.
//!
//! | Wire key | Variant | Inferred from |
//! |----------|---------|---------------|
//! | `crossBorderShipping` | [`Condition::CrossBorderShipping`] | country/region counts |
//! | `supportsInteroperability` | [`Condition::SupportsInteroperability`] | standard, capabilities |
//! | anything else | [`Condition::Unrecognized`] | nothing |
//!
//! The `eq` operator compares the inferred attribute with the expected
//! boolean; an `eq` with no value (or `null`) can never hold. Every other
//! operator degrades to a truthiness check on the inferred attribute.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an inferred attribute is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// `eq`: the attribute must equal this value.
    Equals(bool),
    /// Any other operator: the attribute must be true.
    Truthy,
    /// `eq` without an expected value. Never holds.
    Unsatisfiable,
}

impl Expectation {
    /// Apply the expectation to an inferred attribute.
    pub fn holds_for(self, attribute: bool) -> bool {
        match self {
            Self::Equals(expected) => attribute == expected,
            Self::Truthy => attribute,
            Self::Unsatisfiable => false,
        }
    }
}

/// A single applicability condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireCondition", into = "WireCondition")]
pub enum Condition {
    /// Provider ships across borders (more than one country or region).
    CrossBorderShipping(Expectation),
    /// Provider supports roaming interoperability.
    SupportsInteroperability(Expectation),
    /// A key this evaluator does not know. Kept verbatim so it round-trips.
    Unrecognized {
        /// Original key.
        key: String,
        /// Original operator.
        operator: String,
        /// Original expected value.
        value: Value,
    },
}

impl Condition {
    /// Wire key for this condition.
    pub fn key(&self) -> &str {
        match self {
            Self::CrossBorderShipping(_) => "crossBorderShipping",
            Self::SupportsInteroperability(_) => "supportsInteroperability",
            Self::Unrecognized { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireCondition {
    key: String,
    #[serde(default = "default_operator")]
    operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

fn default_operator() -> String {
    "eq".to_string()
}

/// JSON truthiness, with the strings `"true"`/`"false"` read as booleans.
fn expected_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) if s.eq_ignore_ascii_case("true") => true,
        Value::String(s) if s.eq_ignore_ascii_case("false") => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<WireCondition> for Condition {
    fn from(wire: WireCondition) -> Self {
        let expectation = if wire.operator.trim().eq_ignore_ascii_case("eq") {
            match &wire.value {
                Some(value) if !value.is_null() => Expectation::Equals(expected_bool(value)),
                _ => Expectation::Unsatisfiable,
            }
        } else {
            Expectation::Truthy
        };
        match wire.key.trim() {
            "crossBorderShipping" | "cross_border_shipping" => Self::CrossBorderShipping(expectation),
            "supportsInteroperability" | "supports_interoperability" => {
                Self::SupportsInteroperability(expectation)
            }
            _ => Self::Unrecognized {
                key: wire.key,
                operator: wire.operator,
                value: wire.value.unwrap_or(Value::Null),
            },
        }
    }
}

impl From<Condition> for WireCondition {
    fn from(condition: Condition) -> Self {
        let key = condition.key().to_string();
        match condition {
            Condition::CrossBorderShipping(e) | Condition::SupportsInteroperability(e) => match e {
                Expectation::Equals(b) => Self {
                    key,
                    operator: "eq".into(),
                    value: Some(Value::Bool(b)),
                },
                Expectation::Truthy => Self {
                    key,
                    operator: "truthy".into(),
                    value: None,
                },
                Expectation::Unsatisfiable => Self {
                    key,
                    operator: "eq".into(),
                    value: None,
                },
            },
            Condition::Unrecognized {
                key,
                operator,
                value,
            } => Self {
                key,
                operator,
                value: (!value.is_null()).then_some(value),
            },
        }
    }
}
