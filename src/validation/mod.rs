use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

mod rule;
pub mod rules;

pub use rule::{Rule, as_id};

/// The rules of a single request field, each paired with the message reported when it fails.
#[derive(Debug)]
pub struct FieldRules {
    pub field: &'static str,
    pub checks: &'static [(Rule, &'static str)],
}

/// Checks `body` against `rules`, keeping only the fields the rules mention.
///
/// Fields are checked in table order and rules in the order listed; the first failing rule ends validation
/// and its message becomes the error.
pub fn validate(body: &Value, rules: &[FieldRules]) -> Result<Input, ValidationError> {
    let empty = Map::new();
    let object = body.as_object().unwrap_or(&empty);

    for field_rules in rules {
        let value = object.get(field_rules.field);
        if let Some((rule, message)) = field_rules.checks.iter().find(|(rule, _)| !rule.passes(value)) {
            debug!(field = field_rules.field, "Rule {:?} failed", rule);
            return Err(ValidationError::Failed {
                field: field_rules.field,
                message: *message,
            });
        }
    }

    let fields = rules
        .iter()
        .filter_map(|r| object.get(r.field).map(|value| (r.field.to_string(), value.clone())))
        .collect();
    Ok(Input { fields })
}

/// Request fields that passed validation.
#[derive(Debug)]
pub struct Input {
    fields: Map<String, Value>,
}

impl Input {
    fn get(&self, field: &str) -> Result<&Value, ValidationError> {
        self.fields.get(field).ok_or_else(|| ValidationError::Missing(field.to_string()))
    }

    pub fn number(&self, field: &str) -> Result<f64, ValidationError> {
        let value = self.get(field)?;
        rule::as_number(value).ok_or_else(|| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.clone(),
        })
    }

    pub fn string(&self, field: &str) -> Result<String, ValidationError> {
        match self.get(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            value => Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
            }),
        }
    }

    /// The elements of an array field as record ids, `None` for elements that can never be an id.
    pub fn ids(&self, field: &str) -> Result<Vec<Option<u64>>, ValidationError> {
        match self.get(field)? {
            Value::Array(values) => Ok(values.iter().map(|v| rule::as_number(v).and_then(as_id)).collect()),
            value => Err(ValidationError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
            }),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{message}")]
    Failed { field: &'static str, message: &'static str },
    #[error("missing field '{0}'")]
    Missing(String),
    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: Value },
}
