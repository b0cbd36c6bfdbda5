use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Present, not `null` and not an empty string.
    Required,
    /// A JSON number or a string holding a finite number.
    Number,
    /// A number greater than or equal to the bound.
    Min(f64),
    /// A string, or a number taken as its text.
    Text,
    Array,
}

impl Rule {
    /// Checks `value`, which is `None` when the field is absent. Only [`Rule::Required`] rejects absent values,
    /// every other rule skips them.
    pub fn passes(&self, value: Option<&Value>) -> bool {
        let value = match (self, value) {
            (Rule::Required, value) => return value.is_some_and(is_filled),
            (_, None | Some(Value::Null)) => return true,
            (_, Some(value)) => value,
        };

        match self {
            Rule::Required => true,
            Rule::Number => as_number(value).is_some(),
            Rule::Min(min) => as_number(value).is_some_and(|n| n >= *min),
            Rule::Text => value.is_string() || value.is_number(),
            Rule::Array => value.is_array(),
        }
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Interprets a number as a record id. Negative, fractional and out of range values are not ids.
pub fn as_id(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}
