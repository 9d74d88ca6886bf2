//! Shared validation-spec machinery for message parsing.
//!
//! Ported from the field-by-field `validate_*_or_raise` helpers in
//! `wampproto`'s message layer, but collecting every error found in a
//! message instead of raising on the first one: a message kind declares a
//! `ValidationSpec` (length bounds plus a validator per meaningful index)
//! and `sanity_check` runs all of them, returning every failure together.

use serde_json::Value;
use std::fmt;

/// All structural/field errors found while validating one wire message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// The upper bound on any WAMP identifier, per spec: `2^53`.
pub const MAX_ID: u64 = 9_007_199_254_740_992;

pub type Validator = fn(&Value) -> Result<(), String>;

/// Declares how many positional elements a message may carry and what each
/// meaningful index must look like. Index 0 (the type tag) is checked
/// separately by `sanity_check` itself.
pub struct ValidationSpec {
    pub min_length: usize,
    pub max_length: usize,
    pub text: &'static str,
    pub fields: &'static [(usize, Validator)],
}

/// Runs structural checks (sequence shape, length, leading tag) and every
/// declared field validator, accumulating all failures rather than
/// returning on the first one.
pub fn sanity_check(
    components: &[Value],
    id: u64,
    spec: &ValidationSpec,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if components.len() < spec.min_length || components.len() > spec.max_length {
        errors.push(format!(
            "{} must have between {} and {} elements, got {}",
            spec.text,
            spec.min_length,
            spec.max_length,
            components.len()
        ));
    }

    match components.first().and_then(Value::as_u64) {
        Some(tag) if tag == id => {}
        Some(tag) => errors.push(format!(
            "{} has invalid message type {tag}, expected {id}",
            spec.text
        )),
        None => errors.push(format!("{} is missing a valid message type tag", spec.text)),
    }

    for (idx, validator) in spec.fields {
        match components.get(*idx) {
            Some(v) => {
                if let Err(e) = validator(v) {
                    errors.push(format!("{} field at index {idx}: {e}", spec.text));
                }
            }
            None if *idx < spec.min_length => errors.push(format!(
                "{} is missing required field at index {idx}",
                spec.text
            )),
            None => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

pub fn validate_id(v: &Value) -> Result<(), String> {
    match v.as_u64() {
        Some(id) if id >= 1 && id <= MAX_ID => Ok(()),
        Some(id) => Err(format!("id {id} is out of range [1, {MAX_ID}]")),
        None => Err("expected an unsigned integer id".to_string()),
    }
}

pub fn validate_string(v: &Value) -> Result<(), String> {
    if v.is_string() {
        Ok(())
    } else {
        Err("expected a string".to_string())
    }
}

pub fn validate_mapping(v: &Value) -> Result<(), String> {
    if v.is_object() {
        Ok(())
    } else {
        Err("expected an object".to_string())
    }
}

pub fn validate_sequence(v: &Value) -> Result<(), String> {
    if v.is_array() {
        Ok(())
    } else {
        Err("expected an array".to_string())
    }
}

/// Validates the `roles` field inside Hello/Welcome details: a non-empty
/// mapping whose keys are drawn from the WAMP role set.
pub fn validate_roles(v: &Value) -> Result<(), String> {
    let obj = v.as_object().ok_or("roles must be an object")?;
    if obj.is_empty() {
        return Err("roles must declare at least one role".to_string());
    }
    const KNOWN: &[&str] = &[
        "callee",
        "caller",
        "publisher",
        "subscriber",
        "dealer",
        "broker",
    ];
    for key in obj.keys() {
        if !KNOWN.contains(&key.as_str()) {
            return Err(format!("unknown role '{key}'"));
        }
    }
    Ok(())
}

/// Pulls the optional trailing `args`/`kwargs` pair off a components slice,
/// starting at `idx`, validating shape when present. Mirrors the marshal
/// convention: args is array-or-absent, kwargs is object-or-absent.
pub fn optional_args_kwargs(components: &[Value], idx: usize) -> Result<(Value, Value), String> {
    let args = match components.get(idx) {
        Some(v) if v.is_array() => v.clone(),
        Some(_) => return Err(format!("args at index {idx} must be an array")),
        None => Value::Null,
    };
    let kwargs = match components.get(idx + 1) {
        Some(v) if v.is_object() => v.clone(),
        Some(_) => return Err(format!("kwargs at index {}  must be an object", idx + 1)),
        None => Value::Null,
    };
    Ok((args, kwargs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accumulates_multiple_errors() {
        let spec = ValidationSpec {
            min_length: 3,
            max_length: 3,
            text: "Test",
            fields: &[(1, validate_id), (2, validate_string)],
        };
        let components = vec![json!(48), json!(-1), json!(42)];
        let err = sanity_check(&components, 48, &spec).unwrap_err();
        assert_eq!(err.0.len(), 2, "both the bad id and the non-string field must be reported");
    }

    #[test]
    fn reports_wrong_tag_and_bad_field_together() {
        let spec = ValidationSpec {
            min_length: 2,
            max_length: 2,
            text: "Test",
            fields: &[(1, validate_string)],
        };
        let components = vec![json!(1), json!(7)];
        let err = sanity_check(&components, 2, &spec).unwrap_err();
        assert_eq!(err.0.len(), 2);
    }
}
