//! Merge engine
//!
//! Lays a partial user input over the defaults of its gateway. Merging is
//! shallow everywhere except `ai.workflows` (merged per workflow) and
//! `ai.tools` (merged per tool, then per field). Arrays are always
//! replaced, never concatenated. Values of the wrong shape are carried
//! over untouched so validation can report them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::defaults::{app_defaults, defaults_for};
use crate::error::{FieldPath, ResolveError, ValidationFailure, ViolationKind, type_name};
use crate::registry::{DEFAULT_GATEWAY, Gateway};

/// Gateway selected by a raw input, falling back to [`DEFAULT_GATEWAY`]
///
/// # Errors
///
/// Returns [`ResolveError::UnknownGateway`] if `ai.gateway` is present but
/// does not name a supported gateway
pub fn gateway_of(input: &Value) -> Result<Gateway, ResolveError> {
    match input.get("ai").and_then(|ai| ai.get("gateway")) {
        None | Some(Value::Null) => Ok(DEFAULT_GATEWAY),
        Some(Value::String(name)) => name
            .parse()
            .map_err(|_| ResolveError::UnknownGateway { found: name.clone() }),
        Some(other) => Err(ResolveError::UnknownGateway {
            found: other.to_string(),
        }),
    }
}

/// Merge a raw input with the defaults of the gateway it selects
///
/// The result is complete but not yet validated.
///
/// # Errors
///
/// Returns an error if the input is not an object, names an unknown
/// gateway, or the defaults cannot be encoded
pub fn merge(input: &Value) -> Result<Value, ResolveError> {
    let Some(overrides) = input.as_object() else {
        return Err(ValidationFailure::single(
            FieldPath::root(),
            ViolationKind::WrongType {
                expected: "object",
                found: type_name(input),
            },
        )
        .into());
    };

    let gateway = gateway_of(input)?;
    tracing::debug!(%gateway, overrides = overrides.len(), "merging configuration input");

    let ai = merge_ai(gateway, to_map(defaults_for(gateway))?, overrides.get("ai"));

    let mut merged = merge_top_level(app_defaults()?, overrides);
    merged.insert("ai".to_owned(), ai);

    Ok(Value::Object(merged))
}

/// Shallow merge of every top-level key except `ai`
///
/// Keys present in `overrides` replace the default wholesale.
pub fn merge_top_level(defaults: Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults;
    for (key, value) in overrides {
        if key != "ai" {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Merge the `ai` section over a gateway's default record
///
/// Top-level keys are replaced wholesale, `workflows` and `tools` get
/// their own merge. A `null` override counts as absent, any other
/// non-object override wins as-is.
pub fn merge_ai(gateway: Gateway, mut defaults: Map<String, Value>, overrides: Option<&Value>) -> Value {
    let empty = Map::new();
    let overrides = match overrides {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(overrides)) => overrides,
        Some(other) => return other.clone(),
    };

    let default_workflows = take_object(&mut defaults, "workflows");
    let default_tools = take_object(&mut defaults, "tools");

    let mut merged = Map::new();
    merged.insert("gateway".to_owned(), Value::from(gateway.as_str()));
    merged.extend(defaults);

    for (key, value) in overrides {
        if key != "workflows" && key != "tools" && !(key == "gateway" && value.is_null()) {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged.insert(
        "workflows".to_owned(),
        merge_workflows(default_workflows, overrides.get("workflows")),
    );
    merged.insert("tools".to_owned(), merge_tools(default_tools, overrides.get("tools")));

    Value::Object(merged)
}

/// Per-workflow merge: each named workflow in `overrides` replaces only itself
///
/// A `null` override keeps the defaults.
pub fn merge_workflows(defaults: Map<String, Value>, overrides: Option<&Value>) -> Value {
    match overrides {
        None | Some(Value::Null) => Value::Object(defaults),
        Some(Value::Object(overrides)) => {
            let mut merged = defaults;
            for (name, model) in overrides {
                merged.insert(name.clone(), model.clone());
            }
            Value::Object(merged)
        }
        Some(other) => other.clone(),
    }
}

/// Per-tool merge
///
/// When both the default and the override of a tool are objects their
/// fields are merged, override winning per field. Any other combination
/// takes the override. Tools missing from `overrides` keep their default,
/// and a `null` override keeps them all.
pub fn merge_tools(defaults: Map<String, Value>, overrides: Option<&Value>) -> Value {
    let overrides = match overrides {
        None | Some(Value::Null) => return Value::Object(defaults),
        Some(Value::Object(overrides)) => overrides,
        Some(other) => return other.clone(),
    };

    let mut merged = defaults;
    for (name, patch) in overrides {
        let tool = match (merged.get(name), patch) {
            (Some(Value::Object(current)), Value::Object(fields)) => {
                let mut tool = current.clone();
                for (field, value) in fields {
                    tool.insert(field.clone(), value.clone());
                }
                Value::Object(tool)
            }
            _ => patch.clone(),
        };
        merged.insert(name.clone(), tool);
    }

    Value::Object(merged)
}

fn take_object(map: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.remove(key) {
        Some(Value::Object(inner)) => inner,
        _ => Map::new(),
    }
}

fn to_map<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_value(serde_json::to_value(value)?)
}
