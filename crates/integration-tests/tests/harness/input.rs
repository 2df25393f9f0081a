//! Programmatic input builder for integration tests

use chatjs_config::Gateway;
use serde_json::{Map, Value};

/// Builder for raw, partial configuration inputs
///
/// Paths are dotted (`ai.tools.image.enabled`); intermediate objects are
/// created as needed.
pub struct InputBuilder {
    input: Value,
}

impl InputBuilder {
    /// Start from an empty input, which selects the default gateway
    pub fn new() -> Self {
        Self {
            input: Value::Object(Map::new()),
        }
    }

    /// Start from an input that only names a gateway
    pub fn for_gateway(gateway: Gateway) -> Self {
        Self::new().set("ai.gateway", gateway.as_str())
    }

    /// Set the value at a dotted path
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop().expect("path must not be empty");

        let mut node = &mut self.input;
        for segment in segments {
            let object = node.as_object_mut().expect("intermediate path segments must be objects");
            node = object
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        node.as_object_mut()
            .expect("parent of the final segment must be an object")
            .insert(last.to_owned(), value.into());
        self
    }

    /// Build the final input
    pub fn build(self) -> Value {
        self.input
    }
}
