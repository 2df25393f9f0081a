//! Resolution error types

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use strum::VariantNames;
use thiserror::Error;

use crate::registry::{Capability, Gateway};

/// Errors produced while turning a raw input into a [`crate::ResolvedConfig`]
#[derive(Debug, Error)]
pub enum ResolveError {
    /// `ai.gateway` names a gateway outside the supported set
    #[error("unknown gateway `{found}`, expected one of: {}", Gateway::VARIANTS.join(", "))]
    UnknownGateway { found: String },

    /// The merged configuration violates the schema
    #[error("invalid configuration:\n{0}")]
    Validation(#[from] ValidationFailure),

    /// A built-in default record fails its own gateway's schema
    #[error("built-in defaults for the `{gateway}` gateway are invalid:\n{failure}")]
    IncompleteDefaults {
        gateway: Gateway,
        failure: ValidationFailure,
    },

    /// The process-wide configuration was already set
    #[error("configuration has already been initialized")]
    AlreadyInitialized,

    /// A default record could not be encoded for merging
    #[error("failed to encode configuration defaults: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ResolveError {
    /// Violations carried by this error, empty for non-validation errors
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(failure) | Self::IncompleteDefaults { failure, .. } => failure.violations(),
            _ => &[],
        }
    }
}

/// Every schema violation found in one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    pub(crate) const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub(crate) fn single(path: FieldPath, kind: ViolationKind) -> Self {
        Self::new(vec![Violation { path, kind }])
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// First violation reported at `path` (dotted form, e.g. `ai.tools.image.default`)
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|violation| violation.path.to_string() == path)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Nature of a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    UnknownField,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    OutOfRange {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        found: String,
    },
    NotAllowed {
        allowed: Vec<String>,
        found: String,
    },
    UnknownModel {
        gateway: Gateway,
        capability: Capability,
        id: String,
    },
    CapabilityUnavailable {
        gateway: Gateway,
        capability: Capability,
    },
    InvalidFormat {
        format: &'static str,
        found: String,
    },
    Malformed {
        message: String,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => f.write_str("required field is missing"),
            Self::UnknownField => f.write_str("unknown field"),
            Self::WrongType { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::OutOfRange { min, max, found } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "{found} is outside the range {min}..={max}"),
                (Some(min), None) => write!(f, "{found} is less than {min}"),
                (None, Some(max)) => write!(f, "{found} is greater than {max}"),
                (None, None) => write!(f, "{found} is out of range"),
            },
            Self::NotAllowed { allowed, found } => {
                write!(f, "`{found}` is not allowed, expected one of: {}", allowed.join(", "))
            }
            Self::UnknownModel { gateway, capability, id } => {
                write!(f, "`{id}` is not a {capability} model of the `{gateway}` gateway")
            }
            Self::CapabilityUnavailable { gateway, capability } => {
                write!(f, "the `{gateway}` gateway has no {capability} models, so this tool cannot be enabled")
            }
            Self::InvalidFormat { format, found } => write!(f, "`{found}` is not a valid {format}"),
            Self::Malformed { message } => f.write_str(message),
        }
    }
}

/// Location of a value inside the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl FieldPath {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    /// RFC 6901 pointer to the same location, for [`Value::pointer_mut`]
    pub(crate) fn to_pointer(&self) -> String {
        self.0.iter().fold(String::new(), |mut pointer, segment| {
            pointer.push('/');
            match segment {
                PathSegment::Key(key) => pointer.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(index) => pointer.push_str(&index.to_string()),
            }
            pointer
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }

        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// JSON type name of `value`, as used in messages
pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[PathSegment]) -> FieldPath {
        let mut path = FieldPath::root();
        for segment in segments {
            path.push(segment.clone());
        }
        path
    }

    #[test]
    fn path_display() {
        let nested = path(&[
            PathSegment::Key("ai".to_owned()),
            PathSegment::Key("curatedDefaults".to_owned()),
            PathSegment::Index(2),
        ]);
        assert_eq!(nested.to_string(), "ai.curatedDefaults[2]");
        assert_eq!(FieldPath::root().to_string(), "(root)");
    }

    #[test]
    fn path_as_json_pointer() {
        let nested = path(&[
            PathSegment::Key("attachments".to_owned()),
            PathSegment::Key("acceptedTypes".to_owned()),
            PathSegment::Key("image/png".to_owned()),
            PathSegment::Index(0),
        ]);
        assert_eq!(nested.to_pointer(), "/attachments/acceptedTypes/image~1png/0");
        assert_eq!(FieldPath::root().to_pointer(), "");
    }

    #[test]
    fn violation_serializes_flat() {
        let violation = Violation {
            path: path(&[PathSegment::Key("appUrl".to_owned())]),
            kind: ViolationKind::InvalidFormat {
                format: "URL",
                found: "nope".to_owned(),
            },
        };

        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "path": "appUrl", "kind": "invalid_format", "format": "URL", "found": "nope" })
        );
    }

    #[test]
    fn failure_lists_every_violation() {
        let failure = ValidationFailure::new(vec![
            Violation {
                path: path(&[PathSegment::Key("appName".to_owned())]),
                kind: ViolationKind::MissingField,
            },
            Violation {
                path: path(&[PathSegment::Key("legal".to_owned())]),
                kind: ViolationKind::WrongType {
                    expected: "object",
                    found: "string",
                },
            },
        ]);

        assert_eq!(
            failure.to_string(),
            "  - appName: required field is missing\n  - legal: expected object, found string"
        );
        assert!(failure.at("legal").is_some());
        assert!(failure.at("ai").is_none());
    }

    #[test]
    fn unknown_gateway_message_lists_supported_gateways() {
        let err = ResolveError::UnknownGateway {
            found: "bedrock".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown gateway `bedrock`, expected one of: vercel, openrouter, openai, openai-compatible"
        );
    }
}
