//! Schema family
//!
//! A small description language for the configuration's shape. The `ai`
//! section is generated per gateway from a single template
//! ([`ai_schema`]) so every gateway gets the same structure, differing
//! only in which model identifiers are accepted. The per-gateway schemas
//! are combined into one tagged union keyed on `gateway`.

use std::sync::{LazyLock, OnceLock};

use regex::Regex;
use serde_json::Value;
use strum::VariantNames;
use url::Url;

use crate::ai::ToolName;
use crate::app::REQUIRED_MIME_TYPES;
use crate::error::{FieldPath, PathSegment, ValidationFailure, Violation, ViolationKind, type_name};
use crate::registry::{Capability, Gateway, GatewayTable};

static AI_SCHEMAS: LazyLock<GatewayTable<Schema>> = LazyLock::new(|| GatewayTable::from_fn(ai_schema));

static CONFIG_SCHEMA: LazyLock<Schema> = LazyLock::new(build_config_schema);

/// Schema of the `ai` section for `gateway`
pub fn schema_for(gateway: Gateway) -> &'static Schema {
    AI_SCHEMAS.get(gateway)
}

/// Schema of the whole configuration, `ai` being a union over every gateway
pub fn config_schema() -> &'static Schema {
    &CONFIG_SCHEMA
}

/// Shape constraint on a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Bool,
    String,
    /// String that looks like an email address
    Email,
    /// Absolute URL
    Url,
    /// Whole number within optional inclusive bounds
    Integer { min: Option<i64>, max: Option<i64> },
    Number,
    /// Exactly this value
    Literal(Value),
    /// One of a fixed set of strings
    OneOf(&'static [&'static str]),
    /// Model identifier from the gateway's space for `capability`
    ModelId { gateway: Gateway, capability: Capability },
    Array(Box<Schema>),
    /// Object with a fixed set of keys; anything else is rejected
    Object(Vec<Field>),
    /// Object with arbitrary keys, some of which are mandatory
    Map {
        values: Box<Schema>,
        required: &'static [&'static str],
    },
    /// Object whose shape is chosen by the literal value of `tag`
    TaggedUnion {
        tag: &'static str,
        variants: Vec<(Value, Schema)>,
    },
    /// Branch a gateway cannot take because it has no models for `capability`
    Unsupported { gateway: Gateway, capability: Capability },
}

/// Named member of an [`Schema::Object`]
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: false,
        }
    }
}

impl Schema {
    fn array(items: Self) -> Self {
        Self::Array(Box::new(items))
    }

    const fn int(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Non-negative integer that fits in a `u32`
    const fn count() -> Self {
        Self::int(0, u32::MAX as i64)
    }

    /// Check `value`, collecting every violation
    ///
    /// # Errors
    ///
    /// Returns all violations found, in document order
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailure> {
        self.run(value).map(|_| ())
    }

    /// Check `value` and rewrite whole-number floats in integer fields
    /// (`2.0`) as integers, so the result deserializes into integer types
    ///
    /// # Errors
    ///
    /// Returns all violations found, in document order; `value` is left
    /// untouched in that case
    pub fn normalize(&self, value: &mut Value) -> Result<(), ValidationFailure> {
        for (path, number) in self.run(value)? {
            if let Some(slot) = value.pointer_mut(&path.to_pointer()) {
                *slot = integer_value(number);
            }
        }
        Ok(())
    }

    fn run(&self, value: &Value) -> Result<Vec<(FieldPath, i128)>, ValidationFailure> {
        let mut checker = Checker::default();
        checker.check(self, value);

        if checker.violations.is_empty() {
            Ok(checker.whole_floats)
        } else {
            Err(ValidationFailure::new(checker.violations))
        }
    }
}

/// Template for the `ai` section, instantiated once per gateway
pub fn ai_schema(gateway: Gateway) -> Schema {
    let chat = || Schema::ModelId {
        gateway,
        capability: Capability::Chat,
    };

    Schema::Object(vec![
        Field::required("gateway", Schema::Literal(Value::from(gateway.as_str()))),
        Field::required("providerOrder", Schema::array(Schema::String)),
        Field::required("disabledModels", Schema::array(chat())),
        Field::required("curatedDefaults", Schema::array(chat())),
        Field::required("anonymousModels", Schema::array(chat())),
        Field::required(
            "workflows",
            Schema::Object(vec![
                Field::required("chat", chat()),
                Field::required("title", chat()),
                Field::required("pdf", chat()),
                Field::required("chatImageCompatible", chat()),
            ]),
        ),
        Field::required("tools", tools_schema(gateway)),
    ])
}

fn tools_schema(gateway: Gateway) -> Schema {
    let chat = || Schema::ModelId {
        gateway,
        capability: Capability::Chat,
    };
    let toggle = || Schema::Object(vec![Field::required("enabled", Schema::Bool)]);

    Schema::Object(vec![
        Field::required("webSearch", toggle()),
        Field::required("urlRetrieval", toggle()),
        Field::required("codeExecution", toggle()),
        Field::required("mcp", toggle()),
        Field::required(
            "followupSuggestions",
            Schema::Object(vec![
                Field::required("enabled", Schema::Bool),
                Field::required("default", chat()),
            ]),
        ),
        Field::required("text", Schema::Object(vec![Field::required("polish", chat())])),
        Field::required(
            "sheet",
            Schema::Object(vec![
                Field::required("format", chat()),
                Field::required("analyze", chat()),
            ]),
        ),
        Field::required("code", Schema::Object(vec![Field::required("edits", chat())])),
        Field::required("image", media_tool_schema(gateway, Capability::Image)),
        Field::required("video", media_tool_schema(gateway, Capability::Video)),
        Field::required(
            "deepResearch",
            Schema::Object(vec![
                Field::required("enabled", Schema::Bool),
                Field::required("defaultModel", chat()),
                Field::required("finalReportModel", chat()),
                Field::required("allowClarification", Schema::Bool),
                Field::required("maxResearcherIterations", Schema::int(1, 10)),
                Field::required("maxConcurrentResearchUnits", Schema::int(1, 20)),
                Field::required("maxSearchQueries", Schema::int(1, 10)),
            ]),
        ),
    ])
}

/// `enabled: true` requires `default`; `enabled: false` makes it optional
fn media_tool_schema(gateway: Gateway, capability: Capability) -> Schema {
    let model = Schema::ModelId { gateway, capability };

    let enabled = if gateway.models(capability).is_empty() {
        Schema::Unsupported { gateway, capability }
    } else {
        Schema::Object(vec![
            Field::required("enabled", Schema::Literal(Value::Bool(true))),
            Field::required("default", model.clone()),
        ])
    };
    let disabled = Schema::Object(vec![
        Field::required("enabled", Schema::Literal(Value::Bool(false))),
        Field::optional("default", model),
    ]);

    Schema::TaggedUnion {
        tag: "enabled",
        variants: vec![(Value::Bool(true), enabled), (Value::Bool(false), disabled)],
    }
}

#[allow(clippy::too_many_lines)]
fn build_config_schema() -> Schema {
    let string = || Schema::String;
    let strings = || Schema::array(Schema::String);
    let policy = || {
        Schema::Object(vec![
            Field::required("title", string()),
            Field::optional("lastUpdated", string()),
        ])
    };

    let ai = Schema::TaggedUnion {
        tag: "gateway",
        variants: AI_SCHEMAS
            .iter()
            .map(|(gateway, schema)| (Value::from(gateway.as_str()), schema.clone()))
            .collect(),
    };

    Schema::Object(vec![
        Field::required("appPrefix", string()),
        Field::required("appName", string()),
        Field::optional("appTitle", string()),
        Field::required("appDescription", string()),
        Field::required("appUrl", Schema::Url),
        Field::required(
            "organization",
            Schema::Object(vec![
                Field::required("name", string()),
                Field::required(
                    "contact",
                    Schema::Object(vec![
                        Field::required("privacyEmail", Schema::Email),
                        Field::required("legalEmail", Schema::Email),
                    ]),
                ),
            ]),
        ),
        Field::required(
            "services",
            Schema::Object(vec![
                Field::required("hosting", string()),
                Field::required("aiProviders", strings()),
                Field::required("paymentProcessors", strings()),
            ]),
        ),
        Field::required(
            "features",
            Schema::Object(vec![Field::required("attachments", Schema::Bool)]),
        ),
        Field::optional(
            "pricing",
            Schema::Object(vec![
                Field::optional("currency", string()),
                Field::optional(
                    "free",
                    Schema::Object(vec![
                        Field::required("name", string()),
                        Field::required("summary", string()),
                    ]),
                ),
                Field::optional(
                    "pro",
                    Schema::Object(vec![
                        Field::required("name", string()),
                        Field::required("monthlyPrice", Schema::Number),
                        Field::required("summary", string()),
                    ]),
                ),
            ]),
        ),
        Field::required(
            "legal",
            Schema::Object(vec![
                Field::required("minimumAge", Schema::count()),
                Field::required("governingLaw", string()),
                Field::required("refundPolicy", string()),
            ]),
        ),
        Field::required(
            "policies",
            Schema::Object(vec![
                Field::required("privacy", policy()),
                Field::required("terms", policy()),
            ]),
        ),
        Field::required(
            "authentication",
            Schema::Object(vec![
                Field::required("google", Schema::Bool),
                Field::required("github", Schema::Bool),
                Field::required("vercel", Schema::Bool),
            ]),
        ),
        Field::required("ai", ai),
        Field::required(
            "anonymous",
            Schema::Object(vec![
                Field::required("credits", Schema::count()),
                Field::required("availableTools", Schema::array(Schema::OneOf(ToolName::VARIANTS))),
                Field::required(
                    "rateLimit",
                    Schema::Object(vec![
                        Field::required("requestsPerMinute", Schema::count()),
                        Field::required("requestsPerMonth", Schema::count()),
                    ]),
                ),
            ]),
        ),
        Field::required(
            "attachments",
            Schema::Object(vec![
                Field::required(
                    "maxBytes",
                    Schema::Integer {
                        min: Some(0),
                        max: None,
                    },
                ),
                Field::required("maxDimension", Schema::count()),
                Field::required(
                    "acceptedTypes",
                    Schema::Map {
                        values: Box::new(strings()),
                        required: REQUIRED_MIME_TYPES,
                    },
                ),
            ]),
        ),
    ])
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("must be valid regex"))
}

/// JSON integer for a number that passed an integer check
fn integer_value(number: i128) -> Value {
    i64::try_from(number)
        .map(Value::from)
        .or_else(|_| u64::try_from(number).map(Value::from))
        .unwrap_or_else(|_| Value::from(number.to_string()))
}

/// Integer value of a float with no fractional part
fn whole_number(float: f64) -> Option<i128> {
    if !float.is_finite() || float.fract().abs() > 0.0 {
        return None;
    }
    // `f64` Display never uses exponent notation
    format!("{float}").parse().ok()
}

/// Render a literal for messages: strings bare, everything else as JSON
fn render(value: &Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_owned)
}

#[derive(Default)]
struct Checker {
    path: FieldPath,
    violations: Vec<Violation>,
    /// Integer fields written as floats, with their integer value
    whole_floats: Vec<(FieldPath, i128)>,
}

impl Checker {
    fn report(&mut self, kind: ViolationKind) {
        self.violations.push(Violation {
            path: self.path.clone(),
            kind,
        });
    }

    fn wrong_type(&mut self, expected: &'static str, value: &Value) {
        self.report(ViolationKind::WrongType {
            expected,
            found: type_name(value),
        });
    }

    fn at_key(&mut self, key: &str, f: impl FnOnce(&mut Self)) {
        self.path.push(PathSegment::Key(key.to_owned()));
        f(self);
        self.path.pop();
    }

    fn at_index(&mut self, index: usize, f: impl FnOnce(&mut Self)) {
        self.path.push(PathSegment::Index(index));
        f(self);
        self.path.pop();
    }

    fn check(&mut self, schema: &Schema, value: &Value) {
        match schema {
            Schema::Bool => {
                if !value.is_boolean() {
                    self.wrong_type("boolean", value);
                }
            }
            Schema::String => {
                if !value.is_string() {
                    self.wrong_type("string", value);
                }
            }
            Schema::Email => self.check_format(value, "email address", |s| email_regex().is_match(s)),
            Schema::Url => self.check_format(value, "URL", |s| Url::parse(s).is_ok()),
            Schema::Integer { min, max } => self.check_integer(*min, *max, value),
            Schema::Number => {
                if !value.is_number() {
                    self.wrong_type("number", value);
                }
            }
            Schema::Literal(expected) => {
                if value != expected {
                    self.report(ViolationKind::NotAllowed {
                        allowed: vec![render(expected)],
                        found: render(value),
                    });
                }
            }
            Schema::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => {}
                Some(s) => self.report(ViolationKind::NotAllowed {
                    allowed: allowed.iter().map(|&a| a.to_owned()).collect(),
                    found: s.to_owned(),
                }),
                None => self.wrong_type("string", value),
            },
            Schema::ModelId { gateway, capability } => match value.as_str() {
                Some(id) if gateway.models(*capability).contains(id) => {}
                Some(id) => self.report(ViolationKind::UnknownModel {
                    gateway: *gateway,
                    capability: *capability,
                    id: id.to_owned(),
                }),
                None => self.wrong_type("string", value),
            },
            Schema::Array(items) => match value.as_array() {
                Some(elements) => {
                    for (i, element) in elements.iter().enumerate() {
                        self.at_index(i, |checker| checker.check(items, element));
                    }
                }
                None => self.wrong_type("array", value),
            },
            Schema::Object(fields) => self.check_object(fields, value),
            Schema::Map { values, required } => self.check_map(values, required, value),
            Schema::TaggedUnion { tag, variants } => self.check_union(tag, variants, value),
            Schema::Unsupported { gateway, capability } => self.report(ViolationKind::CapabilityUnavailable {
                gateway: *gateway,
                capability: *capability,
            }),
        }
    }

    fn check_format(&mut self, value: &Value, format: &'static str, is_valid: impl Fn(&str) -> bool) {
        match value.as_str() {
            Some(s) if is_valid(s) => {}
            Some(s) => self.report(ViolationKind::InvalidFormat {
                format,
                found: s.to_owned(),
            }),
            None => self.wrong_type("string", value),
        }
    }

    fn check_integer(&mut self, min: Option<i64>, max: Option<i64>, value: &Value) {
        let Value::Number(raw) = value else {
            self.wrong_type("integer", value);
            return;
        };

        let exact = raw.as_i64().map(i128::from).or_else(|| raw.as_u64().map(i128::from));
        let number = match (exact, raw.as_f64()) {
            (Some(number), _) => number,
            (None, Some(float)) => match whole_number(float) {
                Some(number) => {
                    self.whole_floats.push((self.path.clone(), number));
                    number
                }
                None => {
                    self.wrong_type("integer", value);
                    return;
                }
            },
            (None, None) => {
                self.wrong_type("integer", value);
                return;
            }
        };

        let below = min.is_some_and(|min| number < i128::from(min));
        let above = max.is_some_and(|max| number > i128::from(max));

        if below || above {
            self.report(ViolationKind::OutOfRange {
                min,
                max,
                found: number.to_string(),
            });
        }
    }

    fn check_object(&mut self, fields: &[Field], value: &Value) {
        let Some(object) = value.as_object() else {
            self.wrong_type("object", value);
            return;
        };

        for field in fields {
            match object.get(field.name) {
                Some(member) => self.at_key(field.name, |checker| checker.check(&field.schema, member)),
                None if field.required => {
                    self.at_key(field.name, |checker| checker.report(ViolationKind::MissingField));
                }
                None => {}
            }
        }

        for key in object.keys() {
            if !fields.iter().any(|field| field.name == key) {
                self.at_key(key, |checker| checker.report(ViolationKind::UnknownField));
            }
        }
    }

    fn check_map(&mut self, values: &Schema, required: &[&str], value: &Value) {
        let Some(object) = value.as_object() else {
            self.wrong_type("object", value);
            return;
        };

        for &key in required {
            if !object.contains_key(key) {
                self.at_key(key, |checker| checker.report(ViolationKind::MissingField));
            }
        }

        for (key, member) in object {
            self.at_key(key, |checker| checker.check(values, member));
        }
    }

    fn check_union(&mut self, tag: &str, variants: &[(Value, Schema)], value: &Value) {
        let Some(object) = value.as_object() else {
            self.wrong_type("object", value);
            return;
        };

        let Some(discriminator) = object.get(tag) else {
            self.at_key(tag, |checker| checker.report(ViolationKind::MissingField));
            return;
        };

        match variants.iter().find(|(literal, _)| literal == discriminator) {
            Some((_, schema)) => self.check(schema, value),
            None => {
                let allowed: Vec<String> = variants.iter().map(|(literal, _)| render(literal)).collect();
                self.at_key(tag, |checker| {
                    checker.report(ViolationKind::NotAllowed {
                        allowed,
                        found: render(discriminator),
                    });
                });
            }
        }
    }
}
