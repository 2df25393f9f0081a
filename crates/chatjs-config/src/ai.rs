use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr, VariantNames};

use crate::registry::Gateway;

/// Resolved `ai` section, discriminated by gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gateway", rename_all = "kebab-case")]
pub enum AiConfig {
    Vercel(AiSettings),
    Openrouter(AiSettings),
    Openai(AiSettings),
    OpenaiCompatible(AiSettings),
}

impl AiConfig {
    /// Pair a gateway with its settings
    pub const fn new(gateway: Gateway, settings: AiSettings) -> Self {
        match gateway {
            Gateway::Vercel => Self::Vercel(settings),
            Gateway::Openrouter => Self::Openrouter(settings),
            Gateway::Openai => Self::Openai(settings),
            Gateway::OpenaiCompatible => Self::OpenaiCompatible(settings),
        }
    }

    /// Active gateway
    pub const fn gateway(&self) -> Gateway {
        match self {
            Self::Vercel(_) => Gateway::Vercel,
            Self::Openrouter(_) => Gateway::Openrouter,
            Self::Openai(_) => Gateway::Openai,
            Self::OpenaiCompatible(_) => Gateway::OpenaiCompatible,
        }
    }

    /// Settings of the active gateway
    pub const fn settings(&self) -> &AiSettings {
        match self {
            Self::Vercel(settings)
            | Self::Openrouter(settings)
            | Self::Openai(settings)
            | Self::OpenaiCompatible(settings) => settings,
        }
    }
}

/// Model selection and tool settings for one gateway
///
/// The same shape serves as the per-gateway default record and as the
/// resolved payload of [`AiConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    /// Provider sort order in the model selector
    pub provider_order: Vec<String>,
    /// Models hidden from all users
    pub disabled_models: Vec<String>,
    /// Models enabled for new users
    pub curated_defaults: Vec<String>,
    /// Models available without signing in
    pub anonymous_models: Vec<String>,
    pub workflows: Workflows,
    pub tools: ToolsConfig,
}

/// Default record of one gateway
pub type GatewayDefaults = AiSettings;

/// Models backing the app's built-in workflows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflows {
    pub chat: String,
    pub title: String,
    pub pdf: String,
    pub chat_image_compatible: String,
}

/// Per-tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    pub web_search: ToolToggle,
    pub url_retrieval: ToolToggle,
    pub code_execution: ToolToggle,
    pub mcp: ToolToggle,
    pub followup_suggestions: FollowupSuggestionsTool,
    pub text: TextTool,
    pub sheet: SheetTool,
    pub code: CodeTool,
    pub image: MediaTool,
    pub video: MediaTool,
    pub deep_research: DeepResearchTool,
}

/// Tool that is only switched on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolToggle {
    pub enabled: bool,
}

impl ToolToggle {
    pub const OFF: Self = Self { enabled: false };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupSuggestionsTool {
    pub enabled: bool,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTool {
    pub polish: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTool {
    pub format: String,
    pub analyze: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTool {
    pub edits: String,
}

/// Image or video generation tool
///
/// An enabled tool always carries its default model; a disabled one may
/// keep a model around for when it is switched back on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MediaToolRepr", into = "MediaToolRepr")]
pub enum MediaTool {
    Enabled { default: String },
    Disabled { default: Option<String> },
}

impl MediaTool {
    pub const OFF: Self = Self::Disabled { default: None };

    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    /// Configured model, if any
    pub fn default_model(&self) -> Option<&str> {
        match self {
            Self::Enabled { default } => Some(default),
            Self::Disabled { default } => default.as_deref(),
        }
    }
}

/// Wire form of [`MediaTool`]: `{ "enabled": bool, "default"?: string }`
#[derive(Serialize, Deserialize)]
struct MediaToolRepr {
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

impl TryFrom<MediaToolRepr> for MediaTool {
    type Error = &'static str;

    fn try_from(repr: MediaToolRepr) -> Result<Self, Self::Error> {
        match (repr.enabled, repr.default) {
            (true, Some(default)) => Ok(Self::Enabled { default }),
            (true, None) => Err("an enabled media tool requires a default model"),
            (false, default) => Ok(Self::Disabled { default }),
        }
    }
}

impl From<MediaTool> for MediaToolRepr {
    fn from(tool: MediaTool) -> Self {
        match tool {
            MediaTool::Enabled { default } => Self {
                enabled: true,
                default: Some(default),
            },
            MediaTool::Disabled { default } => Self { enabled: false, default },
        }
    }
}

/// Multi-step research agent settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepResearchTool {
    pub enabled: bool,
    pub default_model: String,
    pub final_report_model: String,
    /// Ask clarifying questions before starting research
    pub allow_clarification: bool,
    /// Supervisor loop iterations, 1..=10
    pub max_researcher_iterations: u32,
    /// Topics researched in parallel per iteration, 1..=20
    pub max_concurrent_research_units: u32,
    /// Search queries per research topic, 1..=10
    pub max_search_queries: u32,
}

/// Tool names, as referenced from the anonymous-user policy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ToolName {
    WebSearch,
    UrlRetrieval,
    CodeExecution,
    Mcp,
    FollowupSuggestions,
    Text,
    Sheet,
    Code,
    Image,
    Video,
    DeepResearch,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn media_tool_wire_forms() {
        let enabled: MediaTool = serde_json::from_value(json!({ "enabled": true, "default": "gpt-image-1" })).unwrap();
        assert_eq!(
            enabled,
            MediaTool::Enabled {
                default: "gpt-image-1".to_owned()
            }
        );

        let disabled: MediaTool = serde_json::from_value(json!({ "enabled": false })).unwrap();
        assert_eq!(disabled, MediaTool::OFF);
        assert_eq!(serde_json::to_value(&disabled).unwrap(), json!({ "enabled": false }));

        let parked: MediaTool = serde_json::from_value(json!({ "enabled": false, "default": "sora-2" })).unwrap();
        assert!(!parked.is_enabled());
        assert_eq!(parked.default_model(), Some("sora-2"));
    }

    #[test]
    fn enabled_media_tool_without_model_is_rejected() {
        let err = serde_json::from_value::<MediaTool>(json!({ "enabled": true })).unwrap_err();
        assert!(err.to_string().contains("requires a default model"));
    }

    #[test]
    fn tool_names_are_camel_case() {
        let names: Vec<&str> = ToolName::iter().map(Into::into).collect();
        assert_eq!(names.first(), Some(&"webSearch"));
        assert_eq!(names.last(), Some(&"deepResearch"));
        assert_eq!(ToolName::VARIANTS, names.as_slice());
        assert_eq!(serde_json::to_value(ToolName::UrlRetrieval).unwrap(), json!("urlRetrieval"));
    }

    #[test]
    fn ai_config_round_trips_through_gateway_tag() {
        let settings = crate::defaults::defaults_for(Gateway::OpenaiCompatible).clone();
        let config = AiConfig::new(Gateway::OpenaiCompatible, settings.clone());

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["gateway"], "openai-compatible");
        assert_eq!(value["workflows"]["chat"], "gpt-5-mini");

        let parsed: AiConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.gateway(), Gateway::OpenaiCompatible);
        assert_eq!(parsed.settings(), &settings);
    }
}
