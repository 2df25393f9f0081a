//! Default table
//!
//! One complete [`GatewayDefaults`] record per gateway, each authored on
//! its own since the gateways' catalogs do not overlap, plus the defaults
//! of the top-level application groups.

use std::sync::LazyLock;

use serde_json::{Map, Value};

use crate::ai::{
    AiSettings, CodeTool, DeepResearchTool, FollowupSuggestionsTool, GatewayDefaults, MediaTool, SheetTool, TextTool,
    ToolToggle, ToolsConfig, Workflows,
};
use crate::app::{
    AnonymousConfig, AttachmentsConfig, Authentication, DEFAULT_APP_DESCRIPTION, DEFAULT_APP_NAME,
    DEFAULT_APP_PREFIX, DEFAULT_APP_URL, Features, Legal, Organization, Policies, Services,
};
use crate::registry::{Gateway, GatewayTable};

static DEFAULTS: LazyLock<GatewayTable<GatewayDefaults>> = LazyLock::new(|| GatewayTable {
    vercel: vercel(),
    openrouter: openrouter(),
    openai: openai(),
    openai_compatible: openai_compatible(),
});

/// Default record for `gateway`
pub fn defaults_for(gateway: Gateway) -> &'static GatewayDefaults {
    DEFAULTS.get(gateway)
}

/// Every gateway's default record
pub fn default_table() -> &'static GatewayTable<GatewayDefaults> {
    &DEFAULTS
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|&id| id.to_owned()).collect()
}

/// Deep-research limits shared by the shipped defaults
fn deep_research(default_model: &str, final_report_model: &str) -> DeepResearchTool {
    DeepResearchTool {
        enabled: false,
        default_model: default_model.to_owned(),
        final_report_model: final_report_model.to_owned(),
        allow_clarification: true,
        max_researcher_iterations: 1,
        max_concurrent_research_units: 2,
        max_search_queries: 2,
    }
}

fn vercel() -> GatewayDefaults {
    AiSettings {
        provider_order: strings(&["openai", "google", "anthropic"]),
        disabled_models: Vec::new(),
        curated_defaults: strings(&[
            "openai/gpt-5-nano",
            "openai/gpt-5-mini",
            "openai/gpt-5.2",
            "openai/gpt-5.2-chat",
            "google/gemini-2.5-flash-lite",
            "google/gemini-3-flash",
            "google/gemini-3-pro-preview",
            "anthropic/claude-sonnet-4.5",
            "anthropic/claude-opus-4.5",
            "xai/grok-4",
        ]),
        anonymous_models: strings(&["google/gemini-2.5-flash-lite", "openai/gpt-5-nano"]),
        workflows: Workflows {
            chat: "openai/gpt-5-mini".to_owned(),
            title: "openai/gpt-5-nano".to_owned(),
            pdf: "openai/gpt-5-mini".to_owned(),
            chat_image_compatible: "openai/gpt-4o-mini".to_owned(),
        },
        tools: ToolsConfig {
            web_search: ToolToggle::OFF,
            url_retrieval: ToolToggle::OFF,
            code_execution: ToolToggle::OFF,
            mcp: ToolToggle::OFF,
            followup_suggestions: FollowupSuggestionsTool {
                enabled: false,
                default: "google/gemini-2.5-flash-lite".to_owned(),
            },
            text: TextTool {
                polish: "openai/gpt-5-mini".to_owned(),
            },
            sheet: SheetTool {
                format: "openai/gpt-5-mini".to_owned(),
                analyze: "openai/gpt-5-mini".to_owned(),
            },
            code: CodeTool {
                edits: "openai/gpt-5-mini".to_owned(),
            },
            image: MediaTool::Disabled {
                default: Some("google/gemini-3-pro-image".to_owned()),
            },
            video: MediaTool::Disabled {
                default: Some("xai/grok-imagine-video".to_owned()),
            },
            deep_research: deep_research("google/gemini-2.5-flash-lite", "google/gemini-3-flash"),
        },
    }
}

fn openrouter() -> GatewayDefaults {
    AiSettings {
        provider_order: strings(&["openai", "google", "anthropic"]),
        disabled_models: Vec::new(),
        curated_defaults: strings(&[
            "openai/gpt-5-nano",
            "openai/gpt-5-mini",
            "openai/gpt-5.2",
            "openai/gpt-5.2-chat",
            "google/gemini-2.5-flash-lite",
            "google/gemini-3-flash",
            "google/gemini-3-pro-preview",
            "anthropic/claude-sonnet-4.5",
            "anthropic/claude-opus-4.5",
            "xai/grok-4",
        ]),
        anonymous_models: strings(&["google/gemini-2.5-flash-lite", "openai/gpt-5-nano"]),
        workflows: Workflows {
            chat: "openai/gpt-5-mini".to_owned(),
            title: "openai/gpt-5-nano".to_owned(),
            pdf: "openai/gpt-5-mini".to_owned(),
            chat_image_compatible: "openai/gpt-4o-mini".to_owned(),
        },
        tools: ToolsConfig {
            web_search: ToolToggle::OFF,
            url_retrieval: ToolToggle::OFF,
            code_execution: ToolToggle::OFF,
            mcp: ToolToggle::OFF,
            followup_suggestions: FollowupSuggestionsTool {
                enabled: false,
                default: "google/gemini-2.5-flash-lite".to_owned(),
            },
            text: TextTool {
                polish: "openai/gpt-5-mini".to_owned(),
            },
            sheet: SheetTool {
                format: "openai/gpt-5-mini".to_owned(),
                analyze: "openai/gpt-5-mini".to_owned(),
            },
            code: CodeTool {
                edits: "openai/gpt-5-mini".to_owned(),
            },
            // no image or video models behind this gateway
            image: MediaTool::OFF,
            video: MediaTool::OFF,
            deep_research: deep_research("google/gemini-2.5-flash-lite", "google/gemini-3-flash"),
        },
    }
}

fn openai() -> GatewayDefaults {
    AiSettings {
        provider_order: strings(&["openai"]),
        disabled_models: Vec::new(),
        curated_defaults: strings(&["gpt-5-nano", "gpt-5-mini", "gpt-5.2", "gpt-5.2-chat-latest"]),
        anonymous_models: strings(&["gpt-5-nano"]),
        workflows: Workflows {
            chat: "gpt-5-mini".to_owned(),
            title: "gpt-5-nano".to_owned(),
            pdf: "gpt-5-mini".to_owned(),
            chat_image_compatible: "gpt-4o-mini".to_owned(),
        },
        tools: ToolsConfig {
            web_search: ToolToggle::OFF,
            url_retrieval: ToolToggle::OFF,
            code_execution: ToolToggle::OFF,
            mcp: ToolToggle::OFF,
            followup_suggestions: FollowupSuggestionsTool {
                enabled: false,
                default: "gpt-5-nano".to_owned(),
            },
            text: TextTool {
                polish: "gpt-5-mini".to_owned(),
            },
            sheet: SheetTool {
                format: "gpt-5-mini".to_owned(),
                analyze: "gpt-5-mini".to_owned(),
            },
            code: CodeTool {
                edits: "gpt-5-mini".to_owned(),
            },
            image: MediaTool::OFF,
            video: MediaTool::OFF,
            deep_research: deep_research("gpt-5-nano", "gpt-5-mini"),
        },
    }
}

fn openai_compatible() -> GatewayDefaults {
    AiSettings {
        provider_order: strings(&["openai"]),
        disabled_models: Vec::new(),
        curated_defaults: strings(&["gpt-5-nano", "gpt-5-mini", "gpt-5.2", "gpt-5.2-chat-latest"]),
        anonymous_models: strings(&["gpt-5-nano"]),
        workflows: Workflows {
            chat: "gpt-5-mini".to_owned(),
            title: "gpt-5-nano".to_owned(),
            pdf: "gpt-5-mini".to_owned(),
            chat_image_compatible: "gpt-4o-mini".to_owned(),
        },
        tools: ToolsConfig {
            web_search: ToolToggle::OFF,
            url_retrieval: ToolToggle::OFF,
            code_execution: ToolToggle::OFF,
            mcp: ToolToggle::OFF,
            followup_suggestions: FollowupSuggestionsTool {
                enabled: false,
                default: "gpt-5-nano".to_owned(),
            },
            text: TextTool {
                polish: "gpt-5-mini".to_owned(),
            },
            sheet: SheetTool {
                format: "gpt-5-mini".to_owned(),
                analyze: "gpt-5-mini".to_owned(),
            },
            code: CodeTool {
                edits: "gpt-5-mini".to_owned(),
            },
            image: MediaTool::OFF,
            video: MediaTool::OFF,
            deep_research: deep_research("gpt-5-nano", "gpt-5-mini"),
        },
    }
}

/// Defaults for every top-level key except `ai`
///
/// `appTitle` and `pricing` have no default and are left out.
///
/// # Errors
///
/// Returns an error if a default group fails to serialize
pub fn app_defaults() -> Result<Map<String, Value>, serde_json::Error> {
    let mut map = Map::new();

    map.insert("appPrefix".to_owned(), Value::from(DEFAULT_APP_PREFIX));
    map.insert("appName".to_owned(), Value::from(DEFAULT_APP_NAME));
    map.insert("appDescription".to_owned(), Value::from(DEFAULT_APP_DESCRIPTION));
    map.insert("appUrl".to_owned(), Value::from(DEFAULT_APP_URL));
    map.insert("organization".to_owned(), serde_json::to_value(Organization::default())?);
    map.insert("services".to_owned(), serde_json::to_value(Services::default())?);
    map.insert("features".to_owned(), serde_json::to_value(Features::default())?);
    map.insert("legal".to_owned(), serde_json::to_value(Legal::default())?);
    map.insert("policies".to_owned(), serde_json::to_value(Policies::default())?);
    map.insert("authentication".to_owned(), serde_json::to_value(Authentication::default())?);
    map.insert("anonymous".to_owned(), serde_json::to_value(AnonymousConfig::default())?);
    map.insert("attachments".to_owned(), serde_json::to_value(AttachmentsConfig::default())?);

    Ok(map)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::registry::Capability;

    #[test]
    fn every_default_model_belongs_to_its_gateway() {
        for gateway in Gateway::iter() {
            let defaults = defaults_for(gateway);
            let chat = gateway.models(Capability::Chat);

            let workflows = &defaults.workflows;
            for id in [
                &workflows.chat,
                &workflows.title,
                &workflows.pdf,
                &workflows.chat_image_compatible,
            ] {
                assert!(chat.contains(id), "{gateway}: workflow model {id}");
            }

            for id in defaults.curated_defaults.iter().chain(&defaults.anonymous_models) {
                assert!(chat.contains(id), "{gateway}: listed model {id}");
            }

            if let Some(id) = defaults.tools.image.default_model() {
                assert!(gateway.models(Capability::Image).contains(id), "{gateway}: image {id}");
            }
            if let Some(id) = defaults.tools.video.default_model() {
                assert!(gateway.models(Capability::Video).contains(id), "{gateway}: video {id}");
            }
        }
    }

    #[test]
    fn media_tools_ship_disabled() {
        for (gateway, defaults) in default_table().iter() {
            assert!(!defaults.tools.image.is_enabled(), "{gateway}");
            assert!(!defaults.tools.video.is_enabled(), "{gateway}");
        }
    }

    #[test]
    fn empty_capability_has_no_default_model() {
        for gateway in Gateway::iter() {
            let tools = &defaults_for(gateway).tools;
            if gateway.models(Capability::Image).is_empty() {
                assert_eq!(tools.image, MediaTool::OFF, "{gateway}");
            }
            if gateway.models(Capability::Video).is_empty() {
                assert_eq!(tools.video, MediaTool::OFF, "{gateway}");
            }
        }
    }

    #[test]
    fn provider_order_is_per_gateway() {
        assert_eq!(defaults_for(Gateway::Vercel).provider_order, ["openai", "google", "anthropic"]);
        assert_eq!(defaults_for(Gateway::Openai).provider_order, ["openai"]);
    }

    #[test]
    fn app_defaults_cover_every_group() {
        let map = app_defaults().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "appPrefix",
                "appName",
                "appDescription",
                "appUrl",
                "organization",
                "services",
                "features",
                "legal",
                "policies",
                "authentication",
                "anonymous",
                "attachments",
            ]
        );
        assert!(!map.contains_key("appTitle"));
        assert!(!map.contains_key("pricing"));
        assert_eq!(map["attachments"]["acceptedTypes"]["image/jpeg"], serde_json::json!([".jpg", ".jpeg"]));
    }
}
