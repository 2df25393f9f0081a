//! Gateway type registry
//!
//! The closed set of supported gateways and, per gateway, the model
//! identifiers it can serve for each capability. Pure data.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Gateway used when the input does not name one
pub const DEFAULT_GATEWAY: Gateway = Gateway::Vercel;

/// Supported AI gateways
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Gateway {
    /// Vercel AI Gateway
    Vercel,
    /// `OpenRouter` aggregator
    Openrouter,
    /// `OpenAI` platform API
    Openai,
    /// Any endpoint speaking the `OpenAI` protocol
    OpenaiCompatible,
}

impl Gateway {
    /// Wire name of the gateway (`openai-compatible`, ...)
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Identifier space for one capability of this gateway
    pub fn models(self, capability: Capability) -> &'static ModelSpace {
        catalog(self).space(capability)
    }
}

/// Model capability classes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Chat,
    Image,
    Video,
}

/// Set of valid model identifiers for a `(gateway, capability)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSpace {
    /// Exactly these identifiers; empty means the capability is unavailable
    Closed(&'static [&'static str]),
    /// Any non-empty identifier; the deployment decides what exists
    Open,
}

impl ModelSpace {
    /// Whether `id` belongs to this space
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::Closed(ids) => ids.contains(&id),
            Self::Open => !id.trim().is_empty(),
        }
    }

    /// Whether no identifier can ever be valid
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Closed(ids) if ids.is_empty())
    }

    /// Known identifiers, `None` for an open space
    pub const fn ids(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Closed(ids) => Some(*ids),
            Self::Open => None,
        }
    }
}

/// Identifier spaces of one gateway
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog {
    pub chat: ModelSpace,
    pub image: ModelSpace,
    pub video: ModelSpace,
}

impl ModelCatalog {
    /// Space for the given capability
    pub const fn space(&self, capability: Capability) -> &ModelSpace {
        match capability {
            Capability::Chat => &self.chat,
            Capability::Image => &self.image,
            Capability::Video => &self.video,
        }
    }
}

/// One value per gateway
///
/// Every gateway is a named field, so a new [`Gateway`] variant does not
/// compile until each table in the crate has an entry for it.
#[derive(Debug, Clone)]
pub struct GatewayTable<T> {
    pub vercel: T,
    pub openrouter: T,
    pub openai: T,
    pub openai_compatible: T,
}

impl<T> GatewayTable<T> {
    /// Build a table by evaluating `f` once for each gateway
    pub fn from_fn(mut f: impl FnMut(Gateway) -> T) -> Self {
        Self {
            vercel: f(Gateway::Vercel),
            openrouter: f(Gateway::Openrouter),
            openai: f(Gateway::Openai),
            openai_compatible: f(Gateway::OpenaiCompatible),
        }
    }

    /// Entry for `gateway`
    pub const fn get(&self, gateway: Gateway) -> &T {
        match gateway {
            Gateway::Vercel => &self.vercel,
            Gateway::Openrouter => &self.openrouter,
            Gateway::Openai => &self.openai,
            Gateway::OpenaiCompatible => &self.openai_compatible,
        }
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Gateway, &T)> {
        [
            (Gateway::Vercel, &self.vercel),
            (Gateway::Openrouter, &self.openrouter),
            (Gateway::Openai, &self.openai),
            (Gateway::OpenaiCompatible, &self.openai_compatible),
        ]
        .into_iter()
    }
}

const VERCEL_CHAT: &[&str] = &[
    "openai/gpt-5-nano",
    "openai/gpt-5-mini",
    "openai/gpt-5",
    "openai/gpt-5.2",
    "openai/gpt-5.2-chat",
    "openai/gpt-4.1",
    "openai/gpt-4.1-mini",
    "openai/gpt-4o",
    "openai/gpt-4o-mini",
    "openai/o3",
    "openai/o4-mini",
    "google/gemini-2.5-flash-lite",
    "google/gemini-2.5-flash",
    "google/gemini-2.5-pro",
    "google/gemini-3-flash",
    "google/gemini-3-pro-preview",
    "anthropic/claude-haiku-4.5",
    "anthropic/claude-sonnet-4.5",
    "anthropic/claude-opus-4.5",
    "xai/grok-4",
    "xai/grok-4-fast-reasoning",
    "meta/llama-4-maverick",
    "mistral/mistral-large",
    "deepseek/deepseek-v3.2",
    "alibaba/qwen3-max",
    "moonshotai/kimi-k2",
    "perplexity/sonar-pro",
];

const VERCEL_IMAGE: &[&str] = &[
    "google/gemini-3-pro-image",
    "google/gemini-2.5-flash-image",
    "openai/gpt-image-1",
    "bfl/flux-pro-1.1",
];

const VERCEL_VIDEO: &[&str] = &["xai/grok-imagine-video", "google/veo-3.1-generate-001"];

const OPENROUTER_CHAT: &[&str] = &[
    "openai/gpt-5-nano",
    "openai/gpt-5-mini",
    "openai/gpt-5",
    "openai/gpt-5.2",
    "openai/gpt-5.2-chat",
    "openai/gpt-4o-mini",
    "google/gemini-2.5-flash-lite",
    "google/gemini-2.5-flash",
    "google/gemini-2.5-pro",
    "google/gemini-3-flash",
    "google/gemini-3-pro-preview",
    "anthropic/claude-haiku-4.5",
    "anthropic/claude-sonnet-4.5",
    "anthropic/claude-opus-4.5",
    "xai/grok-4",
    "meta-llama/llama-4-maverick",
    "mistralai/mistral-large",
    "deepseek/deepseek-v3.2",
    "qwen/qwen3-max",
];

const OPENAI_CHAT: &[&str] = &[
    "gpt-5-nano",
    "gpt-5-mini",
    "gpt-5",
    "gpt-5.2",
    "gpt-5.2-chat-latest",
    "gpt-4.1",
    "gpt-4.1-mini",
    "gpt-4.1-nano",
    "gpt-4o",
    "gpt-4o-mini",
    "o3",
    "o4-mini",
];

const OPENAI_IMAGE: &[&str] = &["gpt-image-1", "gpt-image-1-mini", "dall-e-3"];

const OPENAI_VIDEO: &[&str] = &["sora-2", "sora-2-pro"];

const NONE: &[&str] = &[];

static CATALOGS: GatewayTable<ModelCatalog> = GatewayTable {
    vercel: ModelCatalog {
        chat: ModelSpace::Closed(VERCEL_CHAT),
        image: ModelSpace::Closed(VERCEL_IMAGE),
        video: ModelSpace::Closed(VERCEL_VIDEO),
    },
    openrouter: ModelCatalog {
        chat: ModelSpace::Closed(OPENROUTER_CHAT),
        image: ModelSpace::Closed(NONE),
        video: ModelSpace::Closed(NONE),
    },
    openai: ModelCatalog {
        chat: ModelSpace::Closed(OPENAI_CHAT),
        image: ModelSpace::Closed(OPENAI_IMAGE),
        video: ModelSpace::Closed(OPENAI_VIDEO),
    },
    openai_compatible: ModelCatalog {
        chat: ModelSpace::Open,
        image: ModelSpace::Closed(NONE),
        video: ModelSpace::Closed(NONE),
    },
};

/// Identifier spaces of every capability for `gateway`
pub fn catalog(gateway: Gateway) -> &'static ModelCatalog {
    CATALOGS.get(gateway)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn gateway_wire_names() {
        let names: Vec<&str> = Gateway::iter().map(Gateway::as_str).collect();
        assert_eq!(names, ["vercel", "openrouter", "openai", "openai-compatible"]);
        assert_eq!(Gateway::VARIANTS, names.as_slice());
    }

    #[test]
    fn gateway_parses_from_wire_name() {
        assert_eq!(Gateway::from_str("openai-compatible").unwrap(), Gateway::OpenaiCompatible);
        assert!(Gateway::from_str("anthropic").is_err());
        assert!(Gateway::from_str("OpenAI").is_err());
    }

    #[test]
    fn gateway_serde_matches_strum() {
        let json = serde_json::to_string(&Gateway::OpenaiCompatible).unwrap();
        assert_eq!(json, "\"openai-compatible\"");
        let parsed: Gateway = serde_json::from_str("\"openrouter\"").unwrap();
        assert_eq!(parsed, Gateway::Openrouter);
    }

    #[test]
    fn every_gateway_serves_chat() {
        for gateway in Gateway::iter() {
            assert!(!gateway.models(Capability::Chat).is_empty(), "{gateway} has no chat models");
        }
    }

    #[test]
    fn spaces_are_disjoint_between_prefixed_and_bare_ids() {
        assert!(Gateway::Vercel.models(Capability::Chat).contains("openai/gpt-5-mini"));
        assert!(!Gateway::Vercel.models(Capability::Chat).contains("gpt-5-mini"));
        assert!(Gateway::Openai.models(Capability::Chat).contains("gpt-5-mini"));
        assert!(!Gateway::Openai.models(Capability::Chat).contains("openai/gpt-5-mini"));
    }

    #[test]
    fn empty_media_spaces() {
        assert!(Gateway::Openrouter.models(Capability::Image).is_empty());
        assert!(Gateway::Openrouter.models(Capability::Video).is_empty());
        assert!(Gateway::OpenaiCompatible.models(Capability::Image).is_empty());
        assert!(!Gateway::Openai.models(Capability::Image).is_empty());
        assert!(!Gateway::Vercel.models(Capability::Video).is_empty());
    }

    #[test]
    fn open_space_accepts_any_non_blank_id() {
        let space = Gateway::OpenaiCompatible.models(Capability::Chat);
        assert!(space.contains("llama3.1:8b"));
        assert!(!space.contains("  "));
        assert!(space.ids().is_none());
    }

    #[test]
    fn table_lookup_and_iteration_agree() {
        let table = GatewayTable::from_fn(Gateway::as_str);
        for (gateway, name) in table.iter() {
            assert_eq!(table.get(gateway), name);
            assert_eq!(gateway.as_str(), *name);
        }
        assert_eq!(table.iter().count(), Gateway::iter().count());
    }
}
