use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ai::{AiConfig, ToolName};

/// Fully resolved application configuration
///
/// Produced by [`crate::resolve`]; every field is present and has passed
/// validation against the active gateway's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Prefix for cookies, storage keys and similar identifiers
    pub app_prefix: String,
    pub app_name: String,
    /// Browser tab title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_title: Option<String>,
    pub app_description: String,
    pub app_url: String,
    pub organization: Organization,
    pub services: Services,
    pub features: Features,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingConfig>,
    pub legal: Legal,
    pub policies: Policies,
    pub authentication: Authentication,
    pub ai: AiConfig,
    pub anonymous: AnonymousConfig,
    pub attachments: AttachmentsConfig,
}

impl ResolvedConfig {
    /// Browser tab title, falling back to the app name
    pub fn title(&self) -> &str {
        self.app_title.as_deref().unwrap_or(&self.app_name)
    }
}

// Top-level scalar defaults
pub const DEFAULT_APP_PREFIX: &str = "chatjs";
pub const DEFAULT_APP_NAME: &str = "My AI Chat";
pub const DEFAULT_APP_DESCRIPTION: &str = "AI chat powered by ChatJS";
pub const DEFAULT_APP_URL: &str = "https://your-domain.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub contact: OrganizationContact,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: "Your Organization".to_owned(),
            contact: OrganizationContact {
                privacy_email: "privacy@your-domain.com".to_owned(),
                legal_email: "legal@your-domain.com".to_owned(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationContact {
    pub privacy_email: String,
    pub legal_email: String,
}

/// Third parties named in the legal pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Services {
    pub hosting: String,
    pub ai_providers: Vec<String>,
    pub payment_processors: Vec<String>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            hosting: "Vercel".to_owned(),
            ai_providers: vec!["OpenAI".to_owned(), "Anthropic".to_owned(), "Google".to_owned()],
            payment_processors: Vec::new(),
        }
    }
}

/// Feature flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// File attachments (needs blob storage)
    pub attachments: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<FreePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro: Option<ProPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreePlan {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProPlan {
    pub name: String,
    pub monthly_price: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legal {
    pub minimum_age: u32,
    pub governing_law: String,
    pub refund_policy: String,
}

impl Default for Legal {
    fn default() -> Self {
        Self {
            minimum_age: 13,
            governing_law: "United States".to_owned(),
            refund_policy: "no-refunds".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policies {
    pub privacy: Policy,
    pub terms: Policy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            privacy: Policy::titled("Privacy Policy"),
            terms: Policy::titled("Terms of Service"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Policy {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            last_updated: None,
        }
    }
}

/// OAuth providers offered on the sign-in page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    pub google: bool,
    pub github: bool,
    pub vercel: bool,
}

impl Default for Authentication {
    fn default() -> Self {
        Self {
            google: false,
            github: true,
            vercel: false,
        }
    }
}

/// Limits for users who have not signed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousConfig {
    /// Message credits
    pub credits: u32,
    pub available_tools: Vec<ToolName>,
    pub rate_limit: AnonymousRateLimit,
}

impl Default for AnonymousConfig {
    fn default() -> Self {
        Self {
            credits: 10,
            available_tools: Vec::new(),
            rate_limit: AnonymousRateLimit {
                requests_per_minute: 5,
                requests_per_month: 10,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousRateLimit {
    pub requests_per_minute: u32,
    pub requests_per_month: u32,
}

/// MIME types every attachment policy must list
pub const REQUIRED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "application/pdf"];

/// Upload policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentsConfig {
    /// Max file size in bytes after compression
    pub max_bytes: u64,
    /// Max image edge in pixels
    pub max_dimension: u32,
    /// Accepted MIME types and their file extensions
    pub accepted_types: IndexMap<String, Vec<String>>,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        let accepted_types = [
            ("image/png", &[".png"][..]),
            ("image/jpeg", &[".jpg", ".jpeg"][..]),
            ("application/pdf", &[".pdf"][..]),
        ]
        .into_iter()
        .map(|(mime, extensions)| {
            (
                mime.to_owned(),
                extensions.iter().map(|&ext| ext.to_owned()).collect(),
            )
        })
        .collect();

        Self {
            max_bytes: 1024 * 1024,
            max_dimension: 2048,
            accepted_types,
        }
    }
}
