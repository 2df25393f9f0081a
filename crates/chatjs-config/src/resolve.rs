//! Validation and resolution entry points

use std::sync::OnceLock;

use serde_json::Value;
use strum::IntoEnumIterator;

use crate::ai::AiConfig;
use crate::app::ResolvedConfig;
use crate::defaults::defaults_for;
use crate::error::{FieldPath, ResolveError, ValidationFailure, ViolationKind};
use crate::merge::{gateway_of, merge};
use crate::registry::Gateway;
use crate::schema::{config_schema, schema_for};

static RESOLVED: OnceLock<ResolvedConfig> = OnceLock::new();

/// Validate a merged configuration and convert it to its typed form
///
/// Every violation is collected before failing. The gateway is checked
/// first so an unknown gateway is never reported as a schema mismatch.
/// Integer fields written as whole floats (`2.0`) are normalized.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownGateway`] or [`ResolveError::Validation`]
pub fn validate(mut merged: Value) -> Result<ResolvedConfig, ResolveError> {
    let gateway = gateway_of(&merged)?;
    config_schema().normalize(&mut merged)?;

    let config: ResolvedConfig = serde_json::from_value(merged).map_err(|e| {
        ValidationFailure::single(FieldPath::root(), ViolationKind::Malformed { message: e.to_string() })
    })?;

    tracing::debug!(%gateway, "configuration validated");
    Ok(config)
}

/// Resolve a raw, partial input into a complete configuration
///
/// # Errors
///
/// Returns an error if the input selects an unknown gateway or the merged
/// result violates the gateway's schema
pub fn resolve(input: &Value) -> Result<ResolvedConfig, ResolveError> {
    let merged = merge(input)?;
    let config = validate(merged)?;

    tracing::debug!(gateway = %config.ai.gateway(), app = %config.app_name, "configuration resolved");
    Ok(config)
}

/// Check every built-in default record against its own gateway's schema
///
/// # Errors
///
/// Returns [`ResolveError::IncompleteDefaults`] for the first gateway whose
/// record does not validate
pub fn verify_defaults() -> Result<(), ResolveError> {
    for gateway in Gateway::iter() {
        let ai = serde_json::to_value(AiConfig::new(gateway, defaults_for(gateway).clone()))?;

        if let Err(failure) = schema_for(gateway).check(&ai) {
            tracing::error!(%gateway, violations = failure.violations().len(), "built-in defaults are invalid");
            return Err(ResolveError::IncompleteDefaults { gateway, failure });
        }
    }

    Ok(())
}

/// Resolve `input` once and keep it for the rest of the process
///
/// # Errors
///
/// Returns [`ResolveError::AlreadyInitialized`] if called more than once,
/// or any error from [`verify_defaults`] and [`resolve`]
pub fn init(input: &Value) -> Result<&'static ResolvedConfig, ResolveError> {
    if RESOLVED.get().is_some() {
        return Err(ResolveError::AlreadyInitialized);
    }

    verify_defaults()?;
    let config = resolve(input)?;

    RESOLVED.set(config).map_err(|_| ResolveError::AlreadyInitialized)?;
    RESOLVED.get().ok_or(ResolveError::AlreadyInitialized)
}

/// Configuration stored by [`init`], if any
pub fn global() -> Option<&'static ResolvedConfig> {
    RESOLVED.get()
}
