use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

/// Line prefixes that mark a comment in the supported input formats
const COMMENT_PREFIXES: &[&str] = &["#", "//"];

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw configuration text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are passed through unchanged.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        let trimmed = line.trim_start();
        if COMMENT_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let (Some(overall), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let fallback = captures.get(2).map(|m| m.as_str());

            output.push_str(&line[last_end..overall.start()]);

            let var_name = match key.as_str().split_once('.') {
                Some(("env", name)) if !name.contains('.') => name,
                _ => return Err(ExpandError::UnsupportedScope(key.as_str().to_owned())),
            };

            match (std::env::var(var_name), fallback) {
                (Ok(value), _) => output.push_str(&value),
                (Err(_), Some(default)) => output.push_str(default),
                (Err(_), None) => return Err(ExpandError::MissingVar(var_name.to_owned())),
            }

            last_end = overall.end();
        }

        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
