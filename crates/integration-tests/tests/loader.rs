mod harness;

use chatjs_config::{Gateway, ResolveError, ResolvedConfig, load_input};
use harness::files::config_file;
use indoc::indoc;

#[test]
fn toml_config_with_environment_switches() {
    let file = config_file(
        ".toml",
        indoc! {r#"
            appPrefix = "acme"
            appName = "Acme Chat"
            appUrl = "{{ env.ACME_APP_URL | default("http://localhost:3000") }}"

            [ai]
            gateway = "openai"
            curatedDefaults = ["gpt-5-nano", "gpt-5-mini"]

            [ai.tools.image]
            enabled = true
            default = "gpt-image-1"

            [ai.tools.deepResearch]
            maxSearchQueries = {{ env.ACME_SEARCH_QUERIES | default("2") }}
        "#},
    );

    temp_env::with_vars(
        [
            ("ACME_APP_URL", Some("https://chat.acme.dev")),
            ("ACME_SEARCH_QUERIES", Some("5")),
        ],
        || {
            let config = ResolvedConfig::load(file.path()).unwrap();
            let ai = config.ai.settings();

            assert_eq!(config.app_url, "https://chat.acme.dev");
            assert_eq!(config.ai.gateway(), Gateway::Openai);
            assert_eq!(ai.curated_defaults, ["gpt-5-nano", "gpt-5-mini"]);
            assert_eq!(ai.tools.image.default_model(), Some("gpt-image-1"));
            assert_eq!(ai.tools.deep_research.max_search_queries, 5);
            assert_eq!(ai.tools.deep_research.max_researcher_iterations, 1);
        },
    );
}

#[test]
fn environment_fallbacks_apply_when_unset() {
    let file = config_file(
        ".toml",
        indoc! {r#"
            appUrl = "{{ env.ACME_APP_URL | default("http://localhost:3000") }}"
        "#},
    );

    temp_env::with_var_unset("ACME_APP_URL", || {
        let config = ResolvedConfig::load(file.path()).unwrap();
        assert_eq!(config.app_url, "http://localhost:3000");
        assert_eq!(config.ai.gateway(), Gateway::Vercel);
    });
}

#[test]
fn json_config_loads_raw_input() {
    let file = config_file(
        ".json",
        indoc! {r#"
            {
              "ai": { "gateway": "openai-compatible", "workflows": { "chat": "llama-3.3-70b" } }
            }
        "#},
    );

    let input = load_input(file.path()).unwrap();
    assert_eq!(input["ai"]["gateway"], "openai-compatible");

    let config = ResolvedConfig::load(file.path()).unwrap();
    assert_eq!(config.ai.settings().workflows.chat, "llama-3.3-70b");
}

#[test]
fn invalid_file_reports_violations() -> anyhow::Result<()> {
    let file = config_file(
        ".toml",
        indoc! {r#"
            [ai]
            gateway = "openrouter"

            [ai.tools.image]
            enabled = true
            default = "openai/gpt-image-1"
        "#},
    );

    let err = ResolvedConfig::load(file.path()).unwrap_err();
    let Some(ResolveError::Validation(failure)) = err.downcast_ref::<ResolveError>() else {
        anyhow::bail!("expected a validation failure, got {err:#}");
    };

    assert!(failure.at("ai.tools.image").is_some(), "{failure}");
    Ok(())
}
