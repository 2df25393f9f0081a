mod harness;

use chatjs_config::{Gateway, ResolveError, global, init};
use harness::input::InputBuilder;

#[test]
fn resolved_once_per_process() {
    assert!(global().is_none());

    let input = InputBuilder::for_gateway(Gateway::Openrouter)
        .set("appName", "Acme")
        .build();
    let config = init(&input).unwrap();
    assert_eq!(config.ai.gateway(), Gateway::Openrouter);

    let stored = global().unwrap();
    assert!(std::ptr::eq(config, stored));

    let err = init(&InputBuilder::new().build()).unwrap_err();
    assert!(matches!(err, ResolveError::AlreadyInitialized));
    assert_eq!(global().unwrap().app_name, "Acme");
}
