use tactics::telemetry::init_tracing;
use tactics::{LogConfig, LogFormat};

#[test]
fn invalid_level_is_an_error() {
    let config = LogConfig {
        level: "tactics=loudest".to_string(),
        format: LogFormat::Text,
    };

    let err = init_tracing(&config).expect_err("bad filter");
    assert!(err.to_string().contains("Invalid log filter"), "{err}");
}

#[test]
fn subscriber_installs_once() {
    let config = LogConfig {
        level: "tactics=debug".to_string(),
        format: LogFormat::Json,
    };

    init_tracing(&config).expect("first install");
    let err = init_tracing(&config).expect_err("second install");
    assert!(err.to_string().contains("Failed to install"), "{err}");
}
