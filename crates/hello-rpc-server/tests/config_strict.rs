#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hello_rpc_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
limits:
  max_tims: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.service.name, "HelloWorldService");
    assert_eq!(cfg.limits.max_times, None);
    assert_eq!(cfg.limits.max_items, None);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn limits_are_range_checked() {
    let err = config::load_from_str("version: 1\nlimits:\n  max_times: 0\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = config::load_from_str("version: 1\nlimits:\n  max_items: 0\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let cfg = config::load_from_str("version: 1\nlimits:\n  max_times: 5000000\n").unwrap();
    assert_eq!(cfg.limits.max_times, Some(5_000_000));

    let err = config::load_from_str("version: 1\nserver:\n  max_body_bytes: 10\n")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn empty_service_metadata_is_rejected() {
    let err = config::load_from_str("version: 1\nservice:\n  tns: \"  \"\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn shipped_config_parses() {
    let cfg = config::load_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/../../hello-rpc.yaml"))
        .expect("shipped config must load");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 8000);
    assert!(!cfg.contract.reject_zero_times);
}
