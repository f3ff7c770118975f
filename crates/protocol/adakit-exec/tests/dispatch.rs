//! Dispatcher Behavior Tests
//!
//! Drive the dispatcher through `MockRunner` and check what reaches the
//! process boundary and what never does.

use std::time::Duration;

use adakit_exec::{CommandArgs, DispatchError, Dispatcher, DEFAULT_PROGRAM};
use adakit_test_utils::{test_context, tip_json, MockRunner, TEST_SOCKET_PATH};
use adakit_types::{ConfigError, ErrorCode, NetworkContext, SOCKET_PATH_VAR};

fn dispatcher() -> (Dispatcher<MockRunner>, MockRunner) {
    let mock = MockRunner::new();
    (Dispatcher::new(mock.clone()), mock)
}

// ============ REJECTED BEFORE SPAWN ============

#[test]
fn test_unknown_command_never_spawns() {
    let (dispatcher, mock) = dispatcher();

    let err = dispatcher
        .dispatch("deploy-contract", &CommandArgs::new(), &test_context())
        .unwrap_err();

    assert!(matches!(err, DispatchError::UnknownCommand { ref name } if name == "deploy-contract"));
    assert_eq!(err.error_code(), ErrorCode::UnknownCommand);
    mock.assert_not_spawned();
}

#[test]
fn test_missing_socket_never_spawns() {
    let (dispatcher, mock) = dispatcher();
    mock.push_success(tip_json("100.00", 1, 1, 1));

    let err = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &NetworkContext::default())
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Config(ConfigError::MissingConfiguration { key }) if key == SOCKET_PATH_VAR
    ));
    mock.assert_not_spawned();
    assert_eq!(mock.pending_responses(), 1);
}

#[test]
fn test_blank_socket_is_missing() {
    let (dispatcher, mock) = dispatcher();
    let ctx = NetworkContext::default().with_socket_path("   ");

    let err = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &ctx)
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::MissingConfiguration);
    mock.assert_not_spawned();
}

#[test]
fn test_offline_command_runs_without_socket() {
    let (dispatcher, mock) = dispatcher();
    mock.push_success("4d7954\n");

    let output = dispatcher
        .dispatch(
            "policy-id",
            &CommandArgs::new().with("script_file", "scripts/policy.script"),
            &NetworkContext::default(),
        )
        .unwrap();

    assert_eq!(output.text(), "4d7954\n");
    let inv = mock.last_invocation().unwrap();
    assert_eq!(inv.env_value(SOCKET_PATH_VAR), None);
}

#[test]
fn test_invalid_arguments_reports_every_problem() {
    let (dispatcher, mock) = dispatcher();

    let err = dispatcher
        .dispatch(
            "mint-build",
            &CommandArgs::new()
                .with("tx_in", "abc#0")
                .with("quantity", "ten")
                .with("colour", "blue"),
            &test_context(),
        )
        .unwrap_err();

    match err {
        DispatchError::InvalidArguments { command, problems } => {
            assert_eq!(command, "mint-build");
            let joined = problems.join("\n");
            assert!(joined.contains("'quantity' must be an integer"));
            assert!(joined.contains("missing 'change_address'"));
            assert!(joined.contains("unexpected 'colour'"));
        }
        other => panic!("expected InvalidArguments, got {other:?}"),
    }
    mock.assert_not_spawned();
}

// ============ PROCESS OUTCOMES ============

#[test]
fn test_success_forwards_stdout_and_argv() {
    let (dispatcher, mock) = dispatcher();
    let tip = tip_json("99.87", 52_000_000, 2_100_000, 120);
    mock.push_success(tip.clone());

    let ctx = test_context().with_network_magic("2");
    let output = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &ctx)
        .unwrap();

    assert_eq!(output.bytes(), tip.as_bytes());
    let inv = mock.last_invocation().unwrap();
    assert_eq!(inv.program.to_str(), Some(DEFAULT_PROGRAM));
    assert_eq!(inv.args, ["query", "tip", "--testnet-magic", "2"]);
    assert_eq!(inv.env_value(SOCKET_PATH_VAR), Some(TEST_SOCKET_PATH));
}

#[test]
fn test_mint_quantity_stays_one_argument() {
    let (dispatcher, mock) = dispatcher();
    mock.push_success("");

    dispatcher
        .dispatch(
            "mint-build",
            &CommandArgs::new()
                .with("tx_in", "abc#0")
                .with("change_address", "addr_test1qz")
                .with("quantity", "-5")
                .with("policy_id", "ab12")
                .with("asset_name", "4d79")
                .with("script_file", "scripts/policy.script")
                .with("out_file", "tokens/burn.raw"),
            &test_context(),
        )
        .unwrap();

    let inv = mock.last_invocation().unwrap();
    assert_eq!(inv.flag_value("--mint"), Some("-5 ab12.4d79"));
    assert_eq!(inv.flag_value("--out-file"), Some("tokens/burn.raw"));
}

#[test]
fn test_nonzero_exit_is_external_failure() {
    let (dispatcher, mock) = dispatcher();
    mock.push_failure(1, "network error\n");

    let err = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &test_context())
        .unwrap_err();

    match &err {
        DispatchError::ExternalFailure {
            command,
            exit_code,
            stderr,
        } => {
            assert_eq!(command, "query-tip");
            assert_eq!(*exit_code, 1);
            assert_eq!(stderr, "network error");
        }
        other => panic!("expected ExternalFailure, got {other:?}"),
    }
    assert_eq!(err.error_code(), ErrorCode::ExternalFailure);
}

#[test]
fn test_timeout_is_reported() {
    let mock = MockRunner::new();
    let dispatcher = Dispatcher::new(mock.clone()).with_timeout(Duration::from_secs(5));
    mock.push_timeout();

    let err = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &test_context())
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Timeout { ref command, after } if command == "query-tip" && after == Duration::from_secs(5)
    ));
    assert_eq!(err.error_code(), ErrorCode::Timeout);
}

#[test]
fn test_spawn_failure_is_reported() {
    let (dispatcher, _mock) = dispatcher();

    // No scripted response: the mock reports the binary as missing.
    let err = dispatcher
        .dispatch("query-tip", &CommandArgs::new(), &test_context())
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::SpawnFailed);
}
