//! End-to-end tests for the `ownable` binary.

use std::fs;
use std::process::{Output, Stdio};

use crate::common::{ALICE, BOB, CliSandbox, DEPLOYER, ZERO};

#[test]
fn deploy_then_owner_reports_deployer() {
    let sandbox = CliSandbox::new();

    let deployed = sandbox.stdout(&["deploy", "--as", DEPLOYER]);
    assert_eq!(deployed.trim(), format!("deployed: owner {DEPLOYER}"));
    assert_eq!(sandbox.stdout(&["owner"]).trim(), DEPLOYER);
}

#[test]
fn owner_without_deploy_fails() {
    let sandbox = CliSandbox::new();

    let output = sandbox.run(&["owner"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no registry deployed"), "got: {stderr}");
}

#[test]
fn second_deploy_requires_force() {
    let sandbox = CliSandbox::new();
    sandbox.stdout(&["deploy", "--as", DEPLOYER]);

    let output = sandbox.run(&["deploy", "--as", ALICE]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sandbox.stdout(&["owner"]).trim(), DEPLOYER);

    sandbox.stdout(&["deploy", "--as", ALICE, "--force"]);
    assert_eq!(sandbox.stdout(&["owner"]).trim(), ALICE);
}

#[test]
fn transfer_by_owner_prints_event() {
    let sandbox = CliSandbox::new();
    sandbox.stdout(&["deploy", "--as", DEPLOYER]);

    let printed = sandbox.stdout(&["transfer", "--as", DEPLOYER, ALICE]);
    assert_eq!(
        printed.trim(),
        format!("OwnershipTransferred({DEPLOYER}, {ALICE})")
    );
    assert_eq!(sandbox.stdout(&["owner"]).trim(), ALICE);
}

#[test]
fn rejections_exit_with_code_three_and_keep_state() {
    let sandbox = CliSandbox::new();
    sandbox.stdout(&["deploy", "--as", DEPLOYER]);
    let before = fs::read(sandbox.state_path()).unwrap();

    let cases = [
        (ALICE, ALICE, "NOT_OWNER"),
        (ALICE, ZERO, "NOT_OWNER"),
        (DEPLOYER, ZERO, "ZERO_ADDRESS"),
        (DEPLOYER, DEPLOYER, "SAME_OWNER"),
    ];
    for (caller, new_owner, code) in cases {
        let output = sandbox.run(&["transfer", "--as", caller, new_owner]);
        assert_eq!(output.status.code(), Some(3), "{caller} -> {new_owner}");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(&format!("rejected: {code}")), "got: {stderr}");
        assert!(output.stdout.is_empty());
    }

    assert_eq!(fs::read(sandbox.state_path()).unwrap(), before);
}

#[test]
fn history_records_round_trip() {
    let sandbox = CliSandbox::new();
    sandbox.stdout(&["deploy", "--as", DEPLOYER]);
    sandbox.stdout(&["transfer", "--as", DEPLOYER, BOB]);
    sandbox.stdout(&["transfer", "--as", BOB, DEPLOYER]);

    let lines = sandbox.stdout(&["history"]);
    let lines: Vec<&str> = lines.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("OwnershipTransferred({DEPLOYER}, {BOB})"),
            format!("OwnershipTransferred({BOB}, {DEPLOYER})"),
        ]
    );
    assert_eq!(sandbox.stdout(&["owner"]).trim(), DEPLOYER);

    let json: serde_json::Value =
        serde_json::from_str(&sandbox.stdout(&["history", "--json"])).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(json[1]["new_owner"], DEPLOYER);
}

#[test]
fn state_path_can_come_from_config() {
    let sandbox = CliSandbox::new();
    let config_path = sandbox.root().join("config.toml");
    let state_path = sandbox.root().join("from-config.json");
    fs::write(
        &config_path,
        format!("[state]\npath = \"{}\"\n", state_path.display()),
    )
    .unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_ownable"))
        .args(["deploy", "--as", DEPLOYER])
        .env("OWNABLE_CONFIG", &config_path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(state_path.exists());
}

#[test]
fn malformed_identity_is_a_usage_error() {
    let sandbox = CliSandbox::new();
    let output = sandbox.run(&["deploy", "--as", "deployer"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!sandbox.state_path().exists());
}

#[test]
fn racing_transfers_from_one_owner_apply_exactly_once() {
    const ROUNDS: usize = 5;
    const RACERS: u32 = 8;

    for round in 0..ROUNDS {
        let sandbox = CliSandbox::new();
        sandbox.stdout(&["deploy", "--as", DEPLOYER]);

        let targets: Vec<String> = (1..=RACERS)
            .map(|n| format!("0x{:040x}", 0xc000 + n))
            .collect();
        let children: Vec<_> = targets
            .iter()
            .map(|target| {
                sandbox
                    .command()
                    .args(["transfer", "--as", DEPLOYER, target.as_str()])
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .expect("spawn ownable")
            })
            .collect();
        let outputs: Vec<Output> = children
            .into_iter()
            .map(|child| child.wait_with_output().expect("wait for ownable"))
            .collect();

        let winners: Vec<&String> = targets
            .iter()
            .zip(&outputs)
            .filter(|(_, output)| output.status.success())
            .map(|(target, _)| target)
            .collect();
        assert_eq!(winners.len(), 1, "round {round}: {winners:?} all applied");

        for output in outputs.iter().filter(|output| !output.status.success()) {
            assert_eq!(output.status.code(), Some(3), "round {round}");
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("rejected: NOT_OWNER"), "got: {stderr}");
        }

        let history: serde_json::Value =
            serde_json::from_str(&sandbox.stdout(&["history", "--json"])).unwrap();
        assert_eq!(history.as_array().map(Vec::len), Some(1), "round {round}");
        assert_eq!(history[0]["previous_owner"], DEPLOYER);
        assert_eq!(history[0]["new_owner"], winners[0].as_str());
        assert_eq!(sandbox.stdout(&["owner"]).trim(), winners[0].as_str());
    }
}

#[test]
fn malformed_config_is_logged_and_ignored() {
    let sandbox = CliSandbox::new();
    let config_path = sandbox.root().join("config.toml");
    fs::write(&config_path, "[state\npath = 3").unwrap();

    let output = sandbox
        .command()
        .args(["deploy", "--as", DEPLOYER])
        .env("OWNABLE_CONFIG", &config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ignoring unreadable config"), "got: {stderr}");
    assert!(
        stderr.contains(&config_path.display().to_string()),
        "got: {stderr}"
    );
}
