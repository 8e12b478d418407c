mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use finview::finview_config::{Config, ConfigManager};
use predicates::prelude::*;
use predicates::str::contains;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("finview_cli").expect("binary exists");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn fixture_args(view: &str) -> Vec<String> {
    let config = common::write_config(&Config::default());
    vec![
        common::fixture_path().display().to_string(),
        view.to_string(),
        "--today".into(),
        "2025-03-15".into(),
        "--config".into(),
        config.display().to_string(),
    ]
}

#[test]
fn version_prints_build_banner() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("finview ").and(contains(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn dashboard_lists_alerts_and_totals() {
    cli()
        .args(fixture_args("dashboard"))
        .assert()
        .success()
        .stdout(contains("Total spent  : 1184.50 USD"))
        .stdout(contains("[danger] Rent: 100% of budget used"))
        .stdout(contains("[warning] Transport: 75% of budget used"));
}

#[test]
fn expenses_view_filters_from_flags() {
    let mut args = fixture_args("expenses");
    args.extend(["--search", "gas", "--category", "2"].map(String::from));
    cli()
        .args(args)
        .assert()
        .success()
        .stdout(contains("Gas station"))
        .stdout(contains("GAS refill"))
        .stdout(contains("Gas bill").not())
        .stdout(contains("2 expenses, total 75.00 USD"));
}

#[test]
fn json_output_is_machine_readable() {
    let mut args = fixture_args("budgets");
    args.push("--json".into());
    let output = cli().args(args).output().expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["source"], "local");
    assert_eq!(value["statuses"][0]["budget"]["name"], "Rent");
    assert_eq!(value["overview"]["overBudgetCount"], 0);
}

#[test]
fn configured_currency_and_user_are_honored() {
    let config = common::write_config(&Config {
        currency: "EUR".into(),
        default_user_id: 2,
        ..Config::default()
    });
    cli()
        .arg(common::fixture_path())
        .args(["expenses", "--today", "2025-03-15", "--config"])
        .arg(config)
        .assert()
        .success()
        .stdout(contains("Someone else's taxi"))
        .stdout(contains("1 expenses, total 500.00 EUR"));
}

#[test]
fn invalid_snapshot_fails_with_message() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let snapshot = temp.child("broken.json");
    snapshot
        .write_str(r#"{"budgets":[{"id":1,"name":"Trip","amount":10,"budgetType":"CUSTOM"}]}"#)
        .expect("write snapshot");
    let config = common::write_config(&Config::default());

    cli()
        .arg(snapshot.path())
        .args(["budgets", "--config"])
        .arg(config)
        .assert()
        .failure()
        .stderr(contains("custom budget 1 requires start and end dates"));
}

#[test]
fn unknown_view_is_rejected() {
    cli()
        .args(["snapshot.json", "ledgers"])
        .assert()
        .failure()
        .stderr(contains("unknown view `ledgers`"));
}

#[test]
fn expenses_view_defaults_to_the_current_month() {
    cli()
        .args(fixture_args("expenses"))
        .assert()
        .success()
        .stdout(contains("Fuel top-up").not())
        .stdout(contains("5 expenses, total 1139.50 USD"));

    let mut args = fixture_args("expenses");
    args.extend(["--period", "all"].map(String::from));
    cli()
        .args(args)
        .assert()
        .success()
        .stdout(contains("Fuel top-up"))
        .stdout(contains("6 expenses, total 1184.50 USD"));
}

#[test]
fn config_backups_can_be_created_listed_and_restored() {
    let config = common::write_config(&Config::default());
    let config_arg = config.display().to_string();

    cli()
        .args(["config", "backup", "nightly", "--config", &config_arg])
        .assert()
        .success()
        .stdout(contains("Backup created: finview_").and(contains("nightly.json")));

    let manager = ConfigManager::for_file(config.clone());
    manager
        .save(&Config {
            currency: "EUR".into(),
            ..Config::default()
        })
        .expect("overwrite config");

    cli()
        .args(["config", "backups", "--config", &config_arg])
        .assert()
        .success()
        .stdout(contains("Available backups:").and(contains(" 1. finview_")));

    cli()
        .args(["config", "restore", "1", "--config", &config_arg])
        .assert()
        .success()
        .stdout(contains("Restored configuration from finview_"));
    assert_eq!(manager.load().expect("reload").currency, Config::default().currency);
}
