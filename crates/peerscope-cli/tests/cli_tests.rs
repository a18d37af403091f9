//! End-to-end tests of the peerscope binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("funds.csv"),
        "fund_name,peer_set,is_reference,holdings_date\n\
         Own Fund,Asia,true,2025-03-31\n\
         Peer A,Asia,false,2025-03-31\n\
         Peer B,Asia,false,2025-02-28\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("holdings.csv"),
        "fund_name,ticker,weight\n\
         Own Fund,AAA IN Equity,10\n\
         Own Fund,BBB HK Equity,5\n\
         Peer A,AAA IN Equity,6\n\
         Peer A,CCC KS Equity,4\n\
         Peer B,AAA IN Equity,3\n\
         Peer B,DDD TT Equity,2\n\
         Peer B,USD Curncy,1\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("master.csv"),
        "ticker,short_name,gics_sector,country_code,market_cap\n\
         AAA IN Equity,Alpha,Financials,IN,25B\n\
         BBB HK Equity,Beta,Industrials,HK,3B\n\
         CCC KS Equity,Gamma,Information Technology,KR,900M\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("facts.csv"),
        "log_date,category,fund_name,item_name,percentage,date_of_data,source_url\n\
         2025-01-06,Holdings,Peer A,TSMC,8.0,2024-12-31,\n\
         2025-01-06,Holdings,Peer A,Samsung,5.0,2024-12-31,\n\
         2025-01-13,Holdings,Peer A,TSMC,9.0,2024-12-31,\n\
         2025-01-13,Sectors,Peer A,Technology,30.0,2024-12-31,\n",
    )
    .unwrap();
    dir
}

fn peerscope(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("peerscope").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("PEERSCOPE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn peers(dir: &Path, analytic: &str) -> Command {
    let mut cmd = peerscope(dir);
    cmd.args(["peers", analytic])
        .args(["--holdings", "holdings.csv"])
        .args(["--master", "master.csv"])
        .args(["--funds", "funds.csv"])
        .args(["--peer-set", "Asia"]);
    cmd
}

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    peerscope(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("peers"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_overlap_table() {
    let dir = fixture();
    peers(dir.path(), "overlap")
        .assert()
        .success()
        .stdout(predicate::str::contains("Holdings Overlap"))
        .stdout(predicate::str::contains("Peer A"))
        .stdout(predicate::str::contains("Peer B"));
}

#[test]
fn test_conviction_json() {
    let dir = fixture();
    let output = peers(dir.path(), "conviction")
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &rows[0];
    assert_eq!(first["ticker"], "AAA IN Equity");
    assert_eq!(first["peer_holder_count"], 2);
    assert!((first["active_weight"].as_f64().unwrap() - 5.5).abs() < 1e-9);
}

#[test]
fn test_cash_excluded_unless_requested() {
    let dir = fixture();
    peers(dir.path(), "consensus")
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USD Curncy").not());

    peers(dir.path(), "consensus")
        .args(["--format", "csv", "--include-cash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USD Curncy"));
}

#[test]
fn test_concentration_csv_header() {
    let dir = fixture();
    peers(dir.path(), "concentration")
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fund,reference,positions"));
}

#[test]
fn test_every_analytic_runs() {
    let dir = fixture();
    for analytic in [
        "overview",
        "unique",
        "country",
        "sector",
        "active-share",
        "market-cap",
        "profiles",
    ] {
        peers(dir.path(), analytic).assert().success();
        peers(dir.path(), analytic)
            .args(["--format", "json"])
            .assert()
            .success();
    }
}

#[test]
fn test_unknown_peer_set_fails() {
    let dir = fixture();
    peerscope(dir.path())
        .args(["peers", "overlap", "--holdings", "holdings.csv"])
        .args(["--funds", "funds.csv", "--peer-set", "Europe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Europe"));
}

#[test]
fn test_missing_input_fails() {
    let dir = fixture();
    peerscope(dir.path())
        .args(["peers", "overlap", "--holdings", "nope.csv"])
        .args(["--funds", "funds.csv", "--peer-set", "Asia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn test_history_stream_marks_removals() {
    let dir = fixture();
    let output = peerscope(dir.path())
        .args(["--format", "json", "history", "--facts", "facts.csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let changes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let changes = changes.as_array().unwrap();
    let removed: Vec<&str> = changes
        .iter()
        .filter(|c| c["is_removed"] == true)
        .map(|c| c["item_name"].as_str().unwrap())
        .collect();
    assert_eq!(removed, vec!["Samsung"]);
}

#[test]
fn test_history_timeline() {
    let dir = fixture();
    peerscope(dir.path())
        .args(["history", "--facts", "facts.csv", "--fund", "Peer A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TSMC"))
        .stdout(predicate::str::contains("+1.00"))
        .stdout(predicate::str::contains("removed"));

    peerscope(dir.path())
        .args(["history", "--facts", "facts.csv", "--fund", "Peer Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown fund"));
}

#[test]
fn test_history_rejects_zero_snapshots() {
    let dir = fixture();
    peerscope(dir.path())
        .args(["history", "--facts", "facts.csv", "--snapshots", "0"])
        .assert()
        .failure();
}

#[test]
fn test_local_config_sets_default_format() {
    let dir = fixture();
    fs::write(
        dir.path().join("peerscope.toml"),
        "[output]\nformat = \"json\"\n",
    )
    .unwrap();
    peers(dir.path(), "overlap")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_config_show_and_init() {
    let dir = tempdir().unwrap();
    peerscope(dir.path())
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshots_to_compare"));

    let target = dir.path().join("custom.toml");
    peerscope(dir.path())
        .args(["config", "init"])
        .arg(&target)
        .assert()
        .success();
    assert!(fs::read_to_string(&target).unwrap().contains("[analytics]"));

    peerscope(dir.path())
        .args(["config", "init"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    peerscope(dir.path())
        .args(["--config"])
        .arg(&target)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}
