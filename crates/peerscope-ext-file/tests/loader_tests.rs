//! Loader tests against files on disk.

use peerscope_ext_file::{load_facts, load_funds, load_holdings, load_master, FileError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_all_inputs() {
    let dir = tempdir().unwrap();
    let holdings = dir.path().join("holdings.csv");
    let master = dir.path().join("master.csv");
    let funds = dir.path().join("funds.csv");
    let facts = dir.path().join("facts.csv");

    fs::write(
        &holdings,
        "fund_name,ticker,weight\n\
         Own Fund,HDFCB IN Equity,5.0\n\
         Own Fund,2330 TT Equity,4.0\n\
         Peer A,2330 TT Equity,8.0\n\
         Peer A,USD Curncy,2.0\n",
    )
    .unwrap();
    fs::write(
        &master,
        "ticker,short_name,gics_sector,country_code,market_cap\n\
         HDFCB IN Equity,HDFC Bank,Financials,IN,120B\n\
         2330 TT Equity,TSMC,Information Technology,TW,1.1T\n",
    )
    .unwrap();
    fs::write(
        &funds,
        "fund_name,peer_set,is_reference,holdings_date\n\
         Own Fund,Asia,true,2025-03-31\n\
         Peer A,Asia,false,2025-02-28\n",
    )
    .unwrap();
    fs::write(
        &facts,
        "log_date,category,fund_name,item_name,percentage\n\
         2025-01-06,Holdings,Peer A,TSMC,8.0\n",
    )
    .unwrap();

    let holdings = load_holdings(&holdings).unwrap();
    assert_eq!(holdings.len(), 4);
    assert_eq!(holdings[1].country_derived.as_deref(), Some("Taiwan"));
    assert!(holdings[3].is_cash);

    let master = load_master(&master).unwrap();
    assert_eq!(master[1].market_cap_usd, Some(1_100_000.0));

    let funds = load_funds(&funds).unwrap();
    assert_eq!(funds.iter().filter(|f| f.is_reference).count(), 1);

    let facts = load_facts(&facts).unwrap();
    assert_eq!(facts.len(), 1);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = load_holdings(&path).unwrap_err();
    match err {
        FileError::Io { path: p, .. } => assert!(p.ends_with("absent.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holdings.csv");
    fs::write(&path, "fund_name,ticker,weight\n").unwrap();
    assert!(load_holdings(&path).unwrap().is_empty());
}
