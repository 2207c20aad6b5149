use crate::tests::test_utils::*;
use near_sdk::serde_json::{self, Value};
use near_sdk::test_utils::get_logs;
use near_sdk::testing_env;

fn parse_event(log: &str) -> Value {
    let json = log
        .strip_prefix("EVENT_JSON:")
        .expect("event log must carry the EVENT_JSON: prefix");
    serde_json::from_str(json).unwrap()
}

#[test]
fn init_emits_contract_init_event() {
    let _contract = new_contract();
    let logs = get_logs();
    assert_eq!(logs.len(), 1);

    let event = parse_event(&logs[0]);
    assert_eq!(event["standard"], "nft_marketplace");
    assert_eq!(event["version"], "1.0.0");
    assert_eq!(event["event"], "CONTRACT_UPDATE");
    assert_eq!(event["data"][0]["operation"], "contract_init");
    assert_eq!(event["data"][0]["author"], owner().to_string());
    assert_eq!(event["data"][0]["owner_id"], owner().to_string());
}

#[test]
fn transfer_emits_owner_transferred_event() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(owner(), 1).build());
    contract.transfer_ownership(stranger()).unwrap();

    let logs = get_logs();
    let event = parse_event(logs.last().unwrap());
    assert_eq!(event["data"][0]["operation"], "owner_transferred");
    assert_eq!(event["data"][0]["old_owner"], owner().to_string());
    assert_eq!(event["data"][0]["new_owner"], stranger().to_string());
}

#[test]
fn failed_transfer_emits_nothing() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(stranger(), 1).build());
    assert!(contract.transfer_ownership(stranger()).is_err());
    assert!(get_logs().is_empty());
}
