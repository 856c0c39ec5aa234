use std::fs;

use engine::{
    Accounts, DistributionMethod, EngineError, Goals, PlanInput, Store, allocate,
};
use tempfile::TempDir;

fn accounts_with_dir() -> (Accounts, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path().join("user_data.json")).unwrap();
    (Accounts::new(store), dir)
}

fn plan() -> PlanInput {
    PlanInput {
        income: 1000.0,
        expenses: 400.0,
        current_savings: 0.0,
        goals: Goals {
            books: 100.0,
            tuition: 200.0,
            meal: 200.0,
        },
        method: DistributionMethod::EvenSplit,
    }
}

#[test]
fn open_creates_empty_data_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");

    let store = Store::open(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn open_leaves_existing_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");
    fs::write(&path, r#"{"alice": {"password": "pw", "savings": {}}}"#).unwrap();

    let store = Store::open(&path).unwrap();
    let users = store.load().unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users["alice"].password, "pw");
}

#[test]
fn register_then_authenticate() {
    let (accounts, _dir) = accounts_with_dir();

    assert!(accounts.register("alice", "password").unwrap());
    assert!(accounts.authenticate("alice", "password").unwrap());
}

#[test]
fn duplicate_register_keeps_first_password() {
    let (accounts, _dir) = accounts_with_dir();

    assert!(accounts.register("alice", "first").unwrap());
    assert!(!accounts.register("alice", "second").unwrap());

    assert!(accounts.authenticate("alice", "first").unwrap());
    assert!(!accounts.authenticate("alice", "second").unwrap());
}

#[test]
fn wrong_password_is_rejected() {
    let (accounts, _dir) = accounts_with_dir();
    accounts.register("alice", "password").unwrap();

    assert!(!accounts.authenticate("alice", "guess").unwrap());
    assert!(!accounts.authenticate("nobody", "password").unwrap());
}

#[test]
fn savings_lifecycle() {
    let (accounts, _dir) = accounts_with_dir();
    accounts.register("alice", "password").unwrap();

    assert_eq!(accounts.savings("alice").unwrap(), None);

    let record = allocate(&plan());
    accounts.update_savings("alice", record.clone()).unwrap();

    assert_eq!(accounts.savings("alice").unwrap(), Some(record.clone()));

    // Overwritten wholesale on the next save, no history kept.
    let mut second = plan();
    second.method = DistributionMethod::FixedPercentages;
    let second = allocate(&second);
    accounts.update_savings("alice", second.clone()).unwrap();

    assert_eq!(accounts.savings("alice").unwrap(), Some(second));
}

#[test]
fn savings_for_unknown_user_is_key_not_found() {
    let (accounts, _dir) = accounts_with_dir();

    assert!(matches!(
        accounts.savings("ghost"),
        Err(EngineError::KeyNotFound(name)) if name == "ghost"
    ));
    assert!(matches!(
        accounts.update_savings("ghost", allocate(&plan())),
        Err(EngineError::KeyNotFound(name)) if name == "ghost"
    ));
}

#[test]
fn malformed_data_file_propagates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_data.json");
    fs::write(&path, "not json").unwrap();

    let store = Store::open(&path).unwrap();

    assert!(matches!(store.load(), Err(EngineError::Json(_))));
}

#[test]
fn save_load_round_trip_preserves_content() {
    let (accounts, dir) = accounts_with_dir();
    accounts.register("alice", "password").unwrap();
    accounts.register("bob", "hunter2").unwrap();
    accounts.update_savings("alice", allocate(&plan())).unwrap();

    let path = dir.path().join("user_data.json");
    let before: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    let store = accounts.store();
    store.save(&store.load().unwrap()).unwrap();

    let after: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn data_file_is_indented_with_four_spaces() {
    let (accounts, dir) = accounts_with_dir();
    accounts.register("alice", "password").unwrap();

    let content = fs::read_to_string(dir.path().join("user_data.json")).unwrap();
    assert!(content.contains("\n    \"alice\""));
    assert!(content.contains("\n        \"password\""));
}
