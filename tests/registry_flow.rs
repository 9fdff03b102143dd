//! End-to-end scenarios: literal input scripts driven through the session
//! loop against a temporary data directory, with assertions on both the
//! terminal output and the persisted file.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use teller::identity::{UserRepository, UserService};
use teller::institution::{BankRepository, BankService};
use teller::store::FileStore;

fn run_script(db_path: &Path, script: &str) -> String {
    let store = Arc::new(FileStore::open(db_path).unwrap());
    let users = UserService::new(UserRepository::new(Arc::clone(&store)));
    let banks = BankService::new(BankRepository::new(Arc::clone(&store)));

    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    teller::session::run(&mut input, &mut output, &users, &banks).unwrap();
    String::from_utf8(output).unwrap()
}

fn read_db(db_path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(db_path).unwrap()).unwrap()
}

#[test]
fn register_customer_then_login() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("db").join("database.json");

    let output = run_script(
        &db,
        "2\nalice\npw1\ncustomer\n\
         1\nalice\npw1\n\
         1\nalice\nwrong\n\
         1\nbob\npw1\n\
         0\n",
    );

    assert!(output.contains("Registered 'alice' with role: customer"));
    assert!(output.contains("Welcome alice"));
    assert!(output.contains("You are logged in as a customer"));
    // Wrong password and unknown user fail the same way.
    assert_eq!(output.matches("Login failed").count(), 2);

    let doc = read_db(&db);
    assert_eq!(doc["users"].as_array().unwrap().len(), 1);
    assert_eq!(doc["users"][0]["id"], 1);
    assert_eq!(doc["users"][0]["username"], "alice");
    assert_eq!(doc["users"][0]["role"], "customer");
    assert_eq!(doc["banks"], serde_json::json!([]));
    assert_eq!(doc["customers"], serde_json::json!([]));
}

#[test]
fn bank_operator_registers_an_institution() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    let output = run_script(
        &db,
        "2\nops\ns3cret\nBANK\n\
         1\nops\ns3cret\nAcme\n\
         0\n",
    );

    assert!(output.contains("Registered 'ops' with role: bank"));
    assert!(output.contains("Bank created successfully"));
    assert!(output.contains("ID: 1, Name: Acme"));

    let text = fs::read_to_string(&db).unwrap();
    // Two-space pretty printing, stable key order.
    assert!(text.contains("  \"banks\""));
    assert!(text.find("\"banks\"").unwrap() < text.find("\"customers\"").unwrap());
    assert!(text.find("\"customers\"").unwrap() < text.find("\"users\"").unwrap());

    let doc = read_db(&db);
    assert_eq!(doc["users"][0]["role"], "bank");
    assert_eq!(doc["banks"][0]["id"], 1);
    assert_eq!(doc["banks"][0]["userid"], 1);
    assert_eq!(doc["banks"][0]["name"], "Acme");
    // Empty customer list stays off the wire.
    assert!(doc["banks"][0].get("customers").is_none());
}

#[test]
fn duplicate_bank_name_is_rejected_across_cases() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    run_script(
        &db,
        "2\nops\ns3cret\nbank\n1\nops\ns3cret\nAcme\n0\n",
    );
    run_script(&db, "2\nops2\npw\nbank\n0\n");
    let before = fs::read_to_string(&db).unwrap();

    let output = run_script(&db, "1\nops2\npw\nacme\n0\n");

    assert!(output.contains("Could not create bank"));
    assert!(output.contains("already exists"));
    assert_eq!(fs::read_to_string(&db).unwrap(), before);

    // The first operator is greeted by name on the next login.
    let output = run_script(&db, "1\nops\ns3cret\n0\n");
    assert!(output.contains("Welcome back, Acme!"));
}

#[test]
fn too_short_bank_name_is_rejected_once_without_retry() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    let output = run_script(
        &db,
        "2\nops\npw\nbank\n1\nops\npw\n X \n0\n",
    );

    assert!(output.contains("Could not create bank"));
    assert!(output.contains("invalid bank name"));
    assert_eq!(read_db(&db)["banks"], serde_json::json!([]));
}

#[test]
fn legacy_bank_array_is_adopted_and_rewritten_canonically() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");
    fs::write(&db, r#"[{"id":7,"userid":0,"name":"Old"}]"#).unwrap();

    let output = run_script(
        &db,
        "2\nops\npw\nbank\n1\nops\npw\nFresh Bank\n0\n",
    );

    assert!(output.contains("ID: 8, Name: Fresh Bank"));

    let doc = read_db(&db);
    assert!(doc.is_object());
    assert_eq!(doc["banks"][0]["id"], 7);
    assert_eq!(doc["banks"][0]["name"], "Old");
    assert_eq!(doc["banks"][1]["id"], 8);
    assert_eq!(doc["users"].as_array().unwrap().len(), 1);
}

#[test]
fn duplicate_username_keeps_one_user_on_disk() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    let output = run_script(
        &db,
        "2\nbob\npw1\ncustomer\n\
         2\nbob\npw2\nbank\n\
         0\n",
    );

    assert!(output.contains("Registration failed"));
    assert!(output.contains("already taken"));
    assert_eq!(read_db(&db)["users"].as_array().unwrap().len(), 1);
}

#[test]
fn end_of_input_ends_the_loop_cleanly() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    // Input runs dry mid-registration; the loop still winds down normally.
    let output = run_script(&db, "2\nalice\n");
    assert!(output.contains("Login Menu"));
    assert!(!db.exists());
}

#[test]
fn unknown_menu_choice_returns_to_the_menu() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("database.json");

    let output = run_script(&db, "7\n0\n");
    assert!(output.contains("Invalid choice"));
    assert!(output.contains("Goodbye"));
}
