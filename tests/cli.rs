use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const USER: &str = "550e8400-e29b-41d4-a716-446655440000";

fn cards(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cards").unwrap();
    cmd.arg("--data-dir")
        .arg(data_dir.path())
        .env_remove("CARD_SERVICES_LOG");
    cmd
}

fn create_card(data_dir: &TempDir, expiry: &str) -> String {
    let output = cards(data_dir)
        .args([
            "card",
            "create",
            "4111111111111111",
            "--expiry",
            expiry,
            "--holder",
            "A B",
            "--user",
            USER,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: ").map(str::to_string))
        .expect("create prints the card ID")
}

#[test]
fn init_creates_data_files() {
    let data_dir = TempDir::new().unwrap();

    cards(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("cards.json").exists());
}

#[test]
fn card_lifecycle() {
    let data_dir = TempDir::new().unwrap();
    let id = create_card(&data_dir, "09/27");

    cards(&data_dir)
        .args(["card", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type:      Default"))
        .stdout(predicate::str::contains("************1111"))
        .stdout(predicate::str::contains("4111111111111111").not());

    cards(&data_dir)
        .args(["card", "activate", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated card"));

    cards(&data_dir)
        .args(["card", "list", "--user", USER])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 card(s)"));

    cards(&data_dir)
        .args(["card", "delete", &id])
        .assert()
        .success();

    cards(&data_dir)
        .args(["card", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card not found"));

    cards(&data_dir)
        .args(["history", "--card", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("isActive: false -> true"))
        .stdout(predicate::str::contains("DELETE"));

    cards(&data_dir)
        .args(["history", "--card", &id, "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE"))
        .stdout(predicate::str::contains("CREATE").not());
}

#[test]
fn create_rejects_bad_expiry() {
    let data_dir = TempDir::new().unwrap();

    cards(&data_dir)
        .args([
            "card", "create", "4111", "--expiry", "13/25", "--holder", "A B", "--user", USER,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn list_for_user_without_cards_fails() {
    let data_dir = TempDir::new().unwrap();

    cards(&data_dir)
        .args(["card", "list", "--user", USER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn edit_changes_expiry() {
    let data_dir = TempDir::new().unwrap();
    let id = create_card(&data_dir, "09/27");

    cards(&data_dir)
        .args(["card", "edit", &id, "--expiry", "12/30"])
        .assert()
        .success();

    cards(&data_dir)
        .args(["card", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expiry:    12/30"));

    cards(&data_dir)
        .args(["card", "edit", &id, "--expiry", "2030-12"])
        .assert()
        .failure();
}
