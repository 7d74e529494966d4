use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs the `store` binary with the given arguments in `dir`.
fn store(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_store"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run store binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Lays down a migrations directory with the inventory schema and a seed
/// row, plus a state file listing the given orgs at watermark -1.
fn setup_workspace(dir: &Path, orgs: &[&str]) -> (PathBuf, PathBuf) {
    let migrations = dir.join("migrations");
    fs::create_dir_all(&migrations).unwrap();
    fs::write(
        migrations.join("init_0.sql"),
        "CREATE TABLE Customers (id INTEGER PRIMARY KEY AUTOINCREMENT, email TEXT NOT NULL, state TEXT NOT NULL)\n\
         CREATE TABLE Products (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, price REAL NOT NULL, sku TEXT)\n\
         CREATE TABLE Orders (id INTEGER PRIMARY KEY AUTOINCREMENT, created_at TEXT DEFAULT CURRENT_TIMESTAMP, customer_id INTEGER NOT NULL, product_id INTEGER NOT NULL)\n",
    )
    .unwrap();
    fs::write(
        migrations.join("seed_1.sql"),
        "INSERT INTO Customers (email, state) VALUES ('seed@example.com', 'CA')\n",
    )
    .unwrap();

    let entries: Vec<String> = orgs
        .iter()
        .map(|org| format!("{{\"name\": \"{org}\", \"lastRanMigrationId\": -1}}"))
        .collect();
    let state_path = dir.join("migration_state.json");
    fs::write(
        &state_path,
        format!("{{\"orgs\": [{}]}}", entries.join(", ")),
    )
    .unwrap();

    (migrations, state_path)
}

fn migrate(dir: &Path) -> Output {
    store(
        dir,
        &[
            "--data-dir",
            "data",
            "run-migrations",
            "--migrations",
            "migrations",
            "--state",
            "migration_state.json",
        ],
    )
}

#[test]
fn run_migrations_advances_watermarks_and_seeds_databases() {
    let dir = tempfile::tempdir().unwrap();
    let (_migrations, state_path) = setup_workspace(dir.path(), &["acme", "globex"]);

    let output = migrate(dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("2 org(s)"));

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    for org in state["orgs"].as_array().unwrap() {
        assert_eq!(org["lastRanMigrationId"], 1);
    }

    for org in ["acme", "globex"] {
        let conn =
            rusqlite::Connection::open(dir.path().join("data").join(format!("store_{org}.db")))
                .unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "org {org} should have exactly the seed row");
    }
}

#[test]
fn run_migrations_is_idempotent_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);

    assert!(migrate(dir.path()).status.success());
    assert!(migrate(dir.path()).status.success());

    let conn = rusqlite::Connection::open(dir.path().join("data/store_acme.db")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM Customers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn failed_migration_persists_progress_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (migrations, state_path) = setup_workspace(dir.path(), &["acme"]);
    fs::write(
        migrations.join("broken_2.sql"),
        "INSERT INTO NoSuchTable VALUES (1)\n",
    )
    .unwrap();

    let output = migrate(dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("broken_2.sql"));

    // Units 0 and 1 were recorded before unit 2 failed.
    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(state["orgs"][0]["lastRanMigrationId"], 1);
}

#[test]
fn malformed_state_file_is_reported_not_reset() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);
    fs::write(dir.path().join("migration_state.json"), "{broken").unwrap();

    let output = migrate(dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("migration_state.json"));
    // The malformed file is left for diagnosis.
    assert_eq!(
        fs::read_to_string(dir.path().join("migration_state.json")).unwrap(),
        "{broken"
    );
}

#[test]
fn create_and_show_customer_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);
    assert!(migrate(dir.path()).status.success());

    let output = store(
        dir.path(),
        &[
            "--org",
            "acme",
            "--data-dir",
            "data",
            "create-customer",
            "ada@example.com",
            "wa",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    // State code is canonicalized on the way in.
    assert!(stdout(&output).contains("WA"));

    let output = store(
        dir.path(),
        &[
            "--org",
            "acme",
            "--data-dir",
            "data",
            "show-customers",
            "--email",
            "ada",
        ],
    );
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("ada@example.com"));
    assert!(!listing.contains("seed@example.com"));
}

#[test]
fn create_customer_rejects_bad_state_code() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);
    assert!(migrate(dir.path()).status.success());

    let output = store(
        dir.path(),
        &[
            "--org",
            "acme",
            "--data-dir",
            "data",
            "create-customer",
            "x@y.com",
            "ZZ",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not a US state"));
}

#[test]
fn orders_reference_existing_rows_only() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);
    assert!(migrate(dir.path()).status.success());

    let base = ["--org", "acme", "--data-dir", "data"];

    let output = store(
        dir.path(),
        &[&base[..], &["create-product", "widget", "9.99"][..]].concat(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // Product 1 exists, customer 1 is the seed row: order succeeds.
    let output = store(dir.path(), &[&base[..], &["create-order", "1", "1"][..]].concat());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // Customer 99 does not exist.
    let output = store(dir.path(), &[&base[..], &["create-order", "1", "99"][..]].concat());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("customer id 99"));

    let output = store(dir.path(), &[&base[..], &["show-orders"][..]].concat());
    assert!(output.status.success());
    assert!(stdout(&output).lines().count() >= 2);
}

#[test]
fn show_products_filters_by_name() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path(), &["acme"]);
    assert!(migrate(dir.path()).status.success());

    let base = ["--org", "acme", "--data-dir", "data"];
    store(
        dir.path(),
        &[&base[..], &["create-product", "widget", "9.99", "--sku", "W-1"][..]].concat(),
    );
    store(
        dir.path(),
        &[&base[..], &["create-product", "gadget", "19.99"][..]].concat(),
    );

    let output = store(
        dir.path(),
        &[&base[..], &["show-products", "--name", "wid"][..]].concat(),
    );
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("widget"));
    assert!(listing.contains("W-1"));
    assert!(!listing.contains("gadget"));
}
