use std::fs;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn qio() -> Command {
    Command::cargo_bin("qio").unwrap()
}

fn closed_week() -> Vec<String> {
    vec!["c".repeat(48); 7]
}

#[test]
fn groups_put_uploads_the_roster() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/Q1/groups")
            .header("cookie", "session=abc123")
            .json_body(json!([{"name": "A", "members": ["u1", "u2"]}]));
        then.status(200);
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123\n").unwrap();
    fs::write(
        cwd.path().join("groups.json"),
        r#"[{"name":"A","members":["u1","u2"]}]"#,
    )
    .unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", server.base_url())
        .args(["groups", "put", "Q1", "-f", "groups.json"])
        .assert()
        .success();
    mock.assert();
}

#[test]
fn missing_credentials_fail_with_both_searched_paths() {
    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(
        cwd.path().join("groups.json"),
        r#"[{"name":"A","members":["u1"]}]"#,
    )
    .unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .args(["groups", "put", "Q1", "-f", "groups.json"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("session credential not found")
                .and(predicate::str::contains(home.path().to_str().unwrap())),
        );
}

#[test]
fn an_empty_session_file_is_rejected() {
    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "\n").unwrap();
    fs::write(
        cwd.path().join("groups.json"),
        r#"[{"name":"A","members":["u1"]}]"#,
    )
    .unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .args(["groups", "put", "Q1", "-f", "groups.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));
}

#[test]
fn an_invalid_groups_file_fails_before_any_upload() {
    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();
    fs::write(cwd.path().join("groups.json"), r#"[{"name":"A"}]"#).unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        // A request would fail differently; the groups file must stop it first.
        .env("OH_BASE_URL", "http://127.0.0.1:9")
        .args(["groups", "put", "Q1", "-f", "groups.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid groups file"));
}

#[test]
fn a_rejected_upload_exits_nonzero_with_status_and_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/Q1/groups");
        then.status(401).body("not signed in");
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();
    fs::write(
        cwd.path().join("groups.json"),
        r#"[{"name":"A","members":["u1"]}]"#,
    )
    .unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", server.base_url())
        .args(["groups", "put", "Q1", "-f", "groups.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("401").and(predicate::str::contains("not signed in")));
    mock.assert();
}

#[test]
fn groups_get_prints_the_current_roster() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/Q1/groups")
            .header("cookie", "session=abc123");
        then.status(200)
            .json_body(json!([{"name": "A", "members": ["u1"]}]));
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", server.base_url())
        .args(["groups", "get", "Q1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"A\""));
}

#[test]
fn schedule_put_fetches_events_and_uploads_the_grid() {
    let gcal = MockServer::start();
    let queue = MockServer::start();

    let events_mock = gcal.mock(|when, then| {
        when.method(GET)
            .path("/cal-1/events")
            .query_param("key", "gkey");
        then.status(200).json_body(json!({
            "items": [{
                "status": "confirmed",
                "summary": "Office Hours - BBB 2725",
                "start": {"dateTime": "2023-10-03T10:00:00-04:00"},
                "end": {"dateTime": "2023-10-03T11:00:00-04:00"}
            }]
        }));
    });

    // 2023-10-03 is a Tuesday; 10:00-11:00 covers slots 20 and 21.
    let mut week = closed_week();
    week[2].replace_range(20..22, "oo");
    let put_mock = queue.mock(|when, then| {
        when.method(PUT)
            .path("/Q1/schedule")
            .header("cookie", "session=abc123")
            .json_body(json!(week));
        then.status(200);
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();
    // The key file only exists in the home directory fallback.
    fs::write(home.path().join(".gcalkey"), "gkey\n").unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", queue.base_url())
        .env("GCAL_BASE_URL", gcal.base_url())
        .args(["schedule", "put", "Q1", "-g", "cal-1"])
        .assert()
        .success();
    events_mock.assert();
    put_mock.assert();
}

#[test]
fn an_empty_calendar_still_uploads_a_schedule() {
    let gcal = MockServer::start();
    let queue = MockServer::start();

    gcal.mock(|when, then| {
        when.method(GET).path("/cal-1/events");
        then.status(200).json_body(json!({"items": []}));
    });
    let put_mock = queue.mock(|when, then| {
        when.method(PUT)
            .path("/Q1/schedule")
            .json_body(json!(closed_week()));
        then.status(200);
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();
    fs::write(cwd.path().join(".gcalkey"), "gkey").unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", queue.base_url())
        .env("GCAL_BASE_URL", gcal.base_url())
        .args(["schedule", "put", "Q1", "-g", "cal-1"])
        .assert()
        .success();
    put_mock.assert();
}

#[test]
fn schedule_get_prints_the_current_schedule() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/Q1/schedule")
            .header("cookie", "session=abc123");
        then.status(200).json_body(json!(closed_week()));
    });

    let cwd = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    fs::write(cwd.path().join(".ohsession"), "abc123").unwrap();

    qio()
        .current_dir(cwd.path())
        .env("HOME", home.path())
        .env("OH_BASE_URL", server.base_url())
        .args(["schedule", "get", "Q1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c".repeat(48)));
}
