use assert_cmd::Command;
use predicates::prelude::*;

fn meet() -> Command {
    let mut cmd = Command::cargo_bin("meet").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

const MEETING: &str = r#"{
    "title": "Quarterly review",
    "description": "Numbers, then plans",
    "date": "2026-11-04",
    "time": "08:00",
    "duration": 45,
    "timezone": "America/New_York",
    "attendees": "ana@example.com, raj@example.com"
}"#;

#[test]
fn test_overlap_tokyo_new_york_has_none() {
    let out = json_stdout(meet().args([
        "overlap",
        "--date",
        "2026-07-15",
        "--zones",
        "Asia/Tokyo,America/New_York",
    ]));
    assert_eq!(out["has_overlap"], false);
}

#[test]
fn test_overlap_london_paris() {
    let out = json_stdout(meet().args([
        "overlap",
        "--date",
        "2026-07-15",
        "--zones",
        "Europe/London,Europe/Paris",
    ]));
    assert_eq!(out["has_overlap"], true);
    assert_eq!(out["start_hour"], 9);
    assert_eq!(out["end_hour"], 16);
}

#[test]
fn test_classify_holiday() {
    let out = json_stdout(meet().args([
        "classify",
        "--date",
        "2026-12-25",
        "--zones",
        "Europe/London,America/New_York",
        "--today",
        "2026-10-19",
    ]));
    assert_eq!(out["classification"], "HOLIDAY");
    assert_eq!(out["bookable"], false);
}

#[test]
fn test_classify_past() {
    let out = json_stdout(meet().args([
        "classify",
        "--date",
        "2026-10-01",
        "--zones",
        "Europe/London",
        "--today",
        "2026-10-19",
    ]));
    assert_eq!(out["classification"], "PAST");
}

#[test]
fn test_month_lists_every_day() {
    let out = json_stdout(meet().args([
        "month",
        "--year",
        "2026",
        "--month",
        "2",
        "--zones",
        "UTC",
        "--today",
        "2026-01-01",
    ]));
    assert_eq!(out.as_array().unwrap().len(), 28);
}

#[test]
fn test_project_new_york_to_london() {
    let out = json_stdout(meet().args([
        "project",
        "--date",
        "2026-07-15",
        "--time",
        "09:00",
        "--zone",
        "America/New_York",
        "--to",
        "Europe/London,Asia/Tokyo",
    ]));
    assert_eq!(out[0]["display"], "02:00 PM");
    assert_eq!(out[0]["day_shift"], 0);
    assert_eq!(out[1]["display"], "10:00 PM");
}

#[test]
fn test_unknown_zone_fails() {
    meet()
        .args(["overlap", "--date", "2026-07-15", "--zones", "Mars/Olympus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mars/Olympus"));
}

#[test]
fn test_book_from_stdin() {
    let out = json_stdout(
        meet()
            .args([
                "book",
                "--meeting",
                "-",
                "--zones",
                "America/New_York,Europe/London",
                "--today",
                "2026-10-19",
            ])
            .write_stdin(MEETING),
    );
    assert_eq!(out["meeting"]["title"], "Quarterly review");
    assert_eq!(out["participants"][1]["display"], "01:00 PM");
    assert!(out["google_calendar_url"]
        .as_str()
        .unwrap()
        .contains("dates=20261104T130000Z/20261104T134500Z"));
}

#[test]
fn test_book_rejects_holiday() {
    let holiday = MEETING.replace("2026-11-04", "2026-12-25");
    meet()
        .args(["book", "--meeting", "-", "--today", "2026-10-19"])
        .write_stdin(holiday)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking rejected"));
}

#[test]
fn test_book_zone_must_include_meeting_zone() {
    meet()
        .args([
            "book",
            "--meeting",
            "-",
            "--zones",
            "Europe/London",
            "--today",
            "2026-10-19",
        ])
        .write_stdin(MEETING)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --zones"));
}

#[test]
fn test_links() {
    let out = json_stdout(meet().args(["links", "--meeting", "-"]).write_stdin(MEETING));
    assert!(out["outlook_calendar_url"]
        .as_str()
        .unwrap()
        .contains("startdt=2026-11-04T13:00:00Z"));
}

#[test]
fn test_ics() {
    meet()
        .args([
            "ics",
            "--meeting",
            "-",
            "--uid",
            "review-1@example.com",
            "--stamp",
            "2026-10-19T08:00:00Z",
        ])
        .write_stdin(MEETING)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("BEGIN:VCALENDAR\r\n"))
        .stdout(predicate::str::contains("DTSTART:20261104T130000Z"))
        .stdout(predicate::str::contains("DTSTAMP:20261019T080000Z"));
}

#[test]
fn test_invalid_meeting_request() {
    meet()
        .args(["links", "--meeting", "-"])
        .write_stdin(r#"{"title": "No date"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid meeting"));
}

#[test]
fn test_config_with_invalid_policy_fails() {
    let path = std::env::temp_dir().join(format!("meet-bad-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"working_hours": {"start_hour": 18, "end_hour": 8}}"#).unwrap();
    let assert = meet()
        .args(["overlap", "--date", "2026-07-15", "--zones", "UTC", "--config"])
        .arg(&path)
        .assert();
    std::fs::remove_file(&path).ok();
    assert
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn test_config_policy_applies() {
    let path = std::env::temp_dir().join(format!("meet-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"working_hours": {"start_hour": 8, "end_hour": 12}}"#).unwrap();
    let out = json_stdout(
        meet()
            .args(["overlap", "--date", "2026-07-15", "--zones", "UTC", "--config"])
            .arg(&path),
    );
    std::fs::remove_file(&path).ok();
    assert_eq!(out["start_hour"], 8);
    assert_eq!(out["end_hour"], 12);
}
