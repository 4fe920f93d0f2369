use buddy::memory::notes::{NoteDump, NoteEntry, NoteLog};
use chrono::{Local, TimeZone};
use tempfile::TempDir;

fn log(dir: &TempDir) -> NoteLog {
    NoteLog::new(dir.path().join("Assistant-lab").join("notes.txt"))
}

#[test]
fn test_dump_without_log_is_missing() {
    let dir = TempDir::new().unwrap();
    let log = log(&dir);

    assert_eq!(log.dump_all().unwrap(), NoteDump::Missing);
    assert!(log.entries().unwrap().is_empty());
}

#[test]
fn test_existing_empty_log_is_not_missing() {
    let dir = TempDir::new().unwrap();
    let log = log(&dir);
    std::fs::create_dir_all(log.path().parent().unwrap()).unwrap();
    std::fs::write(log.path(), "").unwrap();

    assert_eq!(log.dump_all().unwrap(), NoteDump::Contents(String::new()));
}

#[test]
fn test_append_keeps_insertion_order() {
    let dir = TempDir::new().unwrap();
    let log = log(&dir);
    let texts = ["first", "second: with colon", "third"];

    for text in texts {
        log.append(text).unwrap();
    }

    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), texts.len());
    for (entry, text) in entries.iter().zip(texts) {
        assert_eq!(entry.text, text);
    }

    match log.dump_all().unwrap() {
        NoteDump::Contents(raw) => assert_eq!(raw.lines().count(), 3),
        NoteDump::Missing => panic!("log should exist"),
    }
}

#[test]
fn test_line_format() {
    let dir = TempDir::new().unwrap();
    let log = log(&dir);
    let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

    let entry = log.append_at(at, "buy milk").unwrap();

    assert_eq!(entry.timestamp, "2024-03-09 07:05:01.000000");
    let raw = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(raw, "2024-03-09 07:05:01.000000: buy milk\n");
}

#[test]
fn test_parse_line_splits_after_timestamp() {
    let entry = NoteEntry::parse_line("2024-03-09 07:05:01.000000: call: mom").unwrap();
    assert_eq!(entry.timestamp, "2024-03-09 07:05:01.000000");
    assert_eq!(entry.text, "call: mom");
    assert!(NoteEntry::parse_line("garbage").is_none());
}
