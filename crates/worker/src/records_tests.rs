// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use tempfile::tempdir;

use super::*;

#[test]
fn read_lines_as_records_indexes_by_line_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, "a\nb\nc\n").unwrap();

    let records = read_lines_as_records(path.to_str().unwrap()).unwrap();
    assert_eq!(
        records,
        vec![
            ("0".to_string(), "a".to_string()),
            ("1".to_string(), "b".to_string()),
            ("2".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn write_then_read_records_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("part-0.mtxt");
    let records = vec![("hello".to_string(), "1".to_string()), ("world".to_string(), "1".to_string())];

    write_records(&path, &records).unwrap();
    let read_back = read_records(&path).unwrap();
    assert_eq!(read_back, records);
}

#[test]
fn read_records_skips_malformed_lines_without_a_tab() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("part-0.mtxt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "no-tab-here").unwrap();
    writeln!(file, "key\tvalue").unwrap();
    drop(file);

    let records = read_records(&path).unwrap();
    assert_eq!(records, vec![("key".to_string(), "value".to_string())]);
}
