// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use mr_core::{identity_registry, wordcount_registry, HASH_PARTITION, IDENTITY_MAP, IDENTITY_PARTITION, IDENTITY_REDUCE};
use tempfile::tempdir;

use super::*;

#[test]
fn run_map_splits_words_and_partitions_by_hash() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "the quick fox\nthe lazy fox\n").unwrap();

    let registry = wordcount_registry();
    let outputs = run_map(
        &registry,
        0,
        &[input.to_str().unwrap().to_string()],
        mr_core::WORDCOUNT_MAP,
        HASH_PARTITION,
        4,
        dir.path().to_str().unwrap(),
        "mtxt",
    )
    .unwrap();

    assert_eq!(outputs.len(), 4);
    let total_records: usize = outputs
        .iter()
        .map(|path| read_records(std::path::Path::new(path)).unwrap().len())
        .sum();
    // "the quick fox the lazy fox" = 6 words total
    assert_eq!(total_records, 6);
}

#[test]
fn run_map_with_zero_partitions_still_writes_one_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "a b\n").unwrap();

    let registry = wordcount_registry();
    let outputs = run_map(
        &registry,
        0,
        &[input.to_str().unwrap().to_string()],
        mr_core::WORDCOUNT_MAP,
        HASH_PARTITION,
        0,
        dir.path().to_str().unwrap(),
        "mtxt",
    )
    .unwrap();

    assert_eq!(outputs.len(), 1);
}

#[test]
fn run_reduce_sums_values_grouped_by_key() {
    let dir = tempdir().unwrap();
    let shuffle_input = dir.path().join("shuffle-0.mtxt");
    write_records(
        &shuffle_input,
        &[
            ("fox".to_string(), "1".to_string()),
            ("fox".to_string(), "1".to_string()),
            ("quick".to_string(), "1".to_string()),
        ],
    )
    .unwrap();

    let registry = wordcount_registry();
    let outputs = run_reduce(
        &registry,
        0,
        &[shuffle_input.to_str().unwrap().to_string()],
        mr_core::WORDCOUNT_REDUCE,
        HASH_PARTITION,
        1,
        dir.path().to_str().unwrap(),
        "rtxt",
    )
    .unwrap();

    assert_eq!(outputs.len(), 1);
    let mut records = read_records(std::path::Path::new(&outputs[0])).unwrap();
    records.sort();
    assert_eq!(
        records,
        vec![("fox".to_string(), "2".to_string()), ("quick".to_string(), "1".to_string())]
    );
}

#[test]
fn identity_program_round_trips_records_unchanged() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "hello\nworld\n").unwrap();

    let registry = identity_registry();
    let map_outputs = run_map(
        &registry,
        0,
        &[input.to_str().unwrap().to_string()],
        IDENTITY_MAP,
        IDENTITY_PARTITION,
        1,
        dir.path().to_str().unwrap(),
        "mtxt",
    )
    .unwrap();
    assert_eq!(map_outputs.len(), 1);

    let reduce_outputs = run_reduce(
        &registry,
        0,
        &map_outputs,
        IDENTITY_REDUCE,
        IDENTITY_PARTITION,
        1,
        dir.path().to_str().unwrap(),
        "rtxt",
    )
    .unwrap();

    assert_eq!(reduce_outputs.len(), 1);
    let mut records = read_records(std::path::Path::new(&reduce_outputs[0])).unwrap();
    records.sort_by_key(|(k, _)| k.clone());
    assert_eq!(
        records,
        vec![("0".to_string(), "hello".to_string()), ("1".to_string(), "world".to_string())]
    );
}

#[test]
fn run_map_surfaces_unknown_function_name() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "a\n").unwrap();

    let registry = wordcount_registry();
    let err = run_map(
        &registry,
        0,
        &[input.to_str().unwrap().to_string()],
        "not_a_real_map",
        HASH_PARTITION,
        1,
        dir.path().to_str().unwrap(),
        "mtxt",
    )
    .unwrap_err();

    assert!(matches!(err, WorkerError::Registry(_)));
}
