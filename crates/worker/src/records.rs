// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newline-delimited `key\tvalue` record files — the one on-disk format
//! this implementation standardizes on so the pipeline is runnable
//! end-to-end without pulling in a richer serialization story.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read every line of `path` as a `(line_index, line_content)` record.
/// This is how a map task turns a plain input file into the program's
/// map function's `(key, value)` input.
pub fn read_lines_as_records(path: &str) -> std::io::Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i.to_string(), l)))
        .collect()
}

/// Read a `key\tvalue` record file written by [`write_records`].
pub fn read_records(path: &Path) -> std::io::Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some((key, value)) = line.split_once('\t') {
            records.push((key.to_string(), value.to_string()));
        }
    }
    Ok(records)
}

pub fn write_records(path: &Path, records: &[(String, String)]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (key, value) in records {
        writeln!(writer, "{key}\t{value}")?;
    }
    writer.flush()
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
