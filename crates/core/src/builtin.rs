// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small built-in wordcount program. The master and worker binaries
//! both link this module so they register identical names in identical
//! order and therefore agree on a registry fingerprint without either
//! side shipping code to the other — the worker is the only one that
//! ever calls the functions.

use crate::registry::{FunctionRegistry, MapFn, PartitionFn, ReduceFn};

/// Opaque source text hashed into the signin fingerprint. A real
/// embedder would hash their driver module's source; this demo program
/// hashes its own name.
pub const WORDCOUNT_SOURCE: &str = "mr::builtin::wordcount v1";

pub const WORDCOUNT_MAP: &str = "wordcount_map";
pub const WORDCOUNT_REDUCE: &str = "wordcount_reduce";
pub const HASH_PARTITION: &str = "hash_partition";

struct WordcountMap;

impl MapFn for WordcountMap {
    fn call(&self, _key: &str, value: &str) -> Vec<(String, String)> {
        value.split_whitespace().map(|word| (word.to_lowercase(), "1".to_string())).collect()
    }
}

struct WordcountReduce;

impl ReduceFn for WordcountReduce {
    fn call(&self, _key: &str, values: &[String]) -> Vec<String> {
        let total: u64 = values.iter().filter_map(|v| v.parse::<u64>().ok()).sum();
        vec![total.to_string()]
    }
}

struct HashPartition;

impl PartitionFn for HashPartition {
    fn call(&self, key: &str, nparts: usize) -> usize {
        if nparts == 0 {
            return 0;
        }
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in key.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        (hash as usize) % nparts
    }
}

/// Build a fresh registry containing the wordcount map/reduce/partition
/// functions under their canonical names, in a fixed order.
pub fn wordcount_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.add_map(WORDCOUNT_MAP, WordcountMap);
    registry.add_reduce(WORDCOUNT_REDUCE, WordcountReduce);
    registry.add_partition(HASH_PARTITION, HashPartition);
    registry
}

/// A no-op program: map and reduce pass their input through unchanged,
/// and everything lands in partition 0. Used by the single-partition
/// round-trip scenario where the output must equal the input exactly.
pub const IDENTITY_SOURCE: &str = "mr::builtin::identity v1";

pub const IDENTITY_MAP: &str = "identity_map";
pub const IDENTITY_REDUCE: &str = "identity_reduce";
pub const IDENTITY_PARTITION: &str = "identity_partition";

struct IdentityMap;

impl MapFn for IdentityMap {
    fn call(&self, key: &str, value: &str) -> Vec<(String, String)> {
        vec![(key.to_string(), value.to_string())]
    }
}

struct IdentityReduce;

impl ReduceFn for IdentityReduce {
    fn call(&self, _key: &str, values: &[String]) -> Vec<String> {
        values.to_vec()
    }
}

struct IdentityPartition;

impl PartitionFn for IdentityPartition {
    fn call(&self, _key: &str, _nparts: usize) -> usize {
        0
    }
}

pub fn identity_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.add_map(IDENTITY_MAP, IdentityMap);
    registry.add_reduce(IDENTITY_REDUCE, IdentityReduce);
    registry.add_partition(IDENTITY_PARTITION, IdentityPartition);
    registry
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
