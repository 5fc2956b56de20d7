// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function registry: the two-way name <-> callable mapping a master and
//! its workers must agree on before any task can be dispatched. Named
//! lookups let the wire protocol reference a function by a short string
//! instead of shipping code.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

/// `map(key, value) -> (key, value)*`
pub trait MapFn: Send + Sync {
    fn call(&self, key: &str, value: &str) -> Vec<(String, String)>;
}

/// `reduce(key, values) -> value*`
pub trait ReduceFn: Send + Sync {
    fn call(&self, key: &str, values: &[String]) -> Vec<String>;
}

/// `partition(key, nparts) -> part_index`
pub trait PartitionFn: Send + Sync {
    fn call(&self, key: &str, nparts: usize) -> usize;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no map function registered under {0:?}")]
    UnknownMap(String),
    #[error("no reduce function registered under {0:?}")]
    UnknownReduce(String),
    #[error("no partition function registered under {0:?}")]
    UnknownPartition(String),
}

/// Two-way mapping from names to callables, built once at program
/// construction and shared read-only afterward by both roles.
///
/// The fingerprint is a hash over the registered names in insertion order;
/// it is stable across processes that register identical functions in the
/// identical order, which is what a master and its workers running the
/// same binary do.
#[derive(Default)]
pub struct FunctionRegistry {
    maps: HashMap<String, Arc<dyn MapFn>>,
    reduces: HashMap<String, Arc<dyn ReduceFn>>,
    partitions: HashMap<String, Arc<dyn PartitionFn>>,
    order: Vec<String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_map(&mut self, name: impl Into<String>, f: impl MapFn + 'static) {
        let name = name.into();
        self.order.push(format!("map:{name}"));
        self.maps.insert(name, Arc::new(f));
    }

    pub fn add_reduce(&mut self, name: impl Into<String>, f: impl ReduceFn + 'static) {
        let name = name.into();
        self.order.push(format!("reduce:{name}"));
        self.reduces.insert(name, Arc::new(f));
    }

    pub fn add_partition(&mut self, name: impl Into<String>, f: impl PartitionFn + 'static) {
        let name = name.into();
        self.order.push(format!("partition:{name}"));
        self.partitions.insert(name, Arc::new(f));
    }

    pub fn map(&self, name: &str) -> Result<Arc<dyn MapFn>, RegistryError> {
        self.maps.get(name).cloned().ok_or_else(|| RegistryError::UnknownMap(name.to_string()))
    }

    pub fn reduce(&self, name: &str) -> Result<Arc<dyn ReduceFn>, RegistryError> {
        self.reduces
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownReduce(name.to_string()))
    }

    pub fn partition(&self, name: &str) -> Result<Arc<dyn PartitionFn>, RegistryError> {
        self.partitions
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownPartition(name.to_string()))
    }

    /// Hash of the registered names, in the order they were added. Two
    /// registries produce the same fingerprint iff they registered the
    /// same functions under the same names in the same order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.order {
            hasher.update(entry.as_bytes());
            hasher.update(b"\0");
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Hash of a program's source text, exchanged alongside the registry
/// fingerprint at worker signin. The core treats this as an opaque,
/// precomputed string; computing it (e.g. from `include_str!` of the
/// driver module, or a build id) is the embedder's responsibility.
pub fn source_fingerprint(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
