// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which built-in program a run executes. Selectable so a single-worker
//! `serial` run can exercise an identity pass-through instead of always
//! counting words — that's what tells apart the shuffle from the rest
//! of the pipeline in scenario tests.

use clap::ValueEnum;

use mr_core::{
    identity_registry, wordcount_registry, FunctionRegistry, HASH_PARTITION, IDENTITY_MAP, IDENTITY_PARTITION, IDENTITY_REDUCE,
    IDENTITY_SOURCE, WORDCOUNT_MAP, WORDCOUNT_REDUCE, WORDCOUNT_SOURCE,
};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Program {
    #[default]
    Wordcount,
    Identity,
}

pub struct ProgramSpec {
    pub registry: FunctionRegistry,
    pub source: &'static str,
    pub map_name: &'static str,
    pub reduce_name: &'static str,
    pub partition_name: &'static str,
}

impl Program {
    pub fn spec(self) -> ProgramSpec {
        match self {
            Program::Wordcount => ProgramSpec {
                registry: wordcount_registry(),
                source: WORDCOUNT_SOURCE,
                map_name: WORDCOUNT_MAP,
                reduce_name: WORDCOUNT_REDUCE,
                partition_name: HASH_PARTITION,
            },
            Program::Identity => ProgramSpec {
                registry: identity_registry(),
                source: IDENTITY_SOURCE,
                map_name: IDENTITY_MAP,
                reduce_name: IDENTITY_REDUCE,
                partition_name: IDENTITY_PARTITION,
            },
        }
    }
}
