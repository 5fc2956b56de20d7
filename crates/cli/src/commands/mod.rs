// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommand implementations

pub mod master;
pub mod mockparallel;
pub mod program;
pub mod serial;
pub mod worker;
