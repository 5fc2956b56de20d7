// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level black-box specs: spawn the built `mr` binary and
//! drive it the way a real deployment would, instead of calling into
//! the library crates directly.

mod support;

mod specs;
