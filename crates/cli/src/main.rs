// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level CLI dispatching the four ways this pipeline can run: a
//! standalone `master`/`worker` pair talking RPC, or the degenerate
//! `serial`/`mockparallel` in-process drivers used for quick local runs
//! and scenario tests.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::program::Program;

#[derive(Parser)]
#[command(name = "mr", about = "MapReduce coordination core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scheduling master, listening for worker signins.
    Master {
        #[arg(long, default_value_t = 0)]
        port: u16,
        #[arg(long)]
        shared: PathBuf,
        #[arg(short = 'M', long = "map-tasks")]
        map_tasks: usize,
        #[arg(short = 'R', long = "reduce-tasks")]
        reduce_tasks: usize,
        #[arg(long, value_enum, default_value = "wordcount")]
        program: Program,
        inputs: Vec<String>,
    },

    /// Sign in to a master and execute whatever it dispatches.
    Worker {
        server_uri: String,
        #[arg(long, default_value_t = 0)]
        port: u16,
        #[arg(long, value_enum, default_value = "wordcount")]
        program: Program,
    },

    /// Run the whole pipeline in this one process, no RPC at all — the
    /// degenerate single-worker case described in §8's S1 scenario.
    Serial {
        #[arg(long)]
        shared: PathBuf,
        #[arg(short = 'R', long = "reduce-tasks")]
        reduce_tasks: usize,
        #[arg(long, value_enum, default_value = "wordcount")]
        program: Program,
        inputs: Vec<String>,
    },

    /// Run the real scheduler and dataset graph, but with in-process
    /// fake workers instead of real RPC — useful for exercising the
    /// scheduling logic without binding any sockets.
    Mockparallel {
        #[arg(long)]
        shared: PathBuf,
        #[arg(short = 'W', long = "workers", default_value_t = 2)]
        workers: usize,
        #[arg(short = 'R', long = "reduce-tasks")]
        reduce_tasks: usize,
        #[arg(long, value_enum, default_value = "wordcount")]
        program: Program,
        inputs: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    match Cli::parse().command {
        Command::Master { port, shared, map_tasks, reduce_tasks, program, inputs } => {
            commands::master::run(port, shared, map_tasks, reduce_tasks, inputs, program).await
        }
        Command::Worker { server_uri, port, program } => commands::worker::run(server_uri, port, program).await,
        Command::Serial { shared, reduce_tasks, program, inputs } => commands::serial::run(shared, reduce_tasks, inputs, program),
        Command::Mockparallel { shared, workers, reduce_tasks, program, inputs } => {
            commands::mockparallel::run(shared, workers, reduce_tasks, inputs, program).await
        }
    }
}
