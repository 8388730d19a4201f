// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gradeflow_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

use crate::commands::parse_timestamp;

/// gradeflow - late-submission penalties and peer review pairing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a submission against a rule file without touching a database
    Evaluate {
        /// JSON rule configuration
        #[arg(long)]
        rule: PathBuf,
        /// Due date (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        due: OffsetDateTime,
        /// Submission time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        submitted: OffsetDateTime,
    },
    /// Create an assignment, optionally with a rule file
    AddAssignment {
        /// Unique short identifier
        #[arg(long)]
        identifier: String,
        /// Due date (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        due: OffsetDateTime,
        /// JSON rule configuration (defaults to no late submissions)
        #[arg(long)]
        rule: Option<PathBuf>,
    },
    /// Replace the rule attached to an assignment
    SetRule {
        #[arg(long)]
        assignment: i64,
        /// JSON rule configuration
        #[arg(long)]
        rule: PathBuf,
    },
    /// Create a grouping with the given student IDs
    AddGrouping {
        #[arg(long)]
        assignment: i64,
        #[arg(long)]
        name: String,
        #[arg(long, value_delimiter = ',')]
        students: Vec<i64>,
    },
    /// Record a submission for a grouping
    Submit {
        #[arg(long)]
        grouping: i64,
        /// Submission time (RFC 3339, defaults to now)
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<OffsetDateTime>,
    },
    /// Evaluate a submission time against an assignment's stored rule
    Late {
        #[arg(long)]
        assignment: i64,
        /// Submission time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        submitted: OffsetDateTime,
    },
    /// Assign a reviewer grouping to review a reviewee grouping
    Pair {
        #[arg(long)]
        reviewer: i64,
        #[arg(long)]
        reviewee: i64,
    },
    /// Remove a peer review and its result
    Unpair {
        #[arg(long)]
        peer_review: i64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let output: String = if let Command::Evaluate {
        rule,
        due,
        submitted,
    } = &args.command
    {
        commands::evaluate(rule, *due, *submitted)?
    } else {
        let mut persistence: Persistence = if let Some(db_path) = &args.database {
            info!("Using file-based database at: {}", db_path);
            Persistence::new_with_file(db_path)?
        } else {
            info!("Using in-memory database");
            Persistence::new_in_memory()?
        };
        commands::run(&mut persistence, args.command)?
    };

    println!("{output}");
    Ok(())
}
