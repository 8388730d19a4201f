// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use gradeflow_domain::DomainError;
use gradeflow_persistence::PersistenceError;
use thiserror::Error;

/// Errors reported by the `gradeflow` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The rule file could not be read.
    #[error("Failed to read rule file {}: {source}", path.display())]
    ReadRuleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not a valid rule configuration.
    #[error("Invalid rule file {}: {source}", path.display())]
    ParseRuleFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timestamp argument is not RFC 3339.
    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },

    /// A rule or pairing was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A database operation failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
