// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Lookups return `PersistenceError::NotFound` when the caller names a row
//! that must exist, and `Option` when absence is a normal outcome.

pub mod assignments;
pub mod groupings;
pub mod peer_reviews;
