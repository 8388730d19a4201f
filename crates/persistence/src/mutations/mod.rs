// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! These functions do not open transactions themselves. The `Persistence`
//! adapter wraps each multi-row write in a single Diesel transaction.

pub mod assignments;
pub mod groupings;
pub mod peer_reviews;
