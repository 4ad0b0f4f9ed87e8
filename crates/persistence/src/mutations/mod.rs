// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `waitlist` — waitlist inserts and removals
//! - `missions` — mission inserts and direct manifest changes
//! - `allocation` — the atomic waitlist-to-manifest move
//! - `commit` — dispatch of a core `StateChange` to the above

pub mod allocation;
pub mod commit;
pub mod missions;
pub mod waitlist;

pub use commit::commit_change;
