// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `waitlist` — waitlist entries by station
//! - `missions` — missions and their manifests

pub mod missions;
pub mod waitlist;
