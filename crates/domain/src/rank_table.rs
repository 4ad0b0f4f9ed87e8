// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

/// Position of a rank code within the rank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankOrder {
    /// The rank is in the table at this index (lower index = higher precedence).
    Known(usize),
    /// The rank is not in the table.
    Unknown,
}

/// The fixed precedence list of military rank codes.
///
/// Lookups are exact and case-sensitive. When a code appears more than
/// once, its first position wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    ranks: Vec<String>,
    index: HashMap<String, usize>,
}

impl RankTable {
    /// Default rank codes, highest precedence first.
    pub const DEFAULT_RANKS: &'static [&'static str] = &[
        "TB", "MB", "BR", "CEL", "TC", "MAJ", "CAP", "1T", "2T", "ASP", "SO", "1S", "2S", "3S",
        "CB", "S1", "S2",
    ];

    /// Creates a rank table from rank codes in precedence order.
    ///
    /// Codes are trimmed and blank codes are dropped.
    #[must_use]
    pub fn new<I, S>(ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for rank in ranks {
            let code: &str = rank.as_ref().trim();
            if code.is_empty() || index.contains_key(code) {
                continue;
            }
            index.insert(code.to_string(), table.len());
            table.push(code.to_string());
        }
        Self {
            ranks: table,
            index,
        }
    }

    /// Creates a rank table from a comma-separated list of codes.
    #[must_use]
    pub fn parse_delimited(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Returns the table position of `rank`.
    #[must_use]
    pub fn rank_order(&self, rank: &str) -> RankOrder {
        self.index
            .get(rank)
            .map_or(RankOrder::Unknown, |&i| RankOrder::Known(i))
    }

    /// Returns the rank codes in precedence order.
    #[must_use]
    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    /// Returns the number of ranks in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RANKS)
    }
}
