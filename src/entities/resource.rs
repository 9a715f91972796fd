// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Reference into the PokéAPI path space, as found in listings and nested records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id at the end of the resource url (`.../pokemon/25/` -> 25)
    pub fn id(&self) -> Option<i64> {
        self.url
            .trim_end_matches('/')
            .split('/')
            .next_back()
            .and_then(|s| s.parse().ok())
    }
}

/// One page of a collection endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl ResourceList {
    /// Whether the source says a further page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Offset/limit pair addressing one page of a collection.
/// The offset never goes below zero and the limit never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub offset: i64,
    pub limit: i64,
}

impl Cursor {
    /// Page size collections use when the caller does not pick one
    pub const DEFAULT_LIMIT: i64 = 20;

    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.max(1),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}
