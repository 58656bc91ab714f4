// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FriendId(i64);

impl FriendId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for FriendId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out friend ids in increasing order. An id is never handed out twice,
/// and never collides with an id the generator was told about. Once the id
/// space above the largest known id is used up the generator stays exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: Option<i64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdGenerator {
    pub fn starting_after<I>(existing: I) -> Self
    where
        I: IntoIterator<Item = FriendId>,
    {
        let next = match existing.into_iter().map(FriendId::get).max() {
            Some(largest) => largest.checked_add(1).map(|next| next.max(1)),
            None => Some(1),
        };
        Self { next }
    }

    /// `None` once every id above the largest known one has been used.
    pub fn next_id(&mut self) -> Option<FriendId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(FriendId::new(id))
    }
}
