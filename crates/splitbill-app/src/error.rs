// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::FriendId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("friend {0} not found -- select a friend from the list and retry")]
    FriendNotFound(FriendId),
}

/// Why an entry point left the ledger unchanged. The default flows treat these
/// as silent no-ops; they exist so stricter callers can surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("friend name is empty")]
    EmptyName,
    #[error("image reference is empty")]
    EmptyImageRef,
    #[error("bill value is missing")]
    MissingBill,
    #[error("friend expense is zero")]
    MissingFriendExpense,
    #[error("no friend selected")]
    NoSelection,
    #[error("balance out of range")]
    BalanceOverflow,
    #[error("no friend ids left")]
    IdsExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(Rejection),
}

impl Outcome {
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub const fn rejection(self) -> Option<Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}
