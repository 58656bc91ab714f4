// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

pub const DEFAULT_IMAGE_REF: &str = "https://i.pravatar.cc/48";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    pub image_ref: String,
    /// Negative when the user owes this friend, positive when the friend owes
    /// the user.
    pub balance: i64,
}

impl Friend {
    pub fn standing(&self) -> Standing {
        Standing::from_balance(self.balance)
    }

    pub fn standing_label(&self) -> String {
        match self.standing() {
            Standing::YouOwe(amount) => format!("You owe {} ${amount}", self.name),
            Standing::OwesYou(amount) => format!("{} owes you ${amount}", self.name),
            Standing::Even => format!("You and {} are even", self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    YouOwe(u64),
    OwesYou(u64),
    Even,
}

impl Standing {
    pub const fn from_balance(balance: i64) -> Self {
        if balance < 0 {
            Self::YouOwe(balance.unsigned_abs())
        } else if balance > 0 {
            Self::OwesYou(balance.unsigned_abs())
        } else {
            Self::Even
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub const fn other(self) -> Self {
        match self {
            Self::User => Self::Friend,
            Self::Friend => Self::User,
        }
    }
}
