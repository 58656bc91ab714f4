// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Payer, Rejection};

/// Values entered into the split-bill panel. `None` is a blank field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitBillInput {
    pub bill: Option<i64>,
    pub my_expense: Option<i64>,
    pub payer: Payer,
}

impl SplitBillInput {
    pub const fn new(bill: Option<i64>, my_expense: Option<i64>, payer: Payer) -> Self {
        Self {
            bill,
            my_expense,
            payer,
        }
    }

    /// The friend's share as shown while typing; blank until a non-zero bill
    /// is entered. A blank expense counts as zero.
    pub fn friend_expense(&self) -> Option<i64> {
        let bill = self.bill.filter(|bill| *bill != 0)?;
        bill.checked_sub(self.my_expense.unwrap_or(0))
    }

    /// Balance after this bill, or why the submission is refused.
    ///
    /// A zero friend share is refused too, so a bill the user covers alone
    /// never changes the balance.
    pub fn settle(&self, current_balance: i64) -> Result<i64, Rejection> {
        let bill = self
            .bill
            .filter(|bill| *bill != 0)
            .ok_or(Rejection::MissingBill)?;
        let my_expense = self.my_expense.unwrap_or(0);
        let friend_expense = bill
            .checked_sub(my_expense)
            .ok_or(Rejection::BalanceOverflow)?;
        if friend_expense == 0 {
            return Err(Rejection::MissingFriendExpense);
        }
        next_balance(current_balance, my_expense, friend_expense, self.payer)
            .ok_or(Rejection::BalanceOverflow)
    }
}

pub fn next_balance(
    current_balance: i64,
    my_expense: i64,
    friend_expense: i64,
    payer: Payer,
) -> Option<i64> {
    let with_mine = current_balance.checked_add(my_expense)?;
    match payer {
        Payer::User => with_mine.checked_sub(friend_expense),
        Payer::Friend => with_mine.checked_add(friend_expense),
    }
}

/// An entered expense above the bill is ignored and the previous value kept.
/// A blank bill counts as zero.
pub fn clamp_my_expense(
    bill: Option<i64>,
    previous: Option<i64>,
    entered: Option<i64>,
) -> Option<i64> {
    if entered.unwrap_or(0) > bill.unwrap_or(0) {
        previous
    } else {
        entered
    }
}
