// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DEFAULT_IMAGE_REF, Payer, Rejection, SplitBillInput, clamp_my_expense};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    pub name: String,
    pub image_ref: String,
    placeholder_image_ref: String,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        Self::with_placeholder(DEFAULT_IMAGE_REF)
    }
}

impl AddFriendForm {
    pub fn with_placeholder(image_ref: impl Into<String>) -> Self {
        let placeholder_image_ref = image_ref.into();
        Self {
            name: String::new(),
            image_ref: placeholder_image_ref.clone(),
            placeholder_image_ref,
        }
    }

    pub fn placeholder_image_ref(&self) -> &str {
        &self.placeholder_image_ref
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.image_ref.clone_from(&self.placeholder_image_ref);
    }

    pub fn validate(&self) -> Result<(), Rejection> {
        if self.name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        if self.image_ref.is_empty() {
            return Err(Rejection::EmptyImageRef);
        }
        Ok(())
    }
}

/// Split-bill panel fields. The expense can never be raised above the bill
/// through [`SplitBillForm::set_my_expense`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitBillForm {
    input: SplitBillInput,
}

impl SplitBillForm {
    pub fn input(&self) -> SplitBillInput {
        self.input
    }

    pub fn bill(&self) -> Option<i64> {
        self.input.bill
    }

    pub fn my_expense(&self) -> Option<i64> {
        self.input.my_expense
    }

    pub fn payer(&self) -> Payer {
        self.input.payer
    }

    pub fn friend_expense(&self) -> Option<i64> {
        self.input.friend_expense()
    }

    pub fn set_bill(&mut self, bill: Option<i64>) {
        self.input.bill = bill;
    }

    /// Returns false when the entry was ignored because it exceeds the bill.
    pub fn set_my_expense(&mut self, entered: Option<i64>) -> bool {
        let kept = clamp_my_expense(self.input.bill, self.input.my_expense, entered);
        self.input.my_expense = kept;
        kept == entered
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.input.payer = payer;
    }

    pub fn reset(&mut self) {
        self.input = SplitBillInput::default();
    }
}
