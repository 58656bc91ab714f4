// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use log::debug;

use crate::{
    AddFriendForm, Friend, FriendId, FriendRegistry, LedgerError, Outcome, Payer, Rejection,
    SplitBillForm, SplitBillInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(FriendId),
}

impl Selection {
    pub const fn friend_id(self) -> Option<FriendId> {
        match self {
            Self::None => None,
            Self::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(self, id: FriendId) -> bool {
        self == Self::Selected(id)
    }

    /// Picking the selected friend again closes the selection.
    pub fn toggled(self, id: FriendId) -> Self {
        match self {
            Self::Selected(current) if current == id => Self::None,
            _ => Self::Selected(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    registry: FriendRegistry,
    selection: Selection,
    add_panel_open: bool,
    pub add_form: AddFriendForm,
    pub split_form: SplitBillForm,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    ToggleAddPanel,
    SelectFriend(FriendId),
    ClearSelection,
    AddFriend { name: String, image_ref: String },
    SubmitAddForm,
    SubmitSplit(SplitBillInput),
    SubmitSplitForm,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    AddPanelChanged(bool),
    SelectionChanged(Selection),
    FriendAdded(FriendId),
    BalanceUpdated { friend_id: FriendId, balance: i64 },
    Rejected(Rejection),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(registry: FriendRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn with_friends(friends: Vec<Friend>) -> Self {
        Self::new(FriendRegistry::with_friends(friends))
    }

    pub fn with_placeholder_image(mut self, image_ref: impl Into<String>) -> Self {
        self.add_form = AddFriendForm::with_placeholder(image_ref);
        self
    }

    pub fn list_friends(&self) -> &[Friend] {
        self.registry.list()
    }

    pub fn registry(&self) -> &FriendRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection
            .friend_id()
            .and_then(|id| self.registry.get(id))
    }

    pub fn add_panel_open(&self) -> bool {
        self.add_panel_open
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Result<Vec<AppEvent>, LedgerError> {
        let events = match command {
            AppCommand::ToggleAddPanel => {
                self.add_panel_open = !self.add_panel_open;
                vec![AppEvent::AddPanelChanged(self.add_panel_open)]
            }
            AppCommand::SelectFriend(id) => self.select_friend(id),
            AppCommand::ClearSelection => self.apply_selection(Selection::None),
            AppCommand::AddFriend { name, image_ref } => self.apply_add(&name, &image_ref),
            AppCommand::SubmitAddForm => {
                let name = self.add_form.name.clone();
                let image_ref = self.add_form.image_ref.clone();
                self.apply_add(&name, &image_ref)
            }
            AppCommand::SubmitSplit(input) => self.apply_split(input)?,
            AppCommand::SubmitSplitForm => self.apply_split(self.split_form.input())?,
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        };
        Ok(events)
    }

    pub fn add_friend(&mut self, name: &str, image_ref: &str) -> Outcome {
        outcome_of(&self.apply_add(name, image_ref))
    }

    /// Picking a friend always closes the add-friend panel. Clearing the
    /// selection any other way leaves the panel alone.
    pub fn select_friend(&mut self, id: FriendId) -> Vec<AppEvent> {
        let mut events = self.apply_selection(self.selection.toggled(id));
        if self.add_panel_open {
            self.add_panel_open = false;
            events.push(AppEvent::AddPanelChanged(false));
        }
        events
    }

    pub fn toggle_add_panel(&mut self) -> Vec<AppEvent> {
        self.add_panel_open = !self.add_panel_open;
        vec![AppEvent::AddPanelChanged(self.add_panel_open)]
    }

    pub fn clear_selection(&mut self) -> Vec<AppEvent> {
        self.apply_selection(Selection::None)
    }

    pub fn submit_split(
        &mut self,
        bill: Option<i64>,
        my_expense: Option<i64>,
        payer: Payer,
    ) -> Result<Outcome, LedgerError> {
        let events = self.apply_split(SplitBillInput::new(bill, my_expense, payer))?;
        Ok(outcome_of(&events))
    }

    /// The split form lives only while a friend is selected, so it starts
    /// blank after the selection closes. Moving between friends keeps it.
    fn apply_selection(&mut self, next: Selection) -> Vec<AppEvent> {
        if next == Selection::None {
            self.split_form.reset();
        }
        self.selection = next;
        debug!("selection is now {next:?}");
        vec![AppEvent::SelectionChanged(next)]
    }

    fn apply_add(&mut self, name: &str, image_ref: &str) -> Vec<AppEvent> {
        let id = match self.registry.add(name, image_ref) {
            Ok(id) => id,
            Err(reason) => {
                debug!("add friend ignored: {reason}");
                return vec![AppEvent::Rejected(reason)];
            }
        };

        let mut events = vec![AppEvent::FriendAdded(id)];
        self.add_form.reset();
        if self.add_panel_open {
            self.add_panel_open = false;
            events.push(AppEvent::AddPanelChanged(false));
        }
        events.push(self.set_status(&format!("added {name}")));
        events
    }

    fn apply_split(&mut self, input: SplitBillInput) -> Result<Vec<AppEvent>, LedgerError> {
        let Some(friend_id) = self.selection.friend_id() else {
            debug!("split ignored: nothing selected");
            return Ok(vec![AppEvent::Rejected(Rejection::NoSelection)]);
        };
        let friend = self
            .registry
            .get(friend_id)
            .ok_or(LedgerError::FriendNotFound(friend_id))?;
        let name = friend.name.clone();

        let balance = match input.settle(friend.balance) {
            Ok(balance) => balance,
            Err(reason) => {
                debug!("split with friend {friend_id} ignored: {reason}");
                return Ok(vec![AppEvent::Rejected(reason)]);
            }
        };

        self.registry.update_balance(friend_id, balance)?;
        let mut events = vec![AppEvent::BalanceUpdated { friend_id, balance }];
        events.extend(self.apply_selection(Selection::None));
        events.push(self.set_status(&format!("split recorded with {name}")));
        Ok(events)
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

fn outcome_of(events: &[AppEvent]) -> Outcome {
    events
        .iter()
        .find_map(|event| match event {
            AppEvent::Rejected(reason) => Some(Outcome::Rejected(*reason)),
            _ => None,
        })
        .unwrap_or(Outcome::Accepted)
}
