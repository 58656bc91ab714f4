// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use splitbill_app::{AppState, FriendId, Payer, SplitBillInput, demo_friends};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];

const AVATAR_HOSTS: [&str; 3] = [
    "https://i.pravatar.cc/48",
    "https://avatars.example.com/48",
    "https://img.example.net/u",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFriend {
    pub name: String,
    pub image_ref: String,
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Debug, Clone)]
pub struct FriendFaker {
    rng: DeterministicRng,
}

impl FriendFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn friend(&mut self) -> NewFriend {
        NewFriend {
            name: self.pick(&FIRST_NAMES).to_owned(),
            image_ref: self.pick(&AVATAR_HOSTS).to_owned(),
        }
    }

    /// Like [`FriendFaker::friend`], but each field is blanked now and then.
    pub fn maybe_blank_friend(&mut self) -> NewFriend {
        let mut friend = self.friend();
        match self.rng.int_n(4) {
            0 => friend.name.clear(),
            1 => friend.image_ref.clear(),
            _ => {}
        }
        friend
    }

    /// A complete bill whose friend share is never zero.
    pub fn split(&mut self) -> SplitBillInput {
        let bill = self.int_range_i64(1, 500);
        let my_expense = self.int_range_i64(0, bill - 1);
        let payer = if self.rng.bool() {
            Payer::User
        } else {
            Payer::Friend
        };
        SplitBillInput::new(Some(bill), Some(my_expense), payer)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

pub fn demo_state() -> AppState {
    AppState::with_friends(demo_friends())
}

pub fn state_with_generated_friends(seed: u64, count: usize) -> Result<AppState> {
    let mut faker = FriendFaker::new(seed);
    let mut state = AppState::default();
    for _ in 0..count {
        let friend = faker.friend();
        if !state.add_friend(&friend.name, &friend.image_ref).is_accepted() {
            bail!("generated friend {} was rejected", friend.name);
        }
    }
    Ok(state)
}

pub fn friend_id_by_name(state: &AppState, name: &str) -> Result<FriendId> {
    state
        .list_friends()
        .iter()
        .find(|friend| friend.name == name)
        .map(|friend| friend.id)
        .with_context(|| format!("no friend named {name}"))
}
