// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Friend, FriendId};

const DEMO_FRIENDS: [(i64, &str, i64); 3] = [
    (118_836, "Clark", -7),
    (933_372, "Sarah", 20),
    (499_476, "Anthony", 0),
];

pub fn demo_friends() -> Vec<Friend> {
    DEMO_FRIENDS
        .iter()
        .map(|(id, name, balance)| Friend {
            id: FriendId::new(*id),
            name: (*name).to_owned(),
            image_ref: format!("https://i.pravatar.cc/48?u={id}"),
            balance: *balance,
        })
        .collect()
}
