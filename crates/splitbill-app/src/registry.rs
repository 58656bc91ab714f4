// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use log::{debug, info};

use crate::{Friend, FriendId, IdGenerator, LedgerError, Rejection};

/// Friends in insertion order, plus the id source for new ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FriendRegistry {
    friends: Vec<Friend>,
    ids: IdGenerator,
}

impl FriendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded friends keep their ids; generated ids continue above the
    /// largest one. Later duplicates of an id are dropped.
    pub fn with_friends(friends: Vec<Friend>) -> Self {
        let mut unique: Vec<Friend> = Vec::with_capacity(friends.len());
        for friend in friends {
            if unique.iter().any(|existing| existing.id == friend.id) {
                debug!("dropping duplicate seeded friend id {}", friend.id);
                continue;
            }
            unique.push(friend);
        }
        let ids = IdGenerator::starting_after(unique.iter().map(|friend| friend.id));
        Self {
            friends: unique,
            ids,
        }
    }

    pub fn list(&self) -> &[Friend] {
        &self.friends
    }

    pub fn get(&self, id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|friend| friend.id == id)
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn add(&mut self, name: &str, image_ref: &str) -> Result<FriendId, Rejection> {
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        if image_ref.is_empty() {
            return Err(Rejection::EmptyImageRef);
        }

        let Some(id) = self.ids.next_id() else {
            return Err(Rejection::IdsExhausted);
        };
        self.friends.push(Friend {
            id,
            name: name.to_owned(),
            image_ref: format!("{image_ref}?={id}"),
            balance: 0,
        });
        info!("added friend {id} ({name})");
        Ok(id)
    }

    pub fn update_balance(&mut self, id: FriendId, balance: i64) -> Result<(), LedgerError> {
        let friend = self
            .friends
            .iter_mut()
            .find(|friend| friend.id == id)
            .ok_or(LedgerError::FriendNotFound(id))?;
        info!(
            "balance for friend {id} changed from {} to {balance}",
            friend.balance
        );
        friend.balance = balance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FriendRegistry;
    use crate::{Friend, FriendId, LedgerError, Rejection};
    use anyhow::Result;

    fn seeded(id: i64, name: &str, balance: i64) -> Friend {
        Friend {
            id: FriendId::new(id),
            name: name.to_owned(),
            image_ref: format!("https://i.pravatar.cc/48?u={id}"),
            balance,
        }
    }

    #[test]
    fn add_appends_friend_with_zero_balance() {
        let mut registry = FriendRegistry::with_friends(vec![seeded(7, "Clark", -7)]);

        let id = registry.add("Dana", "https://i.pravatar.cc/48");
        assert_eq!(id, Ok(FriendId::new(8)));
        assert_eq!(registry.len(), 2);

        let added = &registry.list()[1];
        assert_eq!(added.name, "Dana");
        assert_eq!(added.balance, 0);
        assert_eq!(added.image_ref, "https://i.pravatar.cc/48?=8");
    }

    #[test]
    fn add_rejects_empty_fields_without_changing_registry() {
        let mut registry = FriendRegistry::with_friends(vec![seeded(1, "Clark", -7)]);
        let before = registry.clone();

        assert_eq!(
            registry.add("", "https://i.pravatar.cc/48"),
            Err(Rejection::EmptyName)
        );
        assert_eq!(registry.add("Dana", ""), Err(Rejection::EmptyImageRef));
        assert_eq!(registry.add("", ""), Err(Rejection::EmptyName));
        assert_eq!(registry, before);
    }

    #[test]
    fn duplicate_image_refs_are_made_unique() -> Result<()> {
        let mut registry = FriendRegistry::new();
        let first = registry.add("Dana", "https://i.pravatar.cc/48")?;
        let second = registry.add("Dana", "https://i.pravatar.cc/48")?;

        assert_ne!(first, second);
        let images = registry
            .list()
            .iter()
            .map(|friend| friend.image_ref.as_str())
            .collect::<Vec<_>>();
        assert_ne!(images[0], images[1]);
        Ok(())
    }

    #[test]
    fn update_balance_touches_only_the_target() -> Result<()> {
        let mut registry =
            FriendRegistry::with_friends(vec![seeded(1, "Clark", -7), seeded(2, "Sarah", 20)]);

        registry.update_balance(FriendId::new(2), -15)?;
        assert_eq!(registry.list()[0].balance, -7);
        assert_eq!(registry.list()[1].balance, -15);
        Ok(())
    }

    #[test]
    fn update_balance_reports_unknown_friend() {
        let mut registry = FriendRegistry::with_friends(vec![seeded(1, "Clark", -7)]);
        let before = registry.clone();

        let error = registry
            .update_balance(FriendId::new(99), 10)
            .expect_err("unknown id should fail");
        assert_eq!(error, LedgerError::FriendNotFound(FriendId::new(99)));
        assert_eq!(registry, before);
    }

    #[test]
    fn seeded_duplicates_keep_first_entry() {
        let registry =
            FriendRegistry::with_friends(vec![seeded(3, "Clark", -7), seeded(3, "Imposter", 1)]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list()[0].name, "Clark");
    }

    #[test]
    fn add_after_id_space_is_used_up_is_rejected() {
        let mut registry = FriendRegistry::with_friends(vec![seeded(i64::MAX - 1, "Clark", 0)]);

        assert_eq!(registry.add("A", "img"), Ok(FriendId::new(i64::MAX)));
        assert_eq!(registry.add("B", "img"), Err(Rejection::IdsExhausted));
        assert_eq!(registry.add("C", "img"), Err(Rejection::IdsExhausted));

        let ids = registry.list().iter().map(|friend| friend.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![FriendId::new(i64::MAX - 1), FriendId::new(i64::MAX)]);
    }

    #[test]
    fn seeding_the_largest_id_leaves_no_room_for_new_friends() {
        let mut registry = FriendRegistry::with_friends(vec![seeded(i64::MAX, "Clark", 0)]);
        assert_eq!(registry.add("A", "img"), Err(Rejection::IdsExhausted));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_by_id() {
        let registry =
            FriendRegistry::with_friends(vec![seeded(1, "Clark", -7), seeded(2, "Sarah", 20)]);
        assert_eq!(
            registry.get(FriendId::new(2)).map(|friend| friend.name.as_str()),
            Some("Sarah")
        );
        assert_eq!(
            registry.list().iter().map(|friend| friend.id).collect::<Vec<_>>(),
            vec![FriendId::new(1), FriendId::new(2)]
        );
        assert!(registry.get(FriendId::new(3)).is_none());
        assert!(!registry.is_empty());
    }
}
