//! Store adapter tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use profit_types::{
        Conversation, ConversationStore, PositiveAmount, SeenUsersStore, UserId,
    };

    use crate::{InMemoryConversationStore, JsonSeenUsersStore};

    fn amount(v: f64) -> PositiveAmount {
        PositiveAmount::new(v).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // InMemoryConversationStore
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_get_unknown_user_is_idle() {
        let store = InMemoryConversationStore::new();
        assert_eq!(store.get(UserId::new(1)), Conversation::Idle);
    }

    #[test]
    fn test_set_and_get() {
        let store = InMemoryConversationStore::new();
        let conv = Conversation::AwaitingSellRate {
            eur_amount: amount(1000.0),
        };

        store.set(UserId::new(1), conv);

        assert_eq!(store.get(UserId::new(1)), conv);
        assert_eq!(store.active_conversations(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let store = InMemoryConversationStore::new();
        store.set(UserId::new(1), Conversation::AwaitingAmount);
        store.set(
            UserId::new(1),
            Conversation::AwaitingSellRate {
                eur_amount: amount(5.0),
            },
        );

        assert_eq!(store.get(UserId::new(1)).eur_amount(), Some(amount(5.0)));
        assert_eq!(store.active_conversations(), 1);
    }

    #[test]
    fn test_clear_resets_to_idle() {
        let store = InMemoryConversationStore::new();
        store.set(UserId::new(1), Conversation::AwaitingAmount);

        store.clear(UserId::new(1));

        assert_eq!(store.get(UserId::new(1)), Conversation::Idle);
        assert_eq!(store.active_conversations(), 0);
    }

    #[test]
    fn test_update_to_idle_drops_entry() {
        let store = InMemoryConversationStore::new();
        store.set(UserId::new(1), Conversation::AwaitingAmount);

        let was = store.update(UserId::new(1), |conv| {
            let was = *conv;
            *conv = Conversation::Idle;
            was
        });

        assert_eq!(was, Conversation::AwaitingAmount);
        assert_eq!(store.active_conversations(), 0);
    }

    #[test]
    fn test_users_are_independent() {
        let store = InMemoryConversationStore::new();
        store.set(
            UserId::new(1),
            Conversation::AwaitingSellRate {
                eur_amount: amount(1000.0),
            },
        );
        store.set(
            UserId::new(2),
            Conversation::AwaitingSellRate {
                eur_amount: amount(20.0),
            },
        );

        store.clear(UserId::new(2));

        assert_eq!(store.get(UserId::new(1)).eur_amount(), Some(amount(1000.0)));
        assert_eq!(store.get(UserId::new(2)), Conversation::Idle);
    }

    #[test]
    fn test_concurrent_updates_per_user_are_atomic() {
        let store = Arc::new(InMemoryConversationStore::new());
        let threads: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let user = UserId::new(i);
                    for n in 1..=200 {
                        store.update(user, |conv| {
                            *conv = Conversation::AwaitingSellRate {
                                eur_amount: PositiveAmount::new(n as f64).unwrap(),
                            };
                        });
                    }
                })
            })
            .collect();

        for t in threads {
            t.join().unwrap();
        }

        for i in 0..8 {
            assert_eq!(store.get(UserId::new(i)).eur_amount(), Some(amount(200.0)));
        }
        assert_eq!(store.active_conversations(), 8);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JsonSeenUsersStore
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_mark_seen_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSeenUsersStore::open(dir.path().join("seen.json")).await;

        assert!(store.mark_seen(UserId::new(7)).await.unwrap());
        assert!(!store.mark_seen(UserId::new(7)).await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_seen_users_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");

        let store = JsonSeenUsersStore::open(&path).await;
        store.mark_seen(UserId::new(3)).await.unwrap();
        store.mark_seen(UserId::new(1)).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[1,3]");

        let reopened = JsonSeenUsersStore::open(&path).await;
        assert_eq!(reopened.len().await, 2);
        assert!(!reopened.mark_seen(UserId::new(1)).await.unwrap());
        assert!(!reopened.mark_seen(UserId::new(3)).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonSeenUsersStore::open(&path).await;

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unwritable_path_still_marks_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        let store = JsonSeenUsersStore::open(dir.path()).await;

        assert!(store.mark_seen(UserId::new(9)).await.unwrap());
        assert!(!store.mark_seen(UserId::new(9)).await.unwrap());
    }
}
