#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use chatconnect_client::thread::api::ThreadApi;
    use chatconnect_client::thread::model::{Metadata, Status, Thread};
    use chatconnect_client::thread::service::ThreadList;
    use chatconnect_client::thread::{Error, Id};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn thread(id: &str, created_at: DateTime<Utc>, pinned: bool) -> Thread {
        Thread {
            id: Id::from(id),
            status: Status::Idle,
            created_at,
            values: None,
            metadata: Metadata {
                is_pinned: pinned.then_some(true),
                pinned_at: pinned.then(|| created_at),
                ..Default::default()
            },
        }
    }

    /// Backend double: keeps its own thread set, records every PATCH, and
    /// fails on demand.
    struct FakeThreadApi {
        threads: Mutex<Vec<Thread>>,
        patches: Mutex<Vec<(Id, Metadata)>>,
        fail_patch: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl FakeThreadApi {
        fn with(threads: Vec<Thread>) -> Arc<Self> {
            Arc::new(Self {
                threads: Mutex::new(threads),
                patches: Mutex::new(Vec::new()),
                fail_patch: AtomicBool::new(false),
                fail_delete: AtomicBool::new(false),
            })
        }

        fn rejected() -> Error {
            Error::from(chatconnect_client::integration::Error::Failure(
                "backend said no".into(),
            ))
        }

        fn patches(&self) -> Vec<(Id, Metadata)> {
            self.patches.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ThreadApi for FakeThreadApi {
        async fn list(&self) -> Result<Vec<Thread>, Error> {
            Ok(self.threads.lock().unwrap().clone())
        }

        async fn copy(&self, id: &Id) -> Result<Thread, Error> {
            let mut threads = self.threads.lock().unwrap();
            let original = threads
                .iter()
                .find(|t| &t.id == id)
                .cloned()
                .ok_or(Error::NotFound(id.clone()))?;

            let duplicate = Thread {
                id: Id(format!("{id}-copy")),
                metadata: Metadata::default(),
                ..original
            };
            threads.push(duplicate.clone());
            Ok(duplicate)
        }

        async fn update_metadata(&self, id: &Id, metadata: &Metadata) -> Result<Thread, Error> {
            self.patches
                .lock()
                .unwrap()
                .push((id.clone(), metadata.clone()));
            if self.fail_patch.load(Ordering::SeqCst) {
                return Err(Self::rejected());
            }

            let mut threads = self.threads.lock().unwrap();
            let thread = threads
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or(Error::NotFound(id.clone()))?;

            // Partial update: only the fields present in the patch change.
            if let Some(is_fork) = metadata.is_fork {
                thread.metadata.is_fork = Some(is_fork);
            }
            if let Some(parent) = &metadata.parent_thread_id {
                thread.metadata.parent_thread_id = Some(parent.clone());
            }
            if let Some(is_pinned) = metadata.is_pinned {
                thread.metadata.is_pinned = Some(is_pinned);
                thread.metadata.pinned_at = metadata.pinned_at;
            }
            Ok(thread.clone())
        }

        async fn delete(&self, id: &Id) -> Result<(), Error> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(Self::rejected());
            }
            self.threads.lock().unwrap().retain(|t| &t.id != id);
            Ok(())
        }
    }

    fn ids(threads: &[Thread]) -> Vec<&str> {
        threads.iter().map(|t| t.id.0.as_str()).collect()
    }

    #[test]
    fn sort_puts_pinned_first_and_newest_next() {
        let base = base_time();
        let mut threads = vec![
            thread("old", base - Duration::hours(2), false),
            thread("new", base, false),
            thread("pinned", base - Duration::days(1), true),
        ];

        ThreadList::sort(&mut threads);
        assert_eq!(ids(&threads), vec!["pinned", "new", "old"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let base = base_time();
        let mut threads = vec![
            thread("a", base, false),
            thread("b", base, false),
            thread("p1", base, true),
            thread("p2", base, true),
        ];

        ThreadList::sort(&mut threads);
        assert_eq!(ids(&threads), vec!["p1", "p2", "a", "b"]);
    }

    #[tokio::test]
    async fn load_replaces_the_list_wholesale() {
        let base = base_time();
        let api = FakeThreadApi::with(vec![
            thread("t-1", base, false),
            thread("t-2", base + Duration::minutes(1), false),
        ]);
        let list = ThreadList::new(api.clone());

        assert_eq!(list.load().await.unwrap(), 2);
        assert_eq!(ids(&list.snapshot().await), vec!["t-2", "t-1"]);
    }

    #[tokio::test]
    async fn toggle_pin_sends_the_negation_with_a_timestamp() {
        let api = FakeThreadApi::with(vec![thread("t-1", base_time(), false)]);
        let list = ThreadList::new(api.clone());
        list.load().await.unwrap();

        let updated = list.toggle_pin(&Id::from("t-1")).await.unwrap();
        assert!(updated.is_pinned());

        let patches = api.patches();
        let (id, patch) = &patches[0];
        assert_eq!(id, &Id::from("t-1"));
        assert_eq!(patch.is_pinned, Some(true));
        assert!(patch.pinned_at.is_some());
        assert_eq!(patch.is_fork, None);

        let updated = list.toggle_pin(&Id::from("t-1")).await.unwrap();
        assert!(!updated.is_pinned());

        let patches = api.patches();
        let (_, patch) = &patches[1];
        assert_eq!(patch.is_pinned, Some(false));
        assert!(patch.pinned_at.is_none());
    }

    #[tokio::test]
    async fn toggle_pin_failure_leaves_the_list_untouched() {
        let api = FakeThreadApi::with(vec![thread("t-1", base_time(), false)]);
        let list = ThreadList::new(api.clone());
        list.load().await.unwrap();

        api.fail_patch.store(true, Ordering::SeqCst);
        assert!(list.toggle_pin(&Id::from("t-1")).await.is_err());

        let snapshot = list.snapshot().await;
        assert!(!snapshot[0].is_pinned());
    }

    #[tokio::test]
    async fn toggle_pin_on_an_unknown_thread_is_not_found() {
        let api = FakeThreadApi::with(vec![]);
        let list = ThreadList::new(api.clone());

        match list.toggle_pin(&Id::from("missing")).await {
            Err(Error::NotFound(id)) => assert_eq!(id, Id::from("missing")),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(api.patches().is_empty());
    }

    #[tokio::test]
    async fn copy_tags_the_duplicate_as_a_fork() {
        let api = FakeThreadApi::with(vec![thread("t-1", base_time(), false)]);
        let list = ThreadList::new(api.clone());
        list.load().await.unwrap();

        let fork = list.copy(&Id::from("t-1")).await.unwrap();
        assert_eq!(fork.id, Id::from("t-1-copy"));
        assert!(fork.is_fork());
        assert_eq!(fork.metadata.parent_thread_id, Some(Id::from("t-1")));

        let snapshot = list.snapshot().await;
        assert!(snapshot.iter().any(|t| t.id == fork.id));

        let parent = list.parent_of(&fork).await.unwrap();
        assert_eq!(parent.id, Id::from("t-1"));
    }

    #[tokio::test]
    async fn failed_tagging_leaves_an_untagged_duplicate_behind() {
        let api = FakeThreadApi::with(vec![thread("t-1", base_time(), false)]);
        let list = ThreadList::new(api.clone());
        list.load().await.unwrap();

        api.fail_patch.store(true, Ordering::SeqCst);
        match list.copy(&Id::from("t-1")).await {
            Err(Error::ForkNotTagged { fork, parent, .. }) => {
                assert_eq!(fork, Id::from("t-1-copy"));
                assert_eq!(parent, Id::from("t-1"));
            }
            other => panic!("expected ForkNotTagged, got {other:?}"),
        }

        // Not reconciled locally until the next load.
        assert_eq!(ids(&list.snapshot().await), vec!["t-1"]);

        api.fail_patch.store(false, Ordering::SeqCst);
        list.load().await.unwrap();
        let snapshot = list.snapshot().await;
        let duplicate = snapshot
            .iter()
            .find(|t| t.id == Id::from("t-1-copy"))
            .expect("duplicate should exist server-side");
        assert!(!duplicate.is_fork());
    }

    #[tokio::test]
    async fn delete_removes_the_entry_only_on_success() {
        let base = base_time();
        let api = FakeThreadApi::with(vec![
            thread("t-1", base, false),
            thread("t-2", base + Duration::minutes(1), false),
        ]);
        let list = ThreadList::new(api.clone());
        list.load().await.unwrap();

        api.fail_delete.store(true, Ordering::SeqCst);
        assert!(list.delete(&Id::from("t-1")).await.is_err());
        assert_eq!(list.snapshot().await.len(), 2);

        api.fail_delete.store(false, Ordering::SeqCst);
        list.delete(&Id::from("t-1")).await.unwrap();
        assert_eq!(ids(&list.snapshot().await), vec!["t-2"]);
    }
}
