use std::cmp::Reverse;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::RwLock;

use super::model::{Metadata, Thread};
use super::{Error, Id};

/// Authoritative local view of the thread list, reconciled against backend
/// mutations. Every mutation is one attempt, no retry: a failed call leaves
/// the list exactly as it was (the fork tagging step being the one documented
/// exception).
pub struct ThreadList {
    api: super::Api,
    threads: RwLock<Vec<Thread>>,
}

impl ThreadList {
    pub fn new(api: super::Api) -> Self {
        Self {
            api,
            threads: RwLock::new(Vec::new()),
        }
    }

    pub async fn snapshot(&self) -> Vec<Thread> {
        self.threads.read().await.clone()
    }

    pub async fn find(&self, id: &Id) -> Option<Thread> {
        self.threads.read().await.iter().find(|t| &t.id == id).cloned()
    }

    /// The fork's parent, when it is present in the loaded list; an absent
    /// parent means the view omits the affordance.
    pub async fn parent_of(&self, thread: &Thread) -> Option<Thread> {
        let parent_id = thread.metadata.parent_thread_id.clone()?;
        self.find(&parent_id).await
    }

    /// Replaces the local list wholesale. Overlapping calls are not
    /// de-duplicated; callers must avoid issuing them concurrently.
    pub async fn load(&self) -> super::Result<usize> {
        let mut threads = self.api.list().await?;
        Self::sort(&mut threads);

        let count = threads.len();
        *self.threads.write().await = threads;
        info!("thread list loaded, {count} threads");
        Ok(count)
    }

    /// Pinned threads first, then newest first. The sort is stable: entries
    /// with equal keys keep their input order.
    pub fn sort(threads: &mut [Thread]) {
        threads.sort_by_key(|t| (Reverse(t.is_pinned()), Reverse(t.created_at)));
    }

    /// Sends the negation of the current flag; `pinned_at` is set only when
    /// pinning. No optimistic mutation is applied, so a failure needs no
    /// rollback. When two toggles race, the last response to resolve wins.
    pub async fn toggle_pin(&self, id: &Id) -> super::Result<Thread> {
        let current = self.find(id).await.ok_or(Error::NotFound(id.clone()))?;
        let pinning = !current.is_pinned();

        let patch = Metadata {
            is_pinned: Some(pinning),
            pinned_at: pinning.then(Utc::now),
            ..Default::default()
        };
        let updated = self.api.update_metadata(id, &patch).await?;

        let mut threads = self.threads.write().await;
        if let Some(entry) = threads.iter_mut().find(|t| &t.id == id) {
            *entry = updated.clone();
        }
        Self::sort(&mut threads);
        Ok(updated)
    }

    /// Duplicates a thread, then tags the duplicate as a fork of the
    /// original. When tagging fails after the duplication succeeded, the
    /// untagged duplicate stays server-side and the error says so; it is not
    /// auto-reconciled and appears on the next load.
    pub async fn copy(&self, id: &Id) -> super::Result<Thread> {
        let fresh = self.api.copy(id).await?;

        let patch = Metadata {
            is_fork: Some(true),
            parent_thread_id: Some(id.clone()),
            created_at: Some(Utc::now()),
            ..Default::default()
        };
        let tagged = match self.api.update_metadata(&fresh.id, &patch).await {
            Ok(tagged) => tagged,
            Err(source) => {
                warn!("thread {} left untagged after copy of {id}", fresh.id);
                return Err(Error::ForkNotTagged {
                    fork: fresh.id,
                    parent: id.clone(),
                    source: Box::new(source),
                });
            }
        };

        let mut threads = self.threads.write().await;
        threads.insert(0, tagged.clone());
        Self::sort(&mut threads);
        Ok(tagged)
    }

    /// Callers must have confirmed with the user before invoking this.
    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        self.api.delete(id).await?;
        self.threads.write().await.retain(|t| &t.id != id);
        info!("thread {id} deleted");
        Ok(())
    }
}
