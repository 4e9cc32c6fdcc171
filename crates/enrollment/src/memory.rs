//! In-process backends for the stores and the queue.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::age_groups::{AgeGroup, AgeGroupStore, AgeRange};
use crate::enrollments::{Enrollment, EnrollmentDocument, EnrollmentDraft, EnrollmentStore};
use crate::error::StoreError;
use crate::ident::RecordId;
use crate::queue::{EnrollmentQueue, QueueError};

fn poisoned(collection: &str) -> StoreError {
    StoreError::Unavailable(format!("{collection} collection lock poisoned"))
}

#[derive(Debug, Default)]
pub struct MemoryAgeGroupStore {
    groups: RwLock<Vec<AgeGroup>>,
}

#[async_trait]
impl AgeGroupStore for MemoryAgeGroupStore {
    async fn insert(&self, range: AgeRange) -> Result<AgeGroup, StoreError> {
        let group = AgeGroup::new(RecordId::generate(), range);
        self.groups
            .write()
            .map_err(|_| poisoned("age_groups"))?
            .push(group.clone());
        Ok(group)
    }

    async fn find_overlapping(&self, range: AgeRange) -> Result<Option<AgeGroup>, StoreError> {
        let groups = self.groups.read().map_err(|_| poisoned("age_groups"))?;
        Ok(groups
            .iter()
            .find(|group| group.range().overlaps(&range))
            .cloned())
    }

    async fn find_containing(&self, age: u32) -> Result<Option<AgeGroup>, StoreError> {
        let groups = self.groups.read().map_err(|_| poisoned("age_groups"))?;
        Ok(groups
            .iter()
            .find(|group| group.range().contains(age))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<AgeGroup>, StoreError> {
        let groups = self.groups.read().map_err(|_| poisoned("age_groups"))?;
        Ok(groups.clone())
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        let mut groups = self.groups.write().map_err(|_| poisoned("age_groups"))?;
        let before = groups.len();
        groups.retain(|group| &group.id != id);
        Ok(groups.len() != before)
    }
}

/// Enrollment documents kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryEnrollmentStore {
    documents: RwLock<Vec<EnrollmentDocument>>,
}

impl MemoryEnrollmentStore {
    /// Load a raw document as-is, e.g. one written before statuses existed.
    pub fn import(&self, document: EnrollmentDocument) -> Result<(), StoreError> {
        self.documents
            .write()
            .map_err(|_| poisoned("enrollments"))?
            .push(document);
        Ok(())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    async fn insert(&self, draft: EnrollmentDraft) -> Result<Enrollment, StoreError> {
        let document = EnrollmentDocument::from_draft(RecordId::generate(), draft);
        self.documents
            .write()
            .map_err(|_| poisoned("enrollments"))?
            .push(document.clone());
        Ok(document.into())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Enrollment>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned("enrollments"))?;
        Ok(documents
            .iter()
            .find(|document| document.cpf == cpf)
            .cloned()
            .map(Enrollment::from))
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Enrollment>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned("enrollments"))?;
        Ok(documents
            .iter()
            .find(|document| &document.id == id)
            .cloned()
            .map(Enrollment::from))
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned("enrollments"))?;
        Ok(documents.iter().cloned().map(Enrollment::from).collect())
    }
}

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<String>,
    closed: bool,
}

/// Named FIFO list with a blocking pop.
#[derive(Debug)]
pub struct MemoryQueue {
    name: String,
    state: Mutex<QueueState>,
    available: Notify,
}

impl MemoryQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(QueueState::default()),
            available: Notify::new(),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, QueueState>, QueueError> {
        self.state
            .lock()
            .map_err(|_| QueueError::Unavailable(format!("queue '{}' lock poisoned", self.name)))
    }

    pub fn len(&self) -> usize {
        self.state().map(|state| state.items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Refuse further pushes and wake blocked consumers once the backlog drains.
    pub fn close(&self) {
        if let Ok(mut state) = self.state() {
            state.closed = true;
        }
        self.available.notify_waiters();
    }
}

#[async_trait]
impl EnrollmentQueue for MemoryQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn push(&self, payload: String) -> Result<(), QueueError> {
        {
            let mut state = self.state()?;
            if state.closed {
                return Err(QueueError::Closed);
            }
            state.items.push_back(payload);
        }
        self.available.notify_one();
        Ok(())
    }

    async fn pop(&self) -> Result<String, QueueError> {
        loop {
            // Registered before inspecting state so a concurrent push or close is not missed.
            let notified = self.available.notified();
            {
                let mut state = self.state()?;
                if let Some(payload) = state.items.pop_front() {
                    return Ok(payload);
                }
                if state.closed {
                    return Err(QueueError::Closed);
                }
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrollments::EnrollmentStatus;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn queue_delivers_in_fifo_order() {
        let queue = MemoryQueue::new("enrollments");
        for payload in ["first", "second", "third"] {
            queue.push(payload.to_string()).await.expect("push");
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().await.expect("pop"), "first");
        assert_eq!(queue.pop().await.expect("pop"), "second");
        assert_eq!(queue.pop().await.expect("pop"), "third");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn pop_waits_for_a_push() {
        let queue = Arc::new(MemoryQueue::new("enrollments"));
        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.pop().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!consumer.is_finished());

        queue.push("late".to_string()).await.expect("push");
        let popped = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer wakes")
            .expect("task joins")
            .expect("pop succeeds");
        assert_eq!(popped, "late");
    }

    #[tokio::test]
    async fn close_drains_backlog_then_wakes_consumers() {
        let queue = Arc::new(MemoryQueue::new("enrollments"));
        queue.push("pending".to_string()).await.expect("push");
        queue.close();

        assert_eq!(
            queue.push("rejected".to_string()).await,
            Err(QueueError::Closed)
        );
        assert_eq!(queue.pop().await.expect("backlog drains"), "pending");
        assert_eq!(queue.pop().await, Err(QueueError::Closed));

        let blocked = Arc::new(MemoryQueue::new("idle"));
        let consumer = {
            let blocked = blocked.clone();
            tokio::spawn(async move { blocked.pop().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        blocked.close();
        let result = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer wakes")
            .expect("task joins");
        assert_eq!(result, Err(QueueError::Closed));
    }

    #[tokio::test]
    async fn age_group_store_filters_by_range() {
        let store = MemoryAgeGroupStore::default();
        let group = store
            .insert(AgeRange::new(18, 60).expect("valid"))
            .await
            .expect("insert");

        let overlapping = store
            .find_overlapping(AgeRange::new(60, 70).expect("valid"))
            .await
            .expect("query");
        assert_eq!(overlapping, Some(group.clone()));
        assert!(store
            .find_overlapping(AgeRange::new(61, 70).expect("valid"))
            .await
            .expect("query")
            .is_none());
        assert_eq!(store.find_containing(18).await.expect("query"), Some(group.clone()));
        assert!(store.find_containing(17).await.expect("query").is_none());

        assert!(store.delete(&group.id).await.expect("delete"));
        assert!(!store.delete(&group.id).await.expect("second delete"));
        assert!(store.find_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn enrollment_store_assigns_ids_and_reads_legacy_documents() {
        let store = MemoryEnrollmentStore::default();
        let stored = store
            .insert(EnrollmentDraft {
                name: "Ana".to_string(),
                cpf: "52998224725".to_string(),
                age: 30,
                status: EnrollmentStatus::Completed,
            })
            .await
            .expect("insert");
        assert_eq!(
            store.find_by_id(&stored.id).await.expect("query"),
            Some(stored.clone())
        );
        assert_eq!(
            store.find_by_cpf("52998224725").await.expect("query"),
            Some(stored)
        );

        let legacy_id = RecordId::parse("64b7f0c2a1e4d3b2c1a0f9e8").expect("valid id");
        store
            .import(EnrollmentDocument {
                id: legacy_id.clone(),
                name: "Bruno".to_string(),
                cpf: "11144477735".to_string(),
                age: 40,
                status: None,
            })
            .expect("import");
        let legacy = store
            .find_by_id(&legacy_id)
            .await
            .expect("query")
            .expect("present");
        assert_eq!(legacy.status, EnrollmentStatus::Completed);
        assert_eq!(store.find_all().await.expect("list").len(), 2);
    }
}
