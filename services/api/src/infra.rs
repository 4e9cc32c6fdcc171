use enrollment::age_groups::AgeGroupRegistry;
use enrollment::enrollments::{EnrollmentService, EnrollmentWorker};
use enrollment::memory::{MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Registry = AgeGroupRegistry<MemoryAgeGroupStore>;
pub(crate) type Service = EnrollmentService<MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue>;
pub(crate) type Worker = EnrollmentWorker<MemoryAgeGroupStore, MemoryEnrollmentStore, MemoryQueue>;

/// Backends and services shared by the HTTP layer and the worker.
pub(crate) struct Pipeline {
    pub(crate) registry: Arc<Registry>,
    pub(crate) store: Arc<MemoryEnrollmentStore>,
    pub(crate) queue: Arc<MemoryQueue>,
    pub(crate) service: Arc<Service>,
}

impl Pipeline {
    pub(crate) fn in_memory(queue_name: &str) -> Self {
        let registry = Arc::new(AgeGroupRegistry::new(Arc::new(
            MemoryAgeGroupStore::default(),
        )));
        let store = Arc::new(MemoryEnrollmentStore::default());
        let queue = Arc::new(MemoryQueue::new(queue_name));
        let service = Arc::new(EnrollmentService::new(
            registry.clone(),
            store.clone(),
            queue.clone(),
        ));

        Self {
            registry,
            store,
            queue,
            service,
        }
    }

    pub(crate) fn worker(&self, poll_delay: Duration) -> Worker {
        EnrollmentWorker::new(
            self.registry.clone(),
            self.store.clone(),
            self.queue.clone(),
        )
        .with_poll_delay(poll_delay)
    }
}
