use crate::baseline::BaselineRecord;
use crate::monitor::{HealthMonitor, MonitoringReport};
use crate::network::{CouplingNetwork, NetworkModel};
use physio_core::{MonitorResult, Observation};
use std::sync::{Arc, PoisonError, RwLock};

/// A session shared across threads. Baseline replacement takes the write
/// lock; monitoring passes share the read lock.
pub struct SharedHealthMonitor<M: NetworkModel = CouplingNetwork> {
    inner: Arc<RwLock<HealthMonitor<M>>>,
}

impl<M: NetworkModel> Clone for SharedHealthMonitor<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: NetworkModel> SharedHealthMonitor<M> {
    pub fn new(monitor: HealthMonitor<M>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(monitor)),
        }
    }

    pub fn initialize_baseline(&self, obs: &Observation) -> BaselineRecord {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.initialize_baseline(obs).clone()
    }

    pub fn real_time_monitoring(&self, obs: &Observation) -> MonitorResult<MonitoringReport> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.real_time_monitoring(obs)
    }

    pub fn baseline(&self) -> Option<BaselineRecord> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.baseline().cloned()
    }
}
