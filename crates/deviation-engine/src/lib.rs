mod alerts;
mod baseline;
mod deviation;
mod monitor;
mod network;
mod shared;

#[cfg(test)]
mod tests;

pub use alerts::{classify_alerts, generate_insights, MetastableAlert};
pub use baseline::{BaselineRecord, DynamicRange};
pub use deviation::{deviation_score, system_harmony};
pub use monitor::{HealthMonitor, MonitoringReport};
pub use network::{CouplingNetwork, NetworkModel};
pub use shared::SharedHealthMonitor;
