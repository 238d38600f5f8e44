use crate::MonitorMetrics;
use deviation_engine::MonitoringReport;

/// Record `current` and report whether harmony fell since `previous`.
pub fn harmony_declined(
    metrics: &MonitorMetrics,
    previous: &MonitoringReport,
    current: &MonitoringReport,
) -> bool {
    metrics.observe_report(current);
    current.system_harmony < previous.system_harmony
}
