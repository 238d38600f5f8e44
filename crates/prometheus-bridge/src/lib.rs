mod guards;
mod metrics;


pub use guards::harmony_declined;
pub use metrics::MonitorMetrics;
