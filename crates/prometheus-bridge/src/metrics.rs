use deviation_engine::MonitoringReport;
use physio_core::Subsystem;
use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};

pub struct MonitorMetrics {
    pub deviation_score: GaugeVec,
    pub system_harmony: GaugeVec,
    pub active_alerts: GaugeVec,
    pub metabolic_rate: GaugeVec,
    pub subsystem_strength: GaugeVec,
    pub reports_total: IntCounterVec,
}

impl MonitorMetrics {
    /// Create the collectors and register them on `registry`.
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let deviation_score = GaugeVec::new(
            Opts::new(
                "physio_deviation_score",
                "RMS network deviation from baseline",
            ),
            &["session_id"],
        )?;
        let system_harmony = GaugeVec::new(
            Opts::new("physio_system_harmony", "Harmony score in (0, 1]"),
            &["session_id"],
        )?;
        let active_alerts = GaugeVec::new(
            Opts::new(
                "physio_active_alerts",
                "Metastable alerts raised by the latest report",
            ),
            &["session_id"],
        )?;
        let metabolic_rate = GaugeVec::new(
            Opts::new(
                "physio_metabolic_rate",
                "Baseline-relative metabolic rate",
            ),
            &["session_id"],
        )?;
        let subsystem_strength = GaugeVec::new(
            Opts::new(
                "physio_subsystem_strength",
                "Connectivity strength per subsystem",
            ),
            &["session_id", "subsystem"],
        )?;
        let reports_total = IntCounterVec::new(
            Opts::new(
                "physio_monitoring_reports_total",
                "Monitoring reports produced",
            ),
            &["session_id"],
        )?;

        registry.register(Box::new(deviation_score.clone()))?;
        registry.register(Box::new(system_harmony.clone()))?;
        registry.register(Box::new(active_alerts.clone()))?;
        registry.register(Box::new(metabolic_rate.clone()))?;
        registry.register(Box::new(subsystem_strength.clone()))?;
        registry.register(Box::new(reports_total.clone()))?;

        Ok(Self {
            deviation_score,
            system_harmony,
            active_alerts,
            metabolic_rate,
            subsystem_strength,
            reports_total,
        })
    }

    pub fn observe_report(&self, report: &MonitoringReport) {
        let session = report.session_id.to_string();
        let labels = [session.as_str()];

        self.deviation_score
            .with_label_values(&labels)
            .set(report.deviation_score);
        self.system_harmony
            .with_label_values(&labels)
            .set(report.system_harmony);
        self.active_alerts
            .with_label_values(&labels)
            .set(report.metastable_alerts.len() as f64);
        if let Some(state) = &report.metabolic_state {
            self.metabolic_rate
                .with_label_values(&labels)
                .set(state.metabolic_rate);
        }
        for s in Subsystem::ALL {
            self.subsystem_strength
                .with_label_values(&[session.as_str(), s.name()])
                .set(report.current_state.strength(s));
        }
        self.reports_total.with_label_values(&labels).inc();
    }
}
