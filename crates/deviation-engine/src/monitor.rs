use crate::alerts::{classify_alerts, generate_insights, MetastableAlert};
use crate::baseline::BaselineRecord;
use crate::deviation::{deviation_score, system_harmony};
use crate::network::{CouplingNetwork, NetworkModel};
use chrono::{DateTime, Utc};
use metabolic_mirror::{MetabolicConfig, MetabolicEstimate, MetabolicMirror, MetabolicState};
use physio_core::{MonitorConfig, MonitorError, MonitorResult, NetworkState, Observation, PhysioParameter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Scored result of one monitoring pass. Not retained by the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitoringReport {
    pub session_id: Uuid,
    pub observed_at: DateTime<Utc>,
    pub current_state: NetworkState,
    pub deviation_score: f64,
    pub system_harmony: f64,
    pub metastable_alerts: Vec<MetastableAlert>,
    pub recommendations: Vec<String>,
    pub out_of_range: Vec<PhysioParameter>,
    pub metabolic: MetabolicEstimate,
    /// `None` when the metabolic baseline has a zero heart rate or impedance.
    pub metabolic_state: Option<MetabolicState>,
}

impl MonitoringReport {
    pub fn alert_messages(&self) -> Vec<&'static str> {
        self.metastable_alerts.iter().map(|a| a.message()).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// One monitoring session for one subject.
pub struct HealthMonitor<M: NetworkModel = CouplingNetwork> {
    session_id: Uuid,
    config: MonitorConfig,
    model: M,
    baseline: Option<BaselineRecord>,
    metabolic: MetabolicMirror,
}

impl Default for HealthMonitor<CouplingNetwork> {
    fn default() -> Self {
        let config = MonitorConfig::default();
        Self::from_parts(config, CouplingNetwork::new(config.network))
    }
}

impl HealthMonitor<CouplingNetwork> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MonitorConfig) -> MonitorResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, CouplingNetwork::new(config.network)))
    }
}

impl<M: NetworkModel> HealthMonitor<M> {
    /// Session driven by a custom network model. `config.network` is ignored.
    pub fn with_model(config: MonitorConfig, model: M) -> MonitorResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, model))
    }

    fn from_parts(config: MonitorConfig, model: M) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            config,
            model,
            baseline: None,
            metabolic: MetabolicMirror::new(config.metabolic),
        }
    }

    pub fn with_metabolic_config(mut self, cfg: MetabolicConfig) -> MonitorResult<Self> {
        cfg.validate()?;
        let baseline = self.metabolic.baseline().copied();
        self.config.metabolic = cfg;
        self.metabolic = MetabolicMirror::new(cfg);
        if let Some(obs) = baseline {
            self.metabolic.set_baseline(obs);
        }
        Ok(self)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn baseline(&self) -> Option<&BaselineRecord> {
        self.baseline.as_ref()
    }

    /// Establish (or replace) the reference state for this session.
    pub fn initialize_baseline(&mut self, obs: &Observation) -> &BaselineRecord {
        let record = BaselineRecord::establish(&self.model, obs);
        info!(
            session_id = %self.session_id,
            resilience_score = record.resilience_score,
            harmony_index = record.harmony_index,
            replaced = self.baseline.is_some(),
            "health baseline established"
        );
        self.metabolic.set_baseline(*obs);
        self.baseline.insert(record)
    }

    pub fn real_time_monitoring(&self, obs: &Observation) -> MonitorResult<MonitoringReport> {
        let baseline = self.baseline.as_ref().ok_or(MonitorError::UninitializedBaseline)?;

        let current_state = self.model.derive_network_state(obs);
        let deviation = deviation_score(&current_state, &baseline.network_structure);
        let harmony = system_harmony(deviation);
        let alerts = classify_alerts(deviation, &self.config.alert_thresholds);
        let recommendations = generate_insights(&alerts);

        let metabolic = self.metabolic.non_invasive_metabolic_analysis(obs);
        let metabolic_state = match self.metabolic.analyze_metabolic_state(obs) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "metabolic state unavailable");
                None
            }
        };

        if alerts.is_empty() {
            debug!(session_id = %self.session_id, deviation, harmony, "network within baseline");
        } else {
            warn!(
                session_id = %self.session_id,
                deviation,
                harmony,
                alerts = alerts.len(),
                "metastable alerts raised"
            );
        }

        Ok(MonitoringReport {
            session_id: self.session_id,
            observed_at: Utc::now(),
            current_state,
            deviation_score: deviation,
            system_harmony: harmony,
            metastable_alerts: alerts,
            recommendations,
            out_of_range: baseline.out_of_range(obs),
            metabolic,
            metabolic_state,
        })
    }

    pub fn non_invasive_metabolic_analysis(&self, obs: &Observation) -> MetabolicEstimate {
        self.metabolic.non_invasive_metabolic_analysis(obs)
    }

    pub fn analyze_metabolic_state(&self, obs: &Observation) -> MonitorResult<MetabolicState> {
        self.metabolic.analyze_metabolic_state(obs)
    }
}
