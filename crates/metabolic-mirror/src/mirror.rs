use crate::estimate::MetabolicEstimate;
use physio_core::{MetabolicConfig, MonitorError, MonitorResult, Observation, PhysioParameter};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicClass {
    Normal,
    Abnormal,
}

/// Baseline-relative metabolic reading.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetabolicState {
    /// Mean of the impedance and heart-rate ratios against baseline.
    pub metabolic_rate: f64,
    pub state: MetabolicClass,
    /// 1 at baseline, falling linearly with distance from a rate of 1.
    pub confidence: f64,
}

#[derive(Clone, Debug, Default)]
pub struct MetabolicMirror {
    cfg: MetabolicConfig,
    baseline: Option<Observation>,
}

impl MetabolicMirror {
    pub fn new(cfg: MetabolicConfig) -> Self {
        Self {
            cfg,
            baseline: None,
        }
    }

    pub fn config(&self) -> &MetabolicConfig {
        &self.cfg
    }

    pub fn baseline(&self) -> Option<&Observation> {
        self.baseline.as_ref()
    }

    /// Replace the metabolic baseline.
    pub fn set_baseline(&mut self, obs: Observation) {
        self.baseline = Some(obs);
    }

    pub fn non_invasive_metabolic_analysis(&self, obs: &Observation) -> MetabolicEstimate {
        let estimate = MetabolicEstimate::from_observation(obs, &self.cfg);
        debug!(
            glucose = estimate.glucose_trend.value,
            lactate = estimate.lactate_level,
            "metabolic estimate computed"
        );
        estimate
    }

    pub fn analyze_metabolic_state(&self, obs: &Observation) -> MonitorResult<MetabolicState> {
        let baseline = self.baseline.as_ref().ok_or(MonitorError::UninitializedBaseline)?;

        let impedance_ratio = ratio(obs, baseline, PhysioParameter::Impedance)?;
        let heart_rate_ratio = ratio(obs, baseline, PhysioParameter::HeartRate)?;
        let metabolic_rate = (impedance_ratio + heart_rate_ratio) / 2.0;

        Ok(MetabolicState {
            metabolic_rate,
            state: self.classify(metabolic_rate),
            confidence: (1.0 - (metabolic_rate - 1.0).abs()).clamp(0.0, 1.0),
        })
    }

    pub fn classify(&self, metabolic_rate: f64) -> MetabolicClass {
        if metabolic_rate > self.cfg.normal_rate_low && metabolic_rate < self.cfg.normal_rate_high {
            MetabolicClass::Normal
        } else {
            MetabolicClass::Abnormal
        }
    }
}

fn ratio(obs: &Observation, baseline: &Observation, param: PhysioParameter) -> MonitorResult<f64> {
    let base = baseline.get(param);
    if base == 0.0 {
        return Err(MonitorError::invalid_observation(
            param.key(),
            "metabolic baseline value is zero",
        ));
    }
    Ok(obs.get(param) / base)
}
