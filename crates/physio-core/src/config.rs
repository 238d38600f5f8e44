use crate::error::{MonitorError, MonitorResult};
use serde::{Deserialize, Serialize};

/// Deviation cut-offs for the cumulative alert tiers. A tier fires when the
/// deviation is strictly above its threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertThresholds {
    pub stability_declining: f64,
    pub coordination_weakening: f64,
    pub desynchronization: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            stability_declining: 0.15,
            coordination_weakening: 0.25,
            desynchronization: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub peak_strength: f64,
    pub sensitivity: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            peak_strength: 0.94,
            sensitivity: 0.8,
        }
    }
}

/// Illustrative constants for the metabolic sub-model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetabolicConfig {
    pub glucose_at_nominal: f64,
    pub glucose_per_bpm: f64,
    pub trend_tolerance_bpm: f64,
    pub lactate_at_nominal: f64,
    pub lactate_per_microsiemens: f64,
    pub ketone_level: f64,
    pub metabolic_flexibility: f64,
    pub analysis_confidence: f64,
    /// Exclusive bounds on the baseline-relative rate that read as normal.
    pub normal_rate_low: f64,
    pub normal_rate_high: f64,
}

impl Default for MetabolicConfig {
    fn default() -> Self {
        Self {
            glucose_at_nominal: 95.0,
            glucose_per_bpm: 1.5,
            trend_tolerance_bpm: 3.0,
            lactate_at_nominal: 1.2,
            lactate_per_microsiemens: 0.4,
            ketone_level: 0.3,
            metabolic_flexibility: 0.82,
            analysis_confidence: 0.88,
            normal_rate_low: 0.9,
            normal_rate_high: 1.1,
        }
    }
}

impl MetabolicConfig {
    pub fn validate(&self) -> MonitorResult<()> {
        let fields = [
            ("glucose_at_nominal", self.glucose_at_nominal),
            ("glucose_per_bpm", self.glucose_per_bpm),
            ("trend_tolerance_bpm", self.trend_tolerance_bpm),
            ("lactate_at_nominal", self.lactate_at_nominal),
            ("lactate_per_microsiemens", self.lactate_per_microsiemens),
            ("ketone_level", self.ketone_level),
            ("metabolic_flexibility", self.metabolic_flexibility),
            ("analysis_confidence", self.analysis_confidence),
            ("normal_rate_low", self.normal_rate_low),
            ("normal_rate_high", self.normal_rate_high),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(MonitorError::InvalidConfig(format!(
                    "metabolic {name}={value} must be finite"
                )));
            }
        }
        if self.trend_tolerance_bpm < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "metabolic trend_tolerance_bpm={} must be non-negative",
                self.trend_tolerance_bpm
            )));
        }
        if self.normal_rate_low < 0.0 || self.normal_rate_low >= self.normal_rate_high {
            return Err(MonitorError::InvalidConfig(format!(
                "metabolic normal rate band ({}, {}) is empty",
                self.normal_rate_low, self.normal_rate_high
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub alert_thresholds: AlertThresholds,
    pub network: NetworkConfig,
    pub metabolic: MetabolicConfig,
}

impl MonitorConfig {
    /// Parse a (possibly partial) JSON document; omitted fields keep their defaults.
    pub fn from_json_str(raw: &str) -> MonitorResult<Self> {
        let cfg: MonitorConfig =
            serde_json::from_str(raw).map_err(|e| MonitorError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> MonitorResult<()> {
        let t = &self.alert_thresholds;
        let tiers = [
            ("stability_declining", t.stability_declining),
            ("coordination_weakening", t.coordination_weakening),
            ("desynchronization", t.desynchronization),
        ];
        for (name, value) in tiers {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(MonitorError::InvalidConfig(format!(
                    "alert threshold {name}={value} must lie in (0, 1)"
                )));
            }
        }
        if !(t.stability_declining < t.coordination_weakening
            && t.coordination_weakening < t.desynchronization)
        {
            return Err(MonitorError::InvalidConfig(
                "alert thresholds must be strictly ascending".into(),
            ));
        }

        let n = &self.network;
        if !n.peak_strength.is_finite() || n.peak_strength <= 0.0 || n.peak_strength > 1.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "network peak_strength={} must lie in (0, 1]",
                n.peak_strength
            )));
        }
        if !n.sensitivity.is_finite() || n.sensitivity < 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "network sensitivity={} must be finite and non-negative",
                n.sensitivity
            )));
        }

        self.metabolic.validate()
    }
}
