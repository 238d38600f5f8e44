use physio_core::{MetabolicConfig, Observation, PhysioParameter};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Stable,
    Rising,
    Falling,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlucoseTrend {
    /// mg/dL, one decimal.
    pub value: f64,
    pub trend: TrendDirection,
    pub variability: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetabolicEstimate {
    pub glucose_trend: GlucoseTrend,
    /// mmol/L, one decimal.
    pub lactate_level: f64,
    pub ketone_bodies: f64,
    pub metabolic_flexibility: f64,
    pub analysis_confidence: f64,
}

impl MetabolicEstimate {
    pub fn from_observation(obs: &Observation, cfg: &MetabolicConfig) -> Self {
        Self {
            glucose_trend: estimate_glucose(obs, cfg),
            lactate_level: estimate_lactate(obs, cfg),
            ketone_bodies: cfg.ketone_level,
            metabolic_flexibility: cfg.metabolic_flexibility,
            analysis_confidence: cfg.analysis_confidence,
        }
    }
}

fn estimate_glucose(obs: &Observation, cfg: &MetabolicConfig) -> GlucoseTrend {
    let hr_offset = obs.heart_rate - PhysioParameter::HeartRate.nominal();
    let value = (cfg.glucose_at_nominal + cfg.glucose_per_bpm * hr_offset).max(0.0);

    let trend = if hr_offset > cfg.trend_tolerance_bpm {
        TrendDirection::Rising
    } else if hr_offset < -cfg.trend_tolerance_bpm {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };

    // Suppressed HRV widens the expected swing.
    let hrv_offset = (obs.hrv - PhysioParameter::Hrv.nominal()).abs();
    let variability = (5.0 + 0.25 * hrv_offset).clamp(5.0, 15.0);

    GlucoseTrend {
        value: round1(value),
        trend,
        variability: round1(variability),
    }
}

fn estimate_lactate(obs: &Observation, cfg: &MetabolicConfig) -> f64 {
    let sc_offset = obs.skin_conductance - PhysioParameter::SkinConductance.nominal();
    round1((cfg.lactate_at_nominal + cfg.lactate_per_microsiemens * sc_offset).clamp(0.5, 4.0))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
