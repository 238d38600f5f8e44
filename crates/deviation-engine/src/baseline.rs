use crate::network::NetworkModel;
use chrono::{DateTime, Utc};
use physio_core::{NetworkState, Observation, PhysioParameter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Clinical band for a parameter together with the subject's own reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DynamicRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl DynamicRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Reference state a session measures every later observation against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineRecord {
    pub network_structure: NetworkState,
    pub dynamic_range: BTreeMap<PhysioParameter, DynamicRange>,
    pub resilience_score: f64,
    pub harmony_index: f64,
    pub observation: Observation,
    pub established_at: DateTime<Utc>,
}

impl BaselineRecord {
    pub fn establish<M: NetworkModel + ?Sized>(model: &M, obs: &Observation) -> Self {
        let hrv = obs.hrv;
        let heart_rate = obs.heart_rate;

        Self {
            network_structure: model.derive_network_state(obs),
            dynamic_range: dynamic_ranges(obs),
            resilience_score: hrv / 100.0 + obs.impedance / 1000.0,
            harmony_index: 0.7 + hrv / 200.0
                - (heart_rate - PhysioParameter::HeartRate.nominal()).abs() / 100.0,
            observation: *obs,
            established_at: Utc::now(),
        }
    }

    /// Parameters of `obs` that fall outside this baseline's dynamic ranges.
    pub fn out_of_range(&self, obs: &Observation) -> Vec<PhysioParameter> {
        self.dynamic_range
            .iter()
            .filter(|(param, range)| !range.contains(obs.get(**param)))
            .map(|(param, _)| *param)
            .collect()
    }
}

fn dynamic_ranges(obs: &Observation) -> BTreeMap<PhysioParameter, DynamicRange> {
    PhysioParameter::ALL
        .into_iter()
        .map(|p| {
            let band = p.band();
            (
                p,
                DynamicRange {
                    min: band.min,
                    max: band.max,
                    optimal: obs.get(p),
                },
            )
        })
        .collect()
}
