use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physiological subsystems tracked as nodes of the network model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Cardiac,
    Respiratory,
    Metabolic,
    Neural,
    Immune,
    Endocrine,
    Thermoregulatory,
}

impl Subsystem {
    pub const ALL: [Subsystem; 7] = [
        Subsystem::Cardiac,
        Subsystem::Respiratory,
        Subsystem::Metabolic,
        Subsystem::Neural,
        Subsystem::Immune,
        Subsystem::Endocrine,
        Subsystem::Thermoregulatory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subsystem::Cardiac => "cardiac",
            Subsystem::Respiratory => "respiratory",
            Subsystem::Metabolic => "metabolic",
            Subsystem::Neural => "neural",
            Subsystem::Immune => "immune",
            Subsystem::Endocrine => "endocrine",
            Subsystem::Thermoregulatory => "thermoregulatory",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of per-subsystem connectivity for one observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkState {
    node_strengths: BTreeMap<Subsystem, f64>,
    entropy: f64,
    resilience: f64,
}

impl NetworkState {
    /// Strengths are clamped into [0, 1]; subsystems absent from the input read as 0.
    pub fn new(
        node_strengths: impl IntoIterator<Item = (Subsystem, f64)>,
        entropy: f64,
        resilience: f64,
    ) -> Self {
        let node_strengths = node_strengths
            .into_iter()
            .map(|(s, v)| (s, v.clamp(0.0, 1.0)))
            .collect();
        Self {
            node_strengths,
            entropy,
            resilience,
        }
    }

    pub fn strength(&self, subsystem: Subsystem) -> f64 {
        self.node_strengths.get(&subsystem).copied().unwrap_or(0.0)
    }

    pub fn node_strengths(&self) -> &BTreeMap<Subsystem, f64> {
        &self.node_strengths
    }

    /// Strengths in [`Subsystem::ALL`] order.
    pub fn strength_vector(&self) -> [f64; 7] {
        Subsystem::ALL.map(|s| self.strength(s))
    }

    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn resilience(&self) -> f64 {
        self.resilience
    }
}
