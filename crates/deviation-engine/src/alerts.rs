use physio_core::AlertThresholds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MetastableAlert {
    StabilityDeclining,
    CoordinationWeakening,
    Desynchronization,
}

impl MetastableAlert {
    pub fn message(self) -> &'static str {
        match self {
            MetastableAlert::StabilityDeclining => "network stability declining — suggest rest",
            MetastableAlert::CoordinationWeakening => "cross-system coordination weakening",
            MetastableAlert::Desynchronization => "significant system desynchronization detected",
        }
    }
}

impl std::fmt::Display for MetastableAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Cumulative tiers: a higher tier appends to the lower ones.
pub fn classify_alerts(deviation: f64, thresholds: &AlertThresholds) -> Vec<MetastableAlert> {
    let tiers = [
        (thresholds.stability_declining, MetastableAlert::StabilityDeclining),
        (thresholds.coordination_weakening, MetastableAlert::CoordinationWeakening),
        (thresholds.desynchronization, MetastableAlert::Desynchronization),
    ];
    tiers
        .into_iter()
        .filter(|(threshold, _)| deviation > *threshold)
        .map(|(_, alert)| alert)
        .collect()
}

pub fn generate_insights(alerts: &[MetastableAlert]) -> Vec<String> {
    let lines: &[&str] = if alerts.is_empty() {
        &[
            "system in harmonious state",
            "physiological rhythms flowing smoothly",
        ]
    } else {
        &[
            "early system change detected",
            "subtle shift in physiological rhythm",
            "prioritise rest and nutritional balance",
        ]
    };
    lines.iter().map(|s| s.to_string()).collect()
}
