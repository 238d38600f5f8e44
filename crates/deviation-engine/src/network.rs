use physio_core::{NetworkConfig, NetworkState, Observation, PhysioParameter, Subsystem};

/// Maps an observation onto per-subsystem connectivity strengths.
///
/// Implementations must be pure: the same observation always yields the same
/// state, otherwise deviation against a baseline is meaningless.
pub trait NetworkModel {
    fn derive_network_state(&self, obs: &Observation) -> NetworkState;
}

/// Linear coupling model: each subsystem loses strength in proportion to a
/// weighted sum of how far its coupled parameters sit from nominal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CouplingNetwork {
    cfg: NetworkConfig,
}

impl CouplingNetwork {
    pub fn new(cfg: NetworkConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.cfg
    }

    /// Coupling weights per subsystem; each row sums to 1.
    pub fn coupling(subsystem: Subsystem) -> &'static [(PhysioParameter, f64)] {
        use PhysioParameter::*;
        match subsystem {
            Subsystem::Cardiac => &[
                (HeartRate, 0.45),
                (Hrv, 0.35),
                (BloodOxygen, 0.10),
                (Impedance, 0.10),
            ],
            Subsystem::Respiratory => &[(BloodOxygen, 0.55), (HeartRate, 0.20), (Hrv, 0.25)],
            Subsystem::Metabolic => &[
                (Impedance, 0.35),
                (Temperature, 0.25),
                (HeartRate, 0.20),
                (SkinConductance, 0.20),
            ],
            Subsystem::Neural => &[(Hrv, 0.40), (SkinConductance, 0.40), (HeartRate, 0.20)],
            Subsystem::Immune => &[
                (Temperature, 0.50),
                (Impedance, 0.25),
                (SkinConductance, 0.25),
            ],
            Subsystem::Endocrine => &[
                (SkinConductance, 0.35),
                (Hrv, 0.30),
                (Temperature, 0.20),
                (HeartRate, 0.15),
            ],
            Subsystem::Thermoregulatory => &[
                (Temperature, 0.55),
                (SkinConductance, 0.30),
                (BloodOxygen, 0.15),
            ],
        }
    }

    fn load(subsystem: Subsystem, obs: &Observation) -> f64 {
        Self::coupling(subsystem)
            .iter()
            .map(|&(param, weight)| weight * param.normalized(obs.get(param)).abs())
            .sum()
    }
}

impl NetworkModel for CouplingNetwork {
    fn derive_network_state(&self, obs: &Observation) -> NetworkState {
        let strengths = Subsystem::ALL.map(|s| {
            let raw = self.cfg.peak_strength - self.cfg.sensitivity * Self::load(s, obs);
            (s, raw.clamp(0.0, 1.0))
        });

        let entropy = {
            let total: f64 = PhysioParameter::ALL
                .iter()
                .map(|p| p.normalized(obs.get(*p)).abs())
                .sum();
            (total / PhysioParameter::ALL.len() as f64).clamp(0.0, 1.0)
        };

        let values = strengths.map(|(_, v)| v);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        let resilience = (mean * (1.0 - (max - min))).clamp(0.0, 1.0);

        NetworkState::new(strengths, entropy, resilience)
    }
}
