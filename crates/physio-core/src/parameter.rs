use serde::{Deserialize, Serialize};

/// Recognized physiological inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhysioParameter {
    HeartRate,
    Hrv,
    BloodOxygen,
    SkinConductance,
    Temperature,
    Impedance,
}

/// Fixed clinical band for a parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClinicalBand {
    pub min: f64,
    pub max: f64,
}

impl ClinicalBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl PhysioParameter {
    pub const ALL: [PhysioParameter; 6] = [
        PhysioParameter::HeartRate,
        PhysioParameter::Hrv,
        PhysioParameter::BloodOxygen,
        PhysioParameter::SkinConductance,
        PhysioParameter::Temperature,
        PhysioParameter::Impedance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PhysioParameter::HeartRate => "heart_rate",
            PhysioParameter::Hrv => "hrv",
            PhysioParameter::BloodOxygen => "blood_oxygen",
            PhysioParameter::SkinConductance => "skin_conductance",
            PhysioParameter::Temperature => "temperature",
            PhysioParameter::Impedance => "impedance",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Value assumed when an observation omits the parameter.
    pub fn nominal(self) -> f64 {
        match self {
            PhysioParameter::HeartRate => 72.0,
            PhysioParameter::Hrv => 45.0,
            PhysioParameter::BloodOxygen => 98.0,
            PhysioParameter::SkinConductance => 2.5,
            PhysioParameter::Temperature => 36.8,
            PhysioParameter::Impedance => 480.0,
        }
    }

    pub fn band(self) -> ClinicalBand {
        match self {
            PhysioParameter::HeartRate => ClinicalBand::new(60.0, 100.0),
            PhysioParameter::Hrv => ClinicalBand::new(20.0, 80.0),
            PhysioParameter::BloodOxygen => ClinicalBand::new(92.0, 100.0),
            PhysioParameter::SkinConductance => ClinicalBand::new(1.0, 5.0),
            PhysioParameter::Temperature => ClinicalBand::new(36.0, 37.5),
            PhysioParameter::Impedance => ClinicalBand::new(450.0, 550.0),
        }
    }

    pub fn normalized(self, value: f64) -> f64 {
        (value - self.nominal()) / self.band().half_width()
    }
}

impl std::fmt::Display for PhysioParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
