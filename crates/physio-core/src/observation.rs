use crate::error::{MonitorError, MonitorResult};
use crate::parameter::PhysioParameter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One reading of the recognized physiological parameters.
///
/// Missing inputs fall back to [`PhysioParameter::nominal`]; unrecognized keys
/// in a mapping are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub heart_rate: f64,
    pub hrv: f64,
    pub blood_oxygen: f64,
    pub skin_conductance: f64,
    pub temperature: f64,
    pub impedance: f64,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            heart_rate: PhysioParameter::HeartRate.nominal(),
            hrv: PhysioParameter::Hrv.nominal(),
            blood_oxygen: PhysioParameter::BloodOxygen.nominal(),
            skin_conductance: PhysioParameter::SkinConductance.nominal(),
            temperature: PhysioParameter::Temperature.nominal(),
            impedance: PhysioParameter::Impedance.nominal(),
        }
    }
}

impl Observation {
    pub fn get(&self, param: PhysioParameter) -> f64 {
        match param {
            PhysioParameter::HeartRate => self.heart_rate,
            PhysioParameter::Hrv => self.hrv,
            PhysioParameter::BloodOxygen => self.blood_oxygen,
            PhysioParameter::SkinConductance => self.skin_conductance,
            PhysioParameter::Temperature => self.temperature,
            PhysioParameter::Impedance => self.impedance,
        }
    }

    fn slot(&mut self, param: PhysioParameter) -> &mut f64 {
        match param {
            PhysioParameter::HeartRate => &mut self.heart_rate,
            PhysioParameter::Hrv => &mut self.hrv,
            PhysioParameter::BloodOxygen => &mut self.blood_oxygen,
            PhysioParameter::SkinConductance => &mut self.skin_conductance,
            PhysioParameter::Temperature => &mut self.temperature,
            PhysioParameter::Impedance => &mut self.impedance,
        }
    }

    /// Set a parameter, rejecting values that are not finite and non-negative.
    pub fn set(&mut self, param: PhysioParameter, value: f64) -> MonitorResult<()> {
        if !value.is_finite() {
            return Err(MonitorError::invalid_observation(
                param.key(),
                format!("value {value} is not finite"),
            ));
        }
        if value < 0.0 {
            return Err(MonitorError::invalid_observation(
                param.key(),
                format!("value {value} is negative"),
            ));
        }
        *self.slot(param) = value;
        Ok(())
    }

    pub fn with(mut self, param: PhysioParameter, value: f64) -> MonitorResult<Self> {
        self.set(param, value)?;
        Ok(self)
    }

    /// Build from `(key, value)` pairs. Unknown keys are skipped.
    pub fn from_pairs<K, I>(pairs: I) -> MonitorResult<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut obs = Self::default();
        for (key, value) in pairs {
            if let Some(param) = PhysioParameter::from_key(key.as_ref()) {
                obs.set(param, value)?;
            }
        }
        Ok(obs)
    }

    /// Build from a JSON object. Numbers and numeric strings are accepted for
    /// recognized keys; any other value type is rejected.
    pub fn from_json(value: &Value) -> MonitorResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            MonitorError::invalid_observation("<root>", "observation must be a JSON object")
        })?;

        let mut obs = Self::default();
        for (key, raw) in map {
            let Some(param) = PhysioParameter::from_key(key) else {
                continue;
            };
            obs.set(param, coerce_number(key, raw)?)?;
        }
        Ok(obs)
    }

    pub fn to_json(&self) -> Value {
        let map = PhysioParameter::ALL
            .into_iter()
            .map(|p| (p.key().to_string(), Value::from(self.get(p))))
            .collect();
        Value::Object(map)
    }
}

fn coerce_number(key: &str, raw: &Value) -> MonitorResult<f64> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MonitorError::invalid_observation(key, "number out of range")),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            MonitorError::invalid_observation(key, format!("'{s}' is not numeric"))
        }),
        other => Err(MonitorError::invalid_observation(
            key,
            format!("expected a number, got {}", json_type_name(other)),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for Observation {
    type Error = MonitorError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}
