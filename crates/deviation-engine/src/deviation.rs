use physio_core::{NetworkState, Subsystem};

/// RMS distance between two network states over [`Subsystem::ALL`], rounded
/// to four decimals.
pub fn deviation_score(current: &NetworkState, baseline: &NetworkState) -> f64 {
    let sum_sq: f64 = Subsystem::ALL
        .iter()
        .map(|s| {
            let d = current.strength(*s) - baseline.strength(*s);
            d * d
        })
        .sum();
    let rms = (sum_sq / Subsystem::ALL.len() as f64).sqrt();
    (rms * 10_000.0).round() / 10_000.0
}

/// `1 / (1 + 10 d)`: equals 1 at zero deviation and stays in (0, 1].
pub fn system_harmony(deviation: f64) -> f64 {
    1.0 / (1.0 + deviation.max(0.0) * 10.0)
}
