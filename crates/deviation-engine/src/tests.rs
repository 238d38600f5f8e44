use crate::{
    classify_alerts, deviation_score, system_harmony, CouplingNetwork,
    HealthMonitor, MetastableAlert, NetworkModel, SharedHealthMonitor,
};
use metabolic_mirror::{MetabolicClass, MetabolicConfig, TrendDirection};
use physio_core::{
    AlertThresholds, MonitorConfig, MonitorError, NetworkState, Observation, PhysioParameter,
    Subsystem,
};
use rand::Rng;
use serde_json::json;
use std::thread;

fn baseline_obs() -> Observation {
    Observation::from_json(&json!({
        "heart_rate": 72,
        "hrv": 45,
        "blood_oxygen": 98,
        "skin_conductance": 2.5,
        "temperature": 36.8,
        "impedance": 480,
    }))
    .unwrap()
}

fn stressed_obs() -> Observation {
    Observation::from_json(&json!({
        "heart_rate": 78,
        "hrv": 38,
        "blood_oxygen": 96,
        "skin_conductance": 3.2,
        "temperature": 36.9,
        "impedance": 475,
    }))
    .unwrap()
}

fn random_obs(rng: &mut impl Rng) -> Observation {
    let pairs: Vec<(&str, f64)> = PhysioParameter::ALL
        .iter()
        .map(|p| {
            let band = p.band();
            let span = band.max - band.min;
            (p.key(), rng.gen_range(band.min - span..band.max + span).max(0.0))
        })
        .collect();
    Observation::from_pairs(pairs).unwrap()
}

#[test]
fn monitoring_before_baseline_fails() {
    let monitor = HealthMonitor::new();
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let err = monitor.real_time_monitoring(&random_obs(&mut rng)).unwrap_err();
        assert_eq!(err, MonitorError::UninitializedBaseline);
    }
    assert_eq!(
        monitor.analyze_metabolic_state(&baseline_obs()),
        Err(MonitorError::UninitializedBaseline)
    );
}

#[test]
fn baseline_indices_follow_observation() {
    let mut monitor = HealthMonitor::new();
    let record = monitor.initialize_baseline(&baseline_obs()).clone();

    assert!((record.resilience_score - 0.93).abs() < 1e-12);
    assert!((record.harmony_index - 0.925).abs() < 1e-12);

    let hr = record.dynamic_range[&PhysioParameter::HeartRate];
    assert_eq!((hr.min, hr.max, hr.optimal), (60.0, 100.0, 72.0));
    let imp = record.dynamic_range[&PhysioParameter::Impedance];
    assert_eq!((imp.min, imp.max, imp.optimal), (450.0, 550.0, 480.0));
    assert_eq!(record.dynamic_range.len(), PhysioParameter::ALL.len());

    for s in Subsystem::ALL {
        assert!((record.network_structure.strength(s) - 0.94).abs() < 1e-12);
    }
}

#[test]
fn identical_observation_has_zero_deviation() {
    let mut monitor = HealthMonitor::new();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let obs = random_obs(&mut rng);
        monitor.initialize_baseline(&obs);
        let report = monitor.real_time_monitoring(&obs).unwrap();
        assert_eq!(report.deviation_score, 0.0);
        assert_eq!(report.system_harmony, 1.0);
        assert!(report.metastable_alerts.is_empty());
        assert_eq!(report.recommendations[0], "system in harmonious state");
    }
}

#[test]
fn stressed_scenario_raises_first_tier_alert() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let report = monitor.real_time_monitoring(&stressed_obs()).unwrap();

    assert!(report.deviation_score > 0.15 && report.deviation_score <= 0.25);
    assert_eq!(report.deviation_score, 0.2186);
    assert!(report.system_harmony < 1.0);
    assert_eq!(report.metastable_alerts, vec![MetastableAlert::StabilityDeclining]);
    assert_eq!(
        report.alert_messages(),
        vec!["network stability declining — suggest rest"]
    );
    assert_eq!(report.recommendations[0], "early system change detected");
    assert_eq!(report.metabolic.glucose_trend.trend, TrendDirection::Rising);
    assert_eq!(report.metabolic_state.unwrap().state, MetabolicClass::Normal);
    assert!(report.out_of_range.is_empty());
    assert_eq!(report.session_id, monitor.session_id());
}

#[test]
fn mild_drift_stays_harmonious() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let obs = Observation::from_json(&json!({
        "heart_rate": 75,
        "hrv": 42,
        "blood_oxygen": 97,
        "skin_conductance": 2.8,
        "temperature": 36.8,
        "impedance": 478,
    }))
    .unwrap();
    let report = monitor.real_time_monitoring(&obs).unwrap();
    assert!(report.deviation_score > 0.0 && report.deviation_score <= 0.15);
    assert!(report.metastable_alerts.is_empty());
}

#[test]
fn alert_tiers_accumulate_with_drift() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());

    let second_tier = Observation::from_pairs([
        ("heart_rate", 80.0),
        ("hrv", 35.0),
        ("blood_oxygen", 95.5),
        ("skin_conductance", 3.4),
        ("temperature", 37.0),
        ("impedance", 470.0),
    ])
    .unwrap();
    let report = monitor.real_time_monitoring(&second_tier).unwrap();
    assert_eq!(
        report.metastable_alerts,
        vec![
            MetastableAlert::StabilityDeclining,
            MetastableAlert::CoordinationWeakening
        ]
    );

    let third_tier = Observation::from_pairs([
        ("heart_rate", 84.0),
        ("hrv", 30.0),
        ("blood_oxygen", 95.0),
        ("skin_conductance", 3.5),
        ("temperature", 37.1),
        ("impedance", 470.0),
    ])
    .unwrap();
    let report = monitor.real_time_monitoring(&third_tier).unwrap();
    assert_eq!(report.metastable_alerts.len(), 3);
    assert_eq!(
        report.metastable_alerts.last(),
        Some(&MetastableAlert::Desynchronization)
    );
}

#[test]
fn threshold_boundaries_are_exclusive() {
    let t = AlertThresholds::default();
    assert!(classify_alerts(0.0, &t).is_empty());
    assert!(classify_alerts(0.15, &t).is_empty());
    assert_eq!(classify_alerts(0.1501, &t).len(), 1);
    assert_eq!(classify_alerts(0.25, &t).len(), 1);
    assert_eq!(classify_alerts(0.2501, &t).len(), 2);
    assert_eq!(classify_alerts(0.35, &t).len(), 2);
    assert_eq!(classify_alerts(0.3501, &t).len(), 3);
    assert_eq!(classify_alerts(5.0, &t).len(), 3);
}

#[test]
fn alert_lists_are_prefix_monotone() {
    let t = AlertThresholds::default();
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let a: f64 = rng.gen_range(0.0..0.6);
        let b: f64 = rng.gen_range(0.0..0.6);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_alerts = classify_alerts(lo, &t);
        let hi_alerts = classify_alerts(hi, &t);
        assert!(hi_alerts.starts_with(&lo_alerts));
    }
}

#[test]
fn harmony_strictly_decreases_with_deviation() {
    assert_eq!(system_harmony(0.0), 1.0);
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let a: f64 = rng.gen_range(0.0..2.0);
        let b: f64 = a + rng.gen_range(1e-4..1.0);
        let (ha, hb) = (system_harmony(a), system_harmony(b));
        assert!(hb < ha);
        assert!(hb > 0.0 && ha <= 1.0);
    }
}

#[test]
fn reinitialization_replaces_baseline() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let before = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    assert!(before.deviation_score > 0.0);

    monitor.initialize_baseline(&stressed_obs());
    let after = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    assert_eq!(after.deviation_score, 0.0);
    assert_eq!(monitor.baseline().unwrap().observation, stressed_obs());

    let back = monitor.real_time_monitoring(&baseline_obs()).unwrap();
    assert_eq!(back.deviation_score, before.deviation_score);
    assert_eq!(back.metabolic_state.unwrap().metabolic_rate, {
        let b = stressed_obs();
        (480.0 / b.impedance + 72.0 / b.heart_rate) / 2.0
    });
}

#[test]
fn network_derivation_is_pure_and_bounded() {
    let model = CouplingNetwork::default();
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let obs = random_obs(&mut rng);
        let a = model.derive_network_state(&obs);
        let b = model.derive_network_state(&obs);
        assert_eq!(a, b);
        for s in Subsystem::ALL {
            assert!((0.0..=1.0).contains(&a.strength(s)));
        }
        assert!((0.0..=1.0).contains(&a.entropy()));
        assert!((0.0..=1.0).contains(&a.resilience()));
    }
}

#[test]
fn coupling_rows_sum_to_one() {
    for s in Subsystem::ALL {
        let total: f64 = CouplingNetwork::coupling(s).iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9, "{s} weights sum to {total}");
    }
}

#[test]
fn deviation_is_symmetric_and_non_negative() {
    let model = CouplingNetwork::default();
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let a = model.derive_network_state(&random_obs(&mut rng));
        let b = model.derive_network_state(&random_obs(&mut rng));
        let d = deviation_score(&a, &b);
        assert!(d >= 0.0);
        assert_eq!(d, deviation_score(&b, &a));
    }
}

#[test]
fn out_of_band_parameters_are_reported() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let obs = baseline_obs()
        .with(PhysioParameter::HeartRate, 112.0)
        .and_then(|o| o.with(PhysioParameter::BloodOxygen, 90.0))
        .unwrap();
    let report = monitor.real_time_monitoring(&obs).unwrap();
    assert_eq!(
        report.out_of_range,
        vec![PhysioParameter::HeartRate, PhysioParameter::BloodOxygen]
    );
}

struct FixedModel(f64);

impl NetworkModel for FixedModel {
    fn derive_network_state(&self, obs: &Observation) -> NetworkState {
        let strength = if obs.heart_rate > 90.0 { self.0 - 0.5 } else { self.0 };
        NetworkState::new(Subsystem::ALL.map(|s| (s, strength)), 0.0, 1.0)
    }
}

#[test]
fn custom_network_model_drives_deviation() {
    let mut monitor = HealthMonitor::with_model(MonitorConfig::default(), FixedModel(0.9)).unwrap();
    monitor.initialize_baseline(&baseline_obs());
    let calm = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    assert_eq!(calm.deviation_score, 0.0);

    let racing = baseline_obs().with(PhysioParameter::HeartRate, 120.0).unwrap();
    let report = monitor.real_time_monitoring(&racing).unwrap();
    assert_eq!(report.deviation_score, 0.5);
    assert_eq!(report.metastable_alerts.len(), 3);
    assert!((report.system_harmony - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn custom_thresholds_shift_tiers() {
    let mut cfg = MonitorConfig::default();
    cfg.alert_thresholds = AlertThresholds {
        stability_declining: 0.05,
        coordination_weakening: 0.1,
        desynchronization: 0.2,
    };
    let mut monitor = HealthMonitor::with_config(cfg).unwrap();
    monitor.initialize_baseline(&baseline_obs());
    let report = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    assert_eq!(report.metastable_alerts.len(), 3);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = MonitorConfig::default();
    cfg.network.peak_strength = 1.5;
    assert!(matches!(
        HealthMonitor::with_config(cfg),
        Err(MonitorError::InvalidConfig(_))
    ));
}

#[test]
fn zero_baseline_heart_rate_still_monitors() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs().with(PhysioParameter::HeartRate, 0.0).unwrap());

    let report = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    assert!(report.deviation_score > 0.0);
    assert!(!report.metastable_alerts.is_empty());
    assert_eq!(report.metabolic_state, None);
    assert_eq!(report.to_json().unwrap()["metabolic_state"], json!(null));
    assert!(matches!(
        monitor.analyze_metabolic_state(&stressed_obs()),
        Err(MonitorError::InvalidObservation { .. })
    ));
}

#[test]
fn zero_baseline_impedance_still_monitors() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs().with(PhysioParameter::Impedance, 0.0).unwrap());
    let report = monitor.real_time_monitoring(&baseline_obs()).unwrap();
    assert_eq!(report.metabolic_state, None);
}

#[test]
fn metabolic_config_loads_from_monitor_json() {
    let cfg = MonitorConfig::from_json_str(r#"{"metabolic": {"normal_rate_high": 1.03}}"#).unwrap();
    assert_eq!(cfg.metabolic.normal_rate_low, 0.9);
    let mut monitor = HealthMonitor::with_config(cfg).unwrap();
    monitor.initialize_baseline(&baseline_obs());

    let report = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    let state = report.metabolic_state.unwrap();
    assert!(state.metabolic_rate > 1.03);
    assert_eq!(state.state, MetabolicClass::Abnormal);
}

#[test]
fn inverted_metabolic_bounds_are_rejected() {
    let mut metabolic = MetabolicConfig::default();
    metabolic.normal_rate_low = 1.1;
    metabolic.normal_rate_high = 0.9;
    assert!(matches!(
        HealthMonitor::new().with_metabolic_config(metabolic),
        Err(MonitorError::InvalidConfig(_))
    ));

    let mut cfg = MonitorConfig::default();
    cfg.metabolic = metabolic;
    assert!(matches!(
        HealthMonitor::with_config(cfg),
        Err(MonitorError::InvalidConfig(_))
    ));
}

#[test]
fn metabolic_config_swap_keeps_baseline() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let mut metabolic = MetabolicConfig::default();
    metabolic.normal_rate_high = 1.03;
    let monitor = monitor.with_metabolic_config(metabolic).unwrap();

    assert_eq!(monitor.config().metabolic, metabolic);
    let state = monitor.analyze_metabolic_state(&stressed_obs()).unwrap();
    assert_eq!(state.state, MetabolicClass::Abnormal);
}

#[test]
fn report_serializes_to_named_mapping() {
    let mut monitor = HealthMonitor::new();
    monitor.initialize_baseline(&baseline_obs());
    let report = monitor.real_time_monitoring(&stressed_obs()).unwrap();
    let value = report.to_json().unwrap();

    assert_eq!(value["deviation_score"], json!(0.2186));
    assert_eq!(value["metastable_alerts"], json!(["stability_declining"]));
    assert!(value["current_state"]["node_strengths"]["cardiac"].is_number());
    assert_eq!(value["metabolic"]["glucose_trend"]["trend"], json!("rising"));
    assert_eq!(value["metabolic_state"]["state"], json!("normal"));

    let baseline = serde_json::to_value(monitor.baseline().unwrap()).unwrap();
    assert_eq!(baseline["dynamic_range"]["heart_rate"]["optimal"], json!(72.0));
    assert_eq!(baseline["dynamic_range"]["impedance"]["min"], json!(450.0));
    assert!(baseline["established_at"].is_string());
}

#[test]
fn shared_monitor_serializes_baseline_replacement() {
    let shared = SharedHealthMonitor::new(HealthMonitor::new());
    assert_eq!(
        shared.real_time_monitoring(&baseline_obs()).unwrap_err(),
        MonitorError::UninitializedBaseline
    );
    shared.initialize_baseline(&baseline_obs());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    if i == 0 {
                        shared.initialize_baseline(&baseline_obs());
                    } else {
                        let report = shared.real_time_monitoring(&stressed_obs()).unwrap();
                        assert_eq!(report.deviation_score, 0.2186);
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(shared.baseline().unwrap().observation, baseline_obs());
}
