use std::sync::{Arc, Mutex};

use rust_type_inference::inference::{InferenceOptions, InferredDataSet};
use rust_type_inference::ingestion::{
    load_from_path, CompositeObserver, DelimitedFormat, FileObserver, LoadContext, LoadObserver,
    LoadOptions, LoadSeverity, LoadStats,
};
use rust_type_inference::InferenceError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
    nulled: Mutex<Vec<(String, usize)>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &InferenceError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &InferenceError) {
        self.alerts.lock().unwrap().push(severity);
    }

    fn on_cells_nulled(&self, _ctx: &LoadContext, column: &str, nulled: usize) {
        self.nulled.lock().unwrap().push((column.to_string(), nulled));
    }
}

fn options_with(obs: Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        format: Some(DelimitedFormat::Csv),
        observer: Some(obs),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &options_with(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_input() {
    let obs = Arc::new(RecordingObserver::default());

    // Ragged row -> schema mismatch -> Error severity (not Critical) -> no alert
    let _ = load_from_path("tests/fixtures/ragged.csv", &options_with(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_stats_and_nulled_cells() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = InferredDataSet::from_path(
        "tests/fixtures/sample_data.csv",
        &options_with(obs.clone()),
        &InferenceOptions::default(),
    )
    .unwrap();

    assert_eq!(
        *obs.successes.lock().unwrap(),
        vec![LoadStats { rows: 6, columns: 9 }]
    );
    assert_eq!(
        *obs.nulled.lock().unwrap(),
        vec![("score".to_string(), 1), ("elapsed".to_string(), 1)]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out_to_file_log() {
    let log_path = std::env::temp_dir().join(format!("infer-types-{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log_path);

    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![
        recording.clone(),
        Arc::new(FileObserver::new(&log_path)),
    ];
    let composite = CompositeObserver::new(observers);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/sample_data.csv", &opts).unwrap();

    assert_eq!(recording.successes.lock().unwrap().len(), 1);
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("ok format=Csv"));
    assert!(log.contains("rows=6 columns=9"));
    let _ = std::fs::remove_file(&log_path);
}
