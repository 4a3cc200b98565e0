use chrono::NaiveDate;
use demand_forecast::sample::{SampleArtifacts, SampleConfig};
use demand_forecast::{AppContext, ArtifactKind, ArtifactPaths, FailureKind, ForecastError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_artifacts(dir: &Path, model: &str, features: &str, dataset: &str) -> ArtifactPaths {
    let paths = ArtifactPaths {
        model: dir.join("model.json"),
        features: dir.join("features.json"),
        dataset: dir.join("train.csv"),
    };
    fs::write(&paths.model, model).unwrap();
    fs::write(&paths.features, features).unwrap();
    fs::write(&paths.dataset, dataset).unwrap();
    paths
}

const DATASET: &str = "date,store,item,sales,lag_1\n\
2017-01-01,1,1,10,\n\
2017-01-02,1,1,12,10\n\
2017-01-03,1,1,9,12\n\
2017-01-01,2,1,40,\n";

fn scenario_context() -> (TempDir, AppContext) {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(
        dir.path(),
        r#"{ "kind": "linear", "coefficients": [1.1] }"#,
        r#"["sales"]"#,
        DATASET,
    );
    let context = AppContext::load(&paths).unwrap();
    (dir, context)
}

#[test]
fn test_load_and_view() {
    let (_dir, context) = scenario_context();

    assert_eq!(context.stores(), vec![1, 2]);
    assert_eq!(context.items(), vec![1]);
    assert_eq!(context.dataset().len(), 4);

    let view = context.view(1, 1);
    let summary = view.summary.unwrap();
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());
    assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2017, 1, 3).unwrap());
    assert_eq!(summary.stats.max, 12.0);
    assert_eq!(summary.stats.min, 9.0);
    assert_eq!(summary.stats.median, 10.0);

    let forecast = view.forecast.unwrap();
    assert_eq!(forecast.input.date(), NaiveDate::from_ymd_opt(2017, 1, 4).unwrap());
    assert!((forecast.prediction.value() - 9.9).abs() < 1e-9);

    let fit = view.in_sample.unwrap();
    assert!(fit.mae > 0.0);
}

#[test]
fn test_view_of_unknown_pair_reports_no_data() {
    let (_dir, context) = scenario_context();
    let view = context.view(2, 7);

    assert!(view.summary.is_none());
    let err = view.forecast.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NoData);
}

#[test]
fn test_feature_drift_fails_prediction_only() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(
        dir.path(),
        r#"{ "kind": "linear", "coefficients": [1.0, 1.0] }"#,
        r#"["sales", "rolling_mean_7"]"#,
        DATASET,
    );
    let context = AppContext::load(&paths).unwrap();
    let view = context.view(1, 1);

    assert!(view.summary.is_some());
    let err = view.forecast.unwrap_err();
    assert!(matches!(err, ForecastError::MissingFeature(ref name) if name == "rolling_mean_7"));
    assert_eq!(err.kind(), FailureKind::PredictionFailed);
}

#[test]
fn test_each_artifact_failure_is_reported() {
    let cases = [
        ("{ not json", r#"["sales"]"#, DATASET, ArtifactKind::Model),
        (
            r#"{ "kind": "linear", "coefficients": [] }"#,
            r#"["sales"]"#,
            DATASET,
            ArtifactKind::Model,
        ),
        (r#"{ "kind": "linear", "coefficients": [1.0] }"#, "[]", DATASET, ArtifactKind::Features),
        (
            r#"{ "kind": "linear", "coefficients": [1.0] }"#,
            r#"["sales"]"#,
            "date,store,item\n2017-01-01,1,1\n",
            ArtifactKind::Dataset,
        ),
    ];

    for (model, features, dataset, expected) in cases {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(dir.path(), model, features, dataset);
        let err = AppContext::load(&paths).unwrap_err();

        match &err {
            ForecastError::ArtifactLoad { artifact, .. } => assert_eq!(*artifact, expected),
            other => panic!("Expected ArtifactLoad, got {:?}", other),
        }
        assert_eq!(err.kind(), FailureKind::ArtifactsUnavailable);
    }
}

#[test]
fn test_missing_files_are_artifact_errors() {
    let paths = ArtifactPaths {
        model: "missing/model.json".into(),
        features: "missing/features.json".into(),
        dataset: "missing/train.csv".into(),
    };
    let err = AppContext::load(&paths).unwrap_err();
    assert!(err.to_string().contains("missing/model.json"));
}

#[test]
fn test_export_dataset() {
    let (dir, context) = scenario_context();
    let out = dir.path().join("export.csv");

    context.export_dataset(&out).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), DATASET);
}

#[test]
fn test_sample_artifacts_load_and_forecast() {
    let dir = tempfile::tempdir().unwrap();
    let config = SampleConfig {
        days: 30,
        ..SampleConfig::default()
    };
    let written = SampleArtifacts::generate(&config)
        .unwrap()
        .write(dir.path())
        .unwrap();

    let context = AppContext::load(&ArtifactPaths {
        model: written.model,
        features: written.features,
        dataset: written.dataset,
    })
    .unwrap();

    assert_eq!(context.stores(), vec![1, 2]);
    assert_eq!(context.items(), vec![1, 2, 3]);

    let view = context.view(2, 3);
    assert_eq!(view.summary.unwrap().record_count, 30);
    let forecast = view.forecast.unwrap();
    assert_eq!(forecast.input.date(), NaiveDate::from_ymd_opt(2017, 1, 31).unwrap());
    assert!(forecast.prediction.value() > 0.0);
}
