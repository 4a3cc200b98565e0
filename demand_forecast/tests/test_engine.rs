use approx::assert_relative_eq;
use chrono::NaiveDate;
use demand_forecast::models::LinearRegressor;
use demand_forecast::{
    forecast_next_day, select, Dataset, FailureKind, FeatureList, FeatureMatrix, ForecastError,
    RegressionModel, Result,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Multiplies the first feature by a factor and counts invocations
#[derive(Debug)]
struct CountingModel {
    factor: f64,
    calls: AtomicUsize,
}

impl CountingModel {
    fn new(factor: f64) -> Self {
        Self {
            factor,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RegressionModel for CountingModel {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(rows.rows().iter().map(|row| row[0] * self.factor).collect())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Always fails, like a model fed the wrong input type
#[derive(Debug)]
struct BrokenModel;

impl RegressionModel for BrokenModel {
    fn predict(&self, _rows: &FeatureMatrix) -> Result<Vec<f64>> {
        Err(ForecastError::InvalidParameter("bad input dtype".to_string()))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

/// Returns nothing at all
#[derive(Debug)]
struct SilentModel;

impl RegressionModel for SilentModel {
    fn predict(&self, _rows: &FeatureMatrix) -> Result<Vec<f64>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

fn scenario_dataset() -> Dataset {
    let mut dataset = Dataset::with_feature_columns(vec!["lag_1".to_string()]);
    dataset.push(date("2017-01-02"), 1, 1, 12.0, vec![10.0]).unwrap();
    dataset.push(date("2017-01-01"), 1, 1, 10.0, vec![f64::NAN]).unwrap();
    dataset.push(date("2017-01-01"), 2, 1, 50.0, vec![f64::NAN]).unwrap();
    dataset.push(date("2017-01-03"), 1, 1, 9.0, vec![12.0]).unwrap();
    dataset
}

#[test]
fn test_three_day_scenario() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();
    let model = LinearRegressor::new(0.0, vec![1.1]).unwrap();

    let forecast = forecast_next_day(&history, &features, &model).unwrap();

    assert_eq!(forecast.input.date(), date("2017-01-04"));
    assert_eq!(forecast.input.record().sales(), 9.0);
    assert_relative_eq!(forecast.prediction.value(), 9.9, epsilon = 1e-9);
    assert_eq!(forecast.prediction.to_string(), "10");
}

#[rstest]
#[case("2017-01-31", "2017-02-01")]
#[case("2016-02-28", "2016-02-29")]
#[case("2017-02-28", "2017-03-01")]
#[case("2017-12-31", "2018-01-01")]
fn test_date_advances_one_calendar_day(#[case] latest: &str, #[case] expected: &str) {
    let mut dataset = Dataset::default();
    dataset.push(date(latest), 4, 2, 3.0, vec![]).unwrap();
    let history = select(&dataset, 4, 2);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();

    let forecast = forecast_next_day(&history, &features, &CountingModel::new(1.0)).unwrap();
    assert_eq!(forecast.input.date(), date(expected));
}

#[test]
fn test_input_carries_latest_values_forward() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let latest = history.latest().unwrap();
    let features = FeatureList::new(vec!["lag_1".to_string()]).unwrap();

    let forecast = forecast_next_day(&history, &features, &CountingModel::new(1.0)).unwrap();
    let input = forecast.input.record();

    assert_eq!(input.store(), latest.store());
    assert_eq!(input.item(), latest.item());
    assert_eq!(input.sales(), latest.sales());
    assert_eq!(input.feature_names(), latest.feature_names());
    assert_eq!(input.feature_values(), latest.feature_values());
    // the historical record itself is untouched
    assert_eq!(latest.date(), date("2017-01-03"));
    assert_eq!(forecast.prediction.value(), 12.0);
}

#[test]
fn test_forecast_is_deterministic() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string(), "lag_1".to_string()]).unwrap();
    let model = LinearRegressor::new(0.3, vec![0.7, 0.2]).unwrap();

    let first = forecast_next_day(&history, &features, &model).unwrap();
    let second = forecast_next_day(&history, &features, &model).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_history_never_reaches_model() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 9, 9);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();
    let model = CountingModel::new(1.0);

    let err = forecast_next_day(&history, &features, &model).unwrap_err();

    assert!(matches!(
        err,
        ForecastError::EmptyHistory { store: 9, item: 9 }
    ));
    assert_eq!(err.kind(), FailureKind::NoData);
    assert_eq!(model.calls(), 0);
}

#[test]
fn test_missing_feature_never_reaches_model() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string(), "rolling_mean_7".to_string()]).unwrap();
    let model = CountingModel::new(1.0);

    let err = forecast_next_day(&history, &features, &model).unwrap_err();

    match &err {
        ForecastError::MissingFeature(name) => assert_eq!(name, "rolling_mean_7"),
        other => panic!("Expected MissingFeature, got {:?}", other),
    }
    assert_eq!(err.kind(), FailureKind::PredictionFailed);
    assert_eq!(model.calls(), 0);
}

#[test]
fn test_model_failure_is_inference_error() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();

    let err = forecast_next_day(&history, &features, &BrokenModel).unwrap_err();
    match err {
        ForecastError::Inference(msg) => assert!(msg.contains("bad input dtype")),
        other => panic!("Expected Inference, got {:?}", other),
    }

    let err = forecast_next_day(&history, &features, &SilentModel).unwrap_err();
    assert!(matches!(err, ForecastError::Inference(_)));
}

#[test]
fn test_shape_mismatch_is_inference_error() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string(), "lag_1".to_string()]).unwrap();
    let model = LinearRegressor::new(0.0, vec![1.0]).unwrap();

    let err = forecast_next_day(&history, &features, &model).unwrap_err();
    assert!(matches!(err, ForecastError::Inference(_)));
}

#[test]
fn test_model_called_once_with_one_row() {
    let dataset = scenario_dataset();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();
    let model = CountingModel::new(2.0);

    let forecast = forecast_next_day(&history, &features, &model).unwrap();
    assert_eq!(model.calls(), 1);
    assert_eq!(forecast.prediction.value(), 18.0);
    assert_eq!(forecast.prediction.units(), 18.0);
}
