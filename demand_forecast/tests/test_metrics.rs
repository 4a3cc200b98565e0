use approx::assert_relative_eq;
use demand_forecast::metrics::{evaluate_in_sample, forecast_accuracy, ReportedMetrics};
use demand_forecast::models::LinearRegressor;
use demand_forecast::{select, Dataset, FeatureList, ForecastError};
use rstest::rstest;

#[test]
fn test_regression_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let accuracy = forecast_accuracy(&predicted, &actual).unwrap();

    assert_relative_eq!(accuracy.mae, 2.4);
    assert_relative_eq!(accuracy.mse, 6.0);
    assert_relative_eq!(accuracy.rmse, 6.0_f64.sqrt());
    assert_relative_eq!(accuracy.r2, 1.0 - 30.0 / 1000.0);
}

#[rstest]
#[case(vec![], vec![])]
#[case(vec![1.0, 2.0], vec![1.0])]
fn test_accuracy_rejects_bad_lengths(#[case] forecast: Vec<f64>, #[case] actual: Vec<f64>) {
    assert!(matches!(
        forecast_accuracy(&forecast, &actual),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_in_sample_fit_of_exact_model() {
    let mut dataset = Dataset::with_feature_columns(vec!["lag_1".to_string()]);
    dataset.push("2017-01-01".parse().unwrap(), 1, 1, 10.0, vec![5.0]).unwrap();
    dataset.push("2017-01-02".parse().unwrap(), 1, 1, 14.0, vec![7.0]).unwrap();
    dataset.push("2017-01-03".parse().unwrap(), 1, 1, 8.0, vec![4.0]).unwrap();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["lag_1".to_string()]).unwrap();
    let model = LinearRegressor::new(0.0, vec![2.0]).unwrap();

    let fit = evaluate_in_sample(&history, &features, &model).unwrap();

    assert_relative_eq!(fit.mae, 0.0);
    assert_relative_eq!(fit.r2, 1.0);
}

#[test]
fn test_in_sample_fit_of_empty_history() {
    let dataset = Dataset::default();
    let history = select(&dataset, 1, 1);
    let features = FeatureList::new(vec!["sales".to_string()]).unwrap();
    let model = LinearRegressor::new(0.0, vec![1.0]).unwrap();

    assert!(matches!(
        evaluate_in_sample(&history, &features, &model),
        Err(ForecastError::EmptyHistory { .. })
    ));
}

#[test]
fn test_reported_metrics_display() {
    let shown = ReportedMetrics::default().to_string();
    assert!(shown.contains("MAE:      ≈ 6.15"));
    assert!(shown.contains("RMSE:     ≈ 8.00"));
    assert!(shown.contains("R² Score: ≈ 0.94"));
}
