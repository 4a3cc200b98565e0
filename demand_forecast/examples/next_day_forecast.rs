use demand_forecast::sample::{SampleArtifacts, SampleConfig};
use demand_forecast::summary::EntitySummary;
use demand_forecast::{forecast_next_day, select};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate a small synthetic dataset with a matching model
    let artifacts = SampleArtifacts::generate(&SampleConfig::default())?;
    println!("Generated {} records", artifacts.dataset.len());

    for store in artifacts.dataset.stores() {
        for item in artifacts.dataset.items() {
            let history = select(&artifacts.dataset, store, item);
            let Some(summary) = EntitySummary::from_history(&history) else {
                continue;
            };

            let forecast = forecast_next_day(&history, &artifacts.features, &artifacts.model)?;
            println!(
                "Store {} / item {}: {} records ({} -> {}), next day {} forecast {} units",
                store,
                item,
                summary.record_count,
                summary.first_date,
                summary.last_date,
                forecast.input.date(),
                forecast.prediction
            );
        }
    }

    Ok(())
}
