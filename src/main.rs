use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use epi_report::report;
use epi_report::{
    Aggregator, Catalog, DateRange, Demographics, Dimension, Disease, EnvironmentalReading,
    Gender, HealthRecord, Location, LocationKind, OutbreakStatus, RecordFilter, RiskLevel,
    Severity,
};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = build_catalog();
    let today = Local::now().date_naive();
    let records = sample_records(&catalog, 500, today, 42);
    info!(
        "Generated {} sample records across {} locations and {} diseases",
        records.len(),
        catalog.location_count(),
        catalog.disease_count()
    );

    let aggregator = Aggregator::new(&catalog);

    // Distribution charts for every categorical dimension
    for key in [
        "severity",
        "risk_level",
        "outbreak_status",
        "disease_name",
        "disease_type",
        "age_bucket",
        "gender",
        "socioeconomic_status",
        "vaccination_status",
        "hospitalization",
    ] {
        let dimension: Dimension = key.parse()?;
        let series = aggregator.aggregate(&records, dimension, &RecordFilter::new())?;
        info!(
            "{dimension}: {} groups over {} records",
            series.len(),
            series.total()
        );
    }

    let summary = report::dashboard_summary(&aggregator, &records)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let window = DateRange::trailing(today, 30);
    let trends = report::trend_report(&aggregator, &records, Some(window))?;
    info!(
        "Trend window {} to {}: {} total cases",
        window.start,
        window.end,
        trends.totals.iter().sum::<u64>()
    );
    println!("{}", serde_json::to_string_pretty(&trends)?);

    let forecast = report::forecast_report(&aggregator, &records, Some(window), 30)?;
    println!("{}", serde_json::to_string_pretty(&forecast)?);

    if let Some(correlation) = report::aqi_correlation(&records)? {
        info!(
            "AQI correlation over {} samples, {} line points",
            correlation.scatter.len(),
            correlation.line.len()
        );
        println!("{}", serde_json::to_string_pretty(&correlation)?);
    }

    Ok(())
}

/// Demonstration catalog matching the original sample dataset
fn build_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.add_location(Location::new(1, "Downtown", LocationKind::Urban, 120_000));
    catalog.add_location(Location::new(2, "Westside", LocationKind::Suburban, 45_000));
    catalog.add_location(Location::new(3, "Eastside", LocationKind::Suburban, 52_000));
    catalog.add_location(Location::new(4, "Northside", LocationKind::Urban, 98_000));
    catalog.add_location(Location::new(5, "Southside", LocationKind::Rural, 15_000));

    catalog.add_disease(Disease::new(1, "COVID-19", "Viral", 0.7, 5));
    catalog.add_disease(Disease::new(2, "Influenza", "Viral", 0.4, 2));
    catalog.add_disease(Disease::new(3, "E.Coli", "Bacterial", 0.3, 3));
    catalog.add_disease(Disease::new(4, "Malaria", "Parasitic", 0.5, 10));
    catalog.add_disease(Disease::new(5, "Tuberculosis", "Bacterial", 0.6, 21));

    catalog
}

/// Generate a deterministic random dataset over the trailing 60 days
fn sample_records(
    catalog: &Catalog,
    count: usize,
    today: NaiveDate,
    seed: u64,
) -> Vec<HealthRecord> {
    let risks = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
    let outbreaks = [
        OutbreakStatus::None,
        OutbreakStatus::Potential,
        OutbreakStatus::Confirmed,
    ];
    let genders = [Gender::Male, Gender::Female, Gender::Other];
    let statuses = ["Low", "Middle", "High"];

    let diseases: Vec<&Disease> = catalog.diseases().collect();
    let locations: Vec<&Location> = catalog.locations().collect();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let disease = diseases[rng.random_range(0..diseases.len())];
            let location = locations[rng.random_range(0..locations.len())];
            let date = today - Days::new(rng.random_range(0..60));

            let demographics = Demographics::new(
                rng.random_range(1..=90),
                genders[rng.random_range(0..genders.len())],
                statuses[rng.random_range(0..statuses.len())],
            )
            .vaccinated(rng.random_bool(0.6))
            .at_location(location.id);

            let mut record = HealthRecord::new(
                date,
                disease.id,
                disease.name.clone(),
                disease.kind.clone(),
                demographics,
            )
            .with_severity(Severity::ALL[rng.random_range(0..Severity::ALL.len())])
            .with_risk_level(risks[rng.random_range(0..risks.len())])
            .with_outbreak_status(outbreaks[rng.random_range(0..outbreaks.len())])
            .hospitalized(rng.random_bool(0.15));

            if rng.random_bool(0.8) {
                record = record.with_environment(EnvironmentalReading::new(
                    rng.random_range(30..=200),
                    rng.random_range(15.0..35.0),
                    rng.random_range(40.0..80.0),
                ));
            }

            record
        })
        .collect()
}
