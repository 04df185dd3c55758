//! Tests for the chart payload builders

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use epi_report::report::{
        aqi_correlation, dashboard_summary, environmental_impact, forecast_report, trend_report,
    };
    use epi_report::{
        Aggregator, Catalog, DateRange, Demographics, Disease, EnvironmentalReading, Gender,
        HealthRecord, Location, LocationKind, Severity,
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_location(Location::new(1, "Downtown", LocationKind::Urban, 120_000));
        catalog.add_location(Location::new(2, "Southside", LocationKind::Rural, 15_000));
        catalog.add_disease(Disease::new(1, "COVID-19", "Viral", 0.7, 5));
        catalog.add_disease(Disease::new(2, "E.Coli", "Bacterial", 0.3, 3));
        catalog
    }

    fn record(collection_date: NaiveDate, severity: Severity) -> HealthRecord {
        let demographics = Demographics::new(34, Gender::Female, "Middle").at_location(1);
        HealthRecord::new(collection_date, 1, "COVID-19", "Viral", demographics)
            .with_severity(severity)
    }

    #[test]
    fn trend_breakdown_is_dense_per_severity() {
        let records = vec![
            record(date(2024, 1, 1), Severity::Mild),
            record(date(2024, 1, 3), Severity::Moderate),
            record(date(2024, 1, 3), Severity::Moderate),
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();

        let aggregator = Aggregator::new(catalog());
        let breakdown = trend_report(&aggregator, &records, Some(range)).unwrap();

        assert_eq!(breakdown.dates.len(), 5);
        assert_eq!(breakdown.totals, vec![1, 0, 2, 0, 0]);

        assert_eq!(breakdown.series.len(), 4);
        for category in &breakdown.series {
            assert_eq!(category.values.len(), 5, "{}", category.label);
        }

        let mild = breakdown.series.iter().find(|s| s.label == "Mild").unwrap();
        assert_eq!(mild.values, vec![1, 0, 0, 0, 0]);
        let moderate = breakdown
            .series
            .iter()
            .find(|s| s.label == "Moderate")
            .unwrap();
        assert_eq!(moderate.values, vec![0, 0, 2, 0, 0]);
        let severe = breakdown.series.iter().find(|s| s.label == "Severe").unwrap();
        assert_eq!(severe.values, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn summary_counts_records_and_distinct_entities() {
        let day = date(2024, 3, 1);
        let mut records = vec![
            record(day, Severity::Mild),
            record(day, Severity::Severe).hospitalized(true),
        ];
        let other_site = Demographics::new(61, Gender::Male, "Low").at_location(2);
        records.push(
            HealthRecord::new(day, 2, "E.Coli", "Bacterial", other_site).with_severity(Severity::Mild),
        );

        let aggregator = Aggregator::new(catalog());
        let summary = dashboard_summary(&aggregator, &records).unwrap();

        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.distinct_diseases, 2);
        assert_eq!(summary.distinct_locations, 2);
        assert_eq!(summary.hospitalized, 1);
        assert_eq!(summary.severity.total(), 3);
        assert_eq!(summary.severity.labels[0], "Mild");
        assert_eq!(summary.risk.total(), 3);
        assert_eq!(summary.outbreak.total(), 3);
    }

    #[test]
    fn forecast_report_extends_the_observed_window() {
        let records = vec![
            record(date(2024, 1, 1), Severity::Mild),
            record(date(2024, 1, 2), Severity::Mild),
            record(date(2024, 1, 4), Severity::Moderate),
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();

        let aggregator = Aggregator::new(catalog());
        let forecast = forecast_report(&aggregator, &records, Some(range), 7).unwrap();

        assert_eq!(forecast.dates.len(), 5);
        assert_eq!(forecast.counts, vec![1, 1, 0, 1, 0]);
        assert_eq!(forecast.prediction_dates.len(), 7);
        assert_eq!(forecast.prediction_counts.len(), 7);
        assert_eq!(forecast.prediction_dates[0], date(2024, 1, 6));
        assert_eq!(forecast.prediction_dates[6], date(2024, 1, 12));
    }

    #[test]
    fn forecast_report_is_empty_without_observations() {
        let aggregator = Aggregator::new(catalog());
        let forecast = forecast_report(&aggregator, &[], None, 7).unwrap();

        assert!(forecast.dates.is_empty());
        assert!(forecast.counts.is_empty());
        assert!(forecast.prediction_dates.is_empty());
        assert!(forecast.prediction_counts.is_empty());
    }

    #[test]
    fn environmental_samples_skip_records_without_readings() {
        let day = date(2024, 3, 1);
        let with_reading = record(day, Severity::Severe)
            .with_environment(EnvironmentalReading::new(150, 28.0, 65.0));
        let another = record(day, Severity::None)
            .with_environment(EnvironmentalReading::new(45, 21.0, 50.0));
        let without = record(day, Severity::Mild);
        let records = vec![with_reading, without, another];

        let samples = environmental_impact(&records, None);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].air_quality_index, 150);
        assert_eq!(samples[0].severity, 3);
        assert_eq!(samples[1].severity, 0);

        let capped = environmental_impact(&records, Some(1));
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn aqi_correlation_needs_two_readings() {
        let day = date(2024, 3, 1);
        let lone = vec![
            record(day, Severity::Mild).with_environment(EnvironmentalReading::new(80, 22.0, 55.0)),
        ];
        assert!(aqi_correlation(&lone).unwrap().is_none());

        let records = vec![
            record(day, Severity::None).with_environment(EnvironmentalReading::new(40, 20.0, 50.0)),
            record(day, Severity::Mild).with_environment(EnvironmentalReading::new(90, 24.0, 60.0)),
            record(day, Severity::Severe)
                .with_environment(EnvironmentalReading::new(190, 31.0, 70.0)),
        ];

        let correlation = aqi_correlation(&records).unwrap().unwrap();
        assert_eq!(correlation.scatter.len(), 3);
        assert!(!correlation.line.is_empty());
        assert_eq!(correlation.line[0].x, 40.0);

        // Severity rises with AQI in this sample, so the fitted slope is positive
        let first = correlation.line.first().unwrap();
        let last = correlation.line.last().unwrap();
        assert!(last.y > first.y);
    }
}
