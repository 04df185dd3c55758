//! Tests for record aggregation: grouping, ordering, filters, and caps

use chrono::NaiveDate;
use epi_report::{
    AggregateConfig, Aggregator, Catalog, DateRange, Demographics, Dimension, Disease, Error,
    FilterFallback, Gender, HealthRecord, Location, LocationKind, RecordFilter, Severity,
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
fn severity_groups_order_descending_by_count() {
    let day = date(2024, 3, 1);
    let records = vec![
        record(day, Severity::Mild),
        record(day, Severity::Moderate),
        record(day, Severity::Moderate),
    ];

    let aggregator = Aggregator::new(catalog());
    let series = aggregator
        .aggregate(&records, Dimension::Severity, &RecordFilter::new())
        .unwrap();

    assert_eq!(series.labels, vec!["Moderate", "Mild"]);
    assert_eq!(series.values, vec![2, 1]);
}

#[test]
fn labels_and_values_stay_aligned_across_dimensions() {
    let records: Vec<HealthRecord> = (0..40)
        .map(|i| {
            let demographics = Demographics::new(
                (i % 88) + 1,
                if i % 2 == 0 { Gender::Male } else { Gender::Female },
                if i % 3 == 0 { "Low" } else { "High" },
            )
            .vaccinated(i % 4 == 0)
            .at_location(1 + (i % 2));
            HealthRecord::new(
                date(2024, 1, 1 + (i % 5)),
                1 + (i % 2),
                if i % 2 == 0 { "COVID-19" } else { "E.Coli" },
                if i % 2 == 0 { "Viral" } else { "Bacterial" },
                demographics,
            )
            .with_severity(Severity::ALL[(i % 4) as usize])
            .hospitalized(i % 7 == 0)
        })
        .collect();

    let aggregator = Aggregator::new(catalog());
    for dimension in [
        Dimension::Severity,
        Dimension::RiskLevel,
        Dimension::OutbreakStatus,
        Dimension::DiseaseName,
        Dimension::DiseaseType,
        Dimension::AgeBucket,
        Dimension::Gender,
        Dimension::SocioeconomicStatus,
        Dimension::VaccinationStatus,
        Dimension::Hospitalization,
        Dimension::CollectionDate,
    ] {
        let series = aggregator
            .aggregate(&records, dimension, &RecordFilter::new())
            .unwrap();
        assert_eq!(series.labels.len(), series.values.len(), "{dimension}");
        assert_eq!(series.total(), 40, "{dimension}");
    }
}

#[test]
fn boolean_dimensions_use_fixed_label_order() {
    let day = date(2024, 3, 1);
    let records: Vec<HealthRecord> = (0..3)
        .map(|_| {
            let demographics =
                Demographics::new(50, Gender::Male, "Low").vaccinated(true).at_location(1);
            HealthRecord::new(day, 1, "COVID-19", "Viral", demographics)
        })
        .collect();

    let aggregator = Aggregator::new(catalog());

    let vaccination = aggregator
        .aggregate(&records, Dimension::VaccinationStatus, &RecordFilter::new())
        .unwrap();
    assert_eq!(vaccination.labels, vec!["Vaccinated", "Not Vaccinated"]);
    assert_eq!(vaccination.values, vec![3, 0]);

    let hospitalization = aggregator
        .aggregate(&records, Dimension::Hospitalization, &RecordFilter::new())
        .unwrap();
    assert_eq!(
        hospitalization.labels,
        vec!["Hospitalized", "Not Hospitalized"]
    );
    assert_eq!(hospitalization.values, vec![0, 3]);
}

#[test]
fn disease_prevalence_keeps_top_ten_by_count() {
    let day = date(2024, 3, 1);
    let mut records = Vec::new();
    for disease in 0..15_u32 {
        for _ in 0..=disease {
            let demographics = Demographics::new(40, Gender::Other, "Middle").at_location(1);
            records.push(HealthRecord::new(
                day,
                disease,
                format!("Disease {disease}"),
                "Viral",
                demographics,
            ));
        }
    }

    let aggregator = Aggregator::new(catalog());
    let series = aggregator
        .aggregate(&records, Dimension::DiseaseName, &RecordFilter::new())
        .unwrap();

    assert_eq!(series.labels.len(), 10);
    assert_eq!(series.labels[0], "Disease 14");
    assert!(series.values.windows(2).all(|pair| pair[0] >= pair[1]));

    let unlimited = Aggregator::new(catalog()).with_config(AggregateConfig {
        top_diseases: None,
        ..AggregateConfig::default()
    });
    let series = unlimited
        .aggregate(&records, Dimension::DiseaseName, &RecordFilter::new())
        .unwrap();
    assert_eq!(series.labels.len(), 15);
}

#[test]
fn unknown_dimension_key_is_rejected() {
    let parsed = "prevalence_by_moon_phase".parse::<Dimension>();
    assert!(matches!(parsed, Err(Error::InvalidDimension(_))));

    assert_eq!("Severity".parse::<Dimension>().unwrap(), Dimension::Severity);
    assert_eq!("date".parse::<Dimension>().unwrap(), Dimension::CollectionDate);
}

#[test]
fn unresolvable_location_filter_fails_by_default() {
    let records = vec![record(date(2024, 3, 1), Severity::Mild)];
    let filter = RecordFilter::new().at_location(99);

    let aggregator = Aggregator::new(catalog());
    let result = aggregator.aggregate(&records, Dimension::Severity, &filter);
    assert!(matches!(result, Err(Error::LocationNotFound(99))));
}

#[test]
fn unresolvable_filter_can_degrade_to_unfiltered() {
    let records = vec![
        record(date(2024, 3, 1), Severity::Mild),
        record(date(2024, 3, 1), Severity::Mild),
    ];
    let filter = RecordFilter::new().for_disease(42);

    let aggregator = Aggregator::new(catalog()).with_config(AggregateConfig {
        missing_entity: FilterFallback::IgnoreFilter,
        ..AggregateConfig::default()
    });
    let series = aggregator
        .aggregate(&records, Dimension::Severity, &filter)
        .unwrap();
    assert_eq!(series.total(), 2);
}

#[test]
fn record_cap_truncates_unless_disabled() {
    let records: Vec<HealthRecord> = (0..30)
        .map(|_| record(date(2024, 3, 1), Severity::Mild))
        .collect();

    let capped = Aggregator::new(catalog()).with_config(AggregateConfig {
        record_cap: Some(10),
        ..AggregateConfig::default()
    });
    let series = capped
        .aggregate(&records, Dimension::Severity, &RecordFilter::new())
        .unwrap();
    assert_eq!(series.total(), 10);

    let uncapped = Aggregator::new(catalog()).with_config(AggregateConfig {
        record_cap: None,
        ..AggregateConfig::default()
    });
    let series = uncapped
        .aggregate(&records, Dimension::Severity, &RecordFilter::new())
        .unwrap();
    assert_eq!(series.total(), 30);
}

#[test]
fn bounded_date_dimension_zero_fills_gap_days() {
    let records = vec![
        record(date(2024, 1, 1), Severity::Mild),
        record(date(2024, 1, 1), Severity::Moderate),
        record(date(2024, 1, 3), Severity::Mild),
    ];
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
    let filter = RecordFilter::new().in_range(range);

    let aggregator = Aggregator::new(catalog());
    let series = aggregator
        .aggregate(&records, Dimension::CollectionDate, &filter)
        .unwrap();

    assert_eq!(
        series.labels,
        vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
    assert_eq!(series.values, vec![2, 0, 1, 0, 0]);

    // Without bounds only the days that carry records appear
    let series = aggregator
        .aggregate(&records, Dimension::CollectionDate, &RecordFilter::new())
        .unwrap();
    assert_eq!(series.labels, vec!["2024-01-01", "2024-01-03"]);
    assert_eq!(series.values, vec![2, 1]);
}

#[test]
fn demographic_filters_narrow_the_selection() {
    let day = date(2024, 3, 1);
    let mut records = Vec::new();
    for (age, gender) in [(10, Gender::Male), (35, Gender::Female), (70, Gender::Female)] {
        let demographics = Demographics::new(age, gender, "Middle").at_location(1);
        records.push(HealthRecord::new(day, 1, "COVID-19", "Viral", demographics));
    }

    let aggregator = Aggregator::new(catalog());

    let by_gender = RecordFilter::new().of_gender(Gender::Female);
    let series = aggregator
        .aggregate(&records, Dimension::Gender, &by_gender)
        .unwrap();
    assert_eq!(series.labels, vec!["Female"]);
    assert_eq!(series.values, vec![2]);

    let by_age = RecordFilter::new().aged(Some(18), Some(64));
    let series = aggregator
        .aggregate(&records, Dimension::AgeBucket, &by_age)
        .unwrap();
    assert_eq!(series.labels, vec!["30-44"]);
    assert_eq!(series.values, vec![1]);

    let out_of_range = RecordFilter::new()
        .in_range(DateRange::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap());
    let series = aggregator
        .aggregate(&records, Dimension::Gender, &out_of_range)
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn count_ties_keep_first_encountered_order() {
    let day = date(2024, 3, 1);
    let records = vec![
        record(day, Severity::Severe),
        record(day, Severity::Mild),
        record(day, Severity::Moderate),
        record(day, Severity::Mild),
    ];

    let aggregator = Aggregator::new(catalog());
    let series = aggregator
        .aggregate(&records, Dimension::Severity, &RecordFilter::new())
        .unwrap();

    // Mild leads on count; Severe and Moderate tie and keep input order
    assert_eq!(series.labels, vec!["Mild", "Severe", "Moderate"]);
    assert_eq!(series.values, vec![2, 1, 1]);
}
