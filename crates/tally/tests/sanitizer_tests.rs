// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


mod common;

use common::{DIRECTORY_CSV, MENU_CSV};
use proptest::prelude::*;
use tally::data_handler::{
    present_mean, Column, ColumnData, DataFrame, DataType, DatasetMetadata,
};
use tally::{
    CleaningPolicy, ColumnPolicies, DatasetName, SanitizeError, Sanitizer, TableLoader,
};

fn load(name: DatasetName, csv: &str) -> DataFrame {
    TableLoader::strict()
        .load_from_reader(name.as_str(), csv.as_bytes(), &name.requirements())
        .unwrap()
}

fn text_frame(name: &str, column: &str, cells: &[Option<&str>]) -> DataFrame {
    let mut df = DataFrame::new(DatasetMetadata::named(name));
    df.add_column(column.to_string(), Column::from_text(cells)).unwrap();
    df
}

#[test]
fn test_directory_coordinates_are_mean_filled() {
    let raw = load(DatasetName::Directory, DIRECTORY_CSV);
    let cleaned = Sanitizer::new()
        .sanitize(&raw, &DatasetName::Directory.policies())
        .unwrap();
    for name in ["latitude", "longitude"] {
        let column = cleaned.column(name).unwrap();
        assert_eq!(column.data_type(), DataType::Float64);
        assert_eq!(column.null_count(), 0);
    }
    assert_eq!(cleaned.column("latitude").unwrap().to_f64(1), Some(12.0));
    assert_eq!(cleaned.column("longitude").unwrap().to_f64(2), Some(21.0));
    assert_eq!(cleaned.column("City").unwrap(), raw.column("City").unwrap());
}

#[test]
fn test_menu_calories_are_coerced_and_zero_filled() {
    let raw = load(DatasetName::Menu, MENU_CSV);
    assert_eq!(raw.column("Calories").unwrap().data_type(), DataType::String);
    let (cleaned, report) = Sanitizer::new()
        .sanitize_with_report(&raw, &DatasetName::Menu.policies())
        .unwrap();
    let calories = cleaned.column("Calories").unwrap().as_f64_slice().unwrap().to_vec();
    assert_eq!(
        calories,
        vec![Some(50.0), Some(0.0), Some(150.0), Some(0.0), Some(100.0)]
    );
    assert_eq!(report.total_repaired(), 1);
    assert_eq!(report.repairs[0].fill_value, Some(0.0));
}

#[test]
fn test_policy_for_absent_column_is_missing_column_error() {
    let raw = load(DatasetName::Menu, MENU_CSV);
    let policies = ColumnPolicies::new().with("Sugars (g)", CleaningPolicy::None);
    let err = Sanitizer::new().sanitize(&raw, &policies).unwrap_err();
    assert!(matches!(
        err,
        SanitizeError::MissingColumn { ref dataset, ref column } if dataset == "menu" && column == "Sugars (g)"
    ));
}

#[test]
fn test_fill_mean_over_unparseable_column_is_empty_column_error() {
    let df = text_frame("directory", "latitude", &[Some("n/a"), None, Some("-")]);
    let policies = ColumnPolicies::new().with("latitude", CleaningPolicy::CoerceNumericFillMean);
    let err = Sanitizer::new().sanitize(&df, &policies).unwrap_err();
    assert!(matches!(err, SanitizeError::EmptyColumn { ref column, .. } if column == "latitude"));
}

#[test]
fn test_fill_zero_over_unparseable_column_is_all_zero() {
    let df = text_frame("menu", "Calories", &[Some("n/a"), None]);
    let policies = ColumnPolicies::new().with("Calories", CleaningPolicy::CoerceNumericFillZero);
    let cleaned = Sanitizer::new().sanitize(&df, &policies).unwrap();
    assert_eq!(
        cleaned.column("Calories").unwrap().as_f64_slice().unwrap(),
        &[Some(0.0), Some(0.0)]
    );
}

#[test]
fn test_fill_mean_over_zero_rows_is_not_an_error() {
    let df = text_frame("directory", "latitude", &[]);
    let policies = ColumnPolicies::new().with("latitude", CleaningPolicy::CoerceNumericFillMean);
    let cleaned = Sanitizer::new().sanitize(&df, &policies).unwrap();
    assert_eq!(cleaned.row_count(), 0);
}

#[test]
fn test_non_finite_values_count_as_missing() {
    let df = text_frame("directory", "latitude", &[Some("NaN"), Some("2"), Some("inf"), Some("4")]);
    let policies = ColumnPolicies::new().with("latitude", CleaningPolicy::CoerceNumericFillMean);
    let cleaned = Sanitizer::new().sanitize(&df, &policies).unwrap();
    assert_eq!(
        cleaned.column("latitude").unwrap().as_f64_slice().unwrap(),
        &[Some(3.0), Some(2.0), Some(3.0), Some(4.0)]
    );
}

#[test]
fn test_mean_fill_of_huge_values_stays_finite() {
    let df = text_frame("directory", "latitude", &[Some("1e308"), Some("1e308"), None]);
    let policies = ColumnPolicies::new().with("latitude", CleaningPolicy::CoerceNumericFillMean);
    let cleaned = Sanitizer::new().sanitize(&df, &policies).unwrap();
    let values = cleaned.column("latitude").unwrap().numeric_values();
    assert!(values.iter().all(|v| v.is_some_and(f64::is_finite)), "{values:?}");
    assert_eq!(values[2], Some(1e308));
}

#[test]
fn test_sanitize_is_idempotent_on_fixtures() {
    let sanitizer = Sanitizer::new();
    for (name, csv) in [(DatasetName::Directory, DIRECTORY_CSV), (DatasetName::Menu, MENU_CSV)] {
        let policies = name.policies();
        let once = sanitizer.sanitize(&load(name, csv), &policies).unwrap();
        let (twice, report) = sanitizer.sanitize_with_report(&once, &policies).unwrap();
        assert_eq!(once, twice);
        assert_eq!(report.total_repaired(), 0);
    }
}

fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => (-1000.0f64..1000.0).prop_map(|v| Some(v.to_string())),
        1 => Just(None),
        1 => "[a-z-]{1,4}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn prop_sanitize_twice_equals_once(cells in prop::collection::vec(cell(), 1..40)) {
        let cells: Vec<Option<&str>> = cells.iter().map(|c| c.as_deref()).collect();
        let df = text_frame("directory", "latitude", &cells);
        for policy in [CleaningPolicy::CoerceNumericFillMean, CleaningPolicy::CoerceNumericFillZero] {
            let policies = ColumnPolicies::new().with("latitude", policy);
            match Sanitizer::new().sanitize(&df, &policies) {
                Ok(once) => {
                    let twice = Sanitizer::new().sanitize(&once, &policies).unwrap();
                    prop_assert_eq!(&once, &twice);
                    prop_assert_eq!(once.column("latitude").unwrap().null_count(), 0);
                }
                Err(SanitizeError::EmptyColumn { .. }) => {
                    prop_assert_eq!(policy, CleaningPolicy::CoerceNumericFillMean);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }

    #[test]
    fn prop_mean_fill_does_not_shift_the_mean(cells in prop::collection::vec(cell(), 1..40)) {
        let cells: Vec<Option<&str>> = cells.iter().map(|c| c.as_deref()).collect();
        let df = text_frame("directory", "latitude", &cells);
        let before = df.column("latitude").unwrap().numeric_values();
        prop_assume!(before.iter().any(Option::is_some));
        let policies = ColumnPolicies::new().with("latitude", CleaningPolicy::CoerceNumericFillMean);
        let cleaned = Sanitizer::new().sanitize(&df, &policies).unwrap();
        let after = cleaned.column("latitude").unwrap().numeric_values();

        let reference = present_mean(&before).unwrap();
        let originally_present: Vec<Option<f64>> = before
            .iter()
            .zip(&after)
            .map(|(b, a)| b.and(*a))
            .collect();
        let present_after = present_mean(&originally_present).unwrap();
        let overall_after = present_mean(&after).unwrap();
        prop_assert!((present_after - reference).abs() < 1e-9);
        prop_assert!((overall_after - reference).abs() < 1e-6);
    }
}
