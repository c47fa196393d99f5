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

use common::{fixture_config, fixture_dir, write_csv, PORTFOLIO_CSV};
use tally::context::{CALORIES, CLUSTER, LATITUDE};
use tally::data_handler::ColumnData;
use tally::{DashboardError, DataContext, DatasetName, LoadError, LoadMode, SourcesConfig};

#[test]
fn test_context_loads_and_cleans_all_sources() {
    let dir = fixture_dir();
    let context = DataContext::load(&fixture_config(&dir)).unwrap();

    assert_eq!(context.directory().row_count(), 3);
    assert_eq!(context.menu().row_count(), 5);
    assert_eq!(context.portfolio().row_count(), 5);
    assert_eq!(context.directory().column(LATITUDE).unwrap().null_count(), 0);
    assert_eq!(context.menu().column(CALORIES).unwrap().null_count(), 0);
    assert_eq!(context.clusters(), vec!["0", "1", "2"]);
    assert_eq!(context.calorie_bounds(), Some((0.0, 150.0)));
    assert_eq!(context.calorie_mean(), Some(60.0));
    assert_eq!(context.dataset(DatasetName::Menu).name(), "menu");
}

#[test]
fn test_missing_source_fails_load_and_is_named() {
    let dir = fixture_dir();
    std::fs::remove_file(dir.path().join(&SourcesConfig::default().menu_file)).unwrap();
    let err = DataContext::load(&fixture_config(&dir)).unwrap_err();
    assert_eq!(err.dataset(), Some("menu"));
    assert!(matches!(
        err,
        DashboardError::Load(LoadError::SourceNotFound { .. })
    ));
}

#[test]
fn test_portfolio_without_cluster_fails_even_in_lenient_setup() {
    let dir = fixture_dir();
    let config = fixture_config(&dir);
    let without_cluster: String = PORTFOLIO_CSV
        .lines()
        .map(|line| line.rsplit_once(',').map_or(line, |(head, _)| head))
        .collect::<Vec<_>>()
        .join("\n");
    write_csv(&dir, &config.portfolio_file, &without_cluster);

    assert_eq!(config.mode(DatasetName::Portfolio), LoadMode::Strict);
    let err = DataContext::load(&config).unwrap_err();
    match err {
        DashboardError::Load(LoadError::Schema { dataset, missing }) => {
            assert_eq!(dataset, "portfolio");
            assert_eq!(missing, vec![CLUSTER.to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_strict_directory_needs_only_coordinates() {
    let dir = fixture_dir();
    let mut config = fixture_config(&dir);
    config.directory_mode = LoadMode::Strict;
    write_csv(&dir, &config.directory_file, "latitude,longitude\n1.0,2.0\n3.0,4.0\n");
    let context = DataContext::load(&config).unwrap();
    assert_eq!(context.directory().row_count(), 2);
    assert!(!context.directory().has_column("Store Name"));

    let spec = tally::views::heatmap::transform(
        context.directory(),
        &tally::views::HeatmapTrigger(0),
    );
    assert_eq!(spec.point_count(), 2);
    assert!(!spec.encodings.contains_key("hover_name"));
}

#[test]
fn test_strict_directory_without_longitude_is_a_schema_error() {
    let dir = fixture_dir();
    let mut config = fixture_config(&dir);
    config.directory_mode = LoadMode::Strict;
    write_csv(&dir, &config.directory_file, "Store Name,latitude\nA,1.0\n");
    match DataContext::load(&config).unwrap_err() {
        DashboardError::Load(LoadError::Schema { dataset, missing }) => {
            assert_eq!(dataset, "directory");
            assert_eq!(missing, vec!["longitude".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_directory_without_any_coordinates_cannot_be_cleaned() {
    let dir = fixture_dir();
    let config = fixture_config(&dir);
    write_csv(&dir, &config.directory_file, "Store Name,latitude,longitude\nA,,\nB,,\n");
    let err = DataContext::load(&config).unwrap_err();
    assert!(matches!(err, DashboardError::Sanitize(_)));
    assert_eq!(err.dataset(), Some("directory"));
}

#[test]
fn test_sources_config_resolves_paths_in_data_dir() {
    let config = SourcesConfig::default().with_data_dir("/srv/dashboard");
    let source = config.source(DatasetName::Portfolio);
    assert_eq!(source.name, "portfolio");
    assert_eq!(source.path, std::path::Path::new("/srv/dashboard/portfolio.csv"));
    assert_eq!(config.mode(DatasetName::Directory), LoadMode::Lenient);
}
