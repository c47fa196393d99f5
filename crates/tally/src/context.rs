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


use crate::data_handler::{
    present_mean, CleaningPolicy, ColumnPolicies, ColumnRequirement, DataFrame, LoadMode,
    Sanitizer, TableLoader, TableSource,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const STORE_NAME: &str = "Store Name";
pub const CALORIES: &str = "Calories";
pub const CLUSTER: &str = "cluster";
pub const REWARD: &str = "reward";
pub const DIFFICULTY: &str = "difficulty";
pub const DURATION: &str = "duration";
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DatasetName {
    Directory,
    Menu,
    Portfolio,
}
impl DatasetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Menu => "menu",
            Self::Portfolio => "portfolio",
        }
    }
    pub fn requirements(&self) -> Vec<ColumnRequirement> {
        match self {
            Self::Directory => vec![
                ColumnRequirement::numeric(LATITUDE),
                ColumnRequirement::numeric(LONGITUDE),
            ],
            Self::Menu => vec![ColumnRequirement::numeric(CALORIES)],
            Self::Portfolio => vec![
                ColumnRequirement::text(CLUSTER),
                ColumnRequirement::numeric(REWARD),
                ColumnRequirement::numeric(DIFFICULTY),
                ColumnRequirement::numeric(DURATION),
            ],
        }
    }
    pub fn policies(&self) -> ColumnPolicies {
        match self {
            Self::Directory => ColumnPolicies::new()
                .with(LATITUDE, CleaningPolicy::CoerceNumericFillMean)
                .with(LONGITUDE, CleaningPolicy::CoerceNumericFillMean),
            Self::Menu => ColumnPolicies::new().with(CALORIES, CleaningPolicy::CoerceNumericFillZero),
            Self::Portfolio => ColumnPolicies::new()
                .with(CLUSTER, CleaningPolicy::None)
                .with(REWARD, CleaningPolicy::None)
                .with(DIFFICULTY, CleaningPolicy::None)
                .with(DURATION, CleaningPolicy::None),
        }
    }
}
impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
/// Where the three tables live and how forgiving their loads are. The
/// portfolio is always loaded strict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourcesConfig {
    pub data_dir: PathBuf,
    pub directory_file: String,
    pub menu_file: String,
    pub portfolio_file: String,
    pub directory_mode: LoadMode,
    pub menu_mode: LoadMode,
}
impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            directory_file: "directory.csv".to_string(),
            menu_file: "starbucks-menu-nutrition-drinks.csv".to_string(),
            portfolio_file: "portfolio.csv".to_string(),
            directory_mode: LoadMode::Lenient,
            menu_mode: LoadMode::Lenient,
        }
    }
}
impl SourcesConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
    pub fn source(&self, dataset: DatasetName) -> TableSource {
        let file = match dataset {
            DatasetName::Directory => &self.directory_file,
            DatasetName::Menu => &self.menu_file,
            DatasetName::Portfolio => &self.portfolio_file,
        };
        TableSource::new(dataset.as_str(), self.data_dir.join(file))
    }
    pub fn mode(&self, dataset: DatasetName) -> LoadMode {
        match dataset {
            DatasetName::Directory => self.directory_mode,
            DatasetName::Menu => self.menu_mode,
            DatasetName::Portfolio => LoadMode::Strict,
        }
    }
}
/// The three cleaned tables, built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct DataContext {
    directory: DataFrame,
    menu: DataFrame,
    portfolio: DataFrame,
    loaded_at: DateTime<Utc>,
}
impl DataContext {
    pub fn load(config: &SourcesConfig) -> Result<Arc<Self>> {
        let load = |dataset: DatasetName| {
            TableLoader::new(config.mode(dataset))
                .load(&config.source(dataset), &dataset.requirements())
        };
        let (directory, (menu, portfolio)) = rayon::join(
            || load(DatasetName::Directory),
            || rayon::join(|| load(DatasetName::Menu), || load(DatasetName::Portfolio)),
        );
        let context = Self::from_raw(directory?, menu?, portfolio?)?;
        Ok(Arc::new(context))
    }
    /// Sanitizes already loaded tables with the fixed per-dataset policies.
    pub fn from_raw(directory: DataFrame, menu: DataFrame, portfolio: DataFrame) -> Result<Self> {
        let sanitizer = Sanitizer::new();
        let directory = sanitizer.sanitize(&directory, &DatasetName::Directory.policies())?;
        let menu = sanitizer.sanitize(&menu, &DatasetName::Menu.policies())?;
        let portfolio = sanitizer.sanitize(&portfolio, &DatasetName::Portfolio.policies())?;
        info!(
            directory_rows = directory.row_count(),
            menu_rows = menu.row_count(),
            portfolio_rows = portfolio.row_count(),
            "Data context ready"
        );
        Ok(Self {
            directory,
            menu,
            portfolio,
            loaded_at: Utc::now(),
        })
    }
    pub fn directory(&self) -> &DataFrame {
        &self.directory
    }
    pub fn menu(&self) -> &DataFrame {
        &self.menu
    }
    pub fn portfolio(&self) -> &DataFrame {
        &self.portfolio
    }
    pub fn dataset(&self, name: DatasetName) -> &DataFrame {
        match name {
            DatasetName::Directory => &self.directory,
            DatasetName::Menu => &self.menu,
            DatasetName::Portfolio => &self.portfolio,
        }
    }
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
    /// Distinct cluster identifiers in first-seen order.
    pub fn clusters(&self) -> Vec<String> {
        self.portfolio.distinct_strings(CLUSTER).unwrap_or_default()
    }
    pub fn calorie_values(&self) -> Vec<f64> {
        self.menu
            .get_column(CALORIES)
            .map(|column| column.numeric_values().into_iter().flatten().collect())
            .unwrap_or_default()
    }
    /// `(min, max)` of the cleaned calories; `None` for an empty menu.
    pub fn calorie_bounds(&self) -> Option<(f64, f64)> {
        self.calorie_values().into_iter().fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
    pub fn calorie_mean(&self) -> Option<f64> {
        let values: Vec<Option<f64>> = self.calorie_values().into_iter().map(Some).collect();
        present_mean(&values)
    }
}
