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


use crate::data_handler::{Column, DataFrame};
use crate::error::FrameResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Segmentation,
    CalorieDistribution,
    LocationHeatmap,
}
impl ViewId {
    pub const ALL: [ViewId; 3] = [
        Self::Segmentation,
        Self::CalorieDistribution,
        Self::LocationHeatmap,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Segmentation => "segmentation",
            Self::CalorieDistribution => "calorie-distribution",
            Self::LocationHeatmap => "location-heatmap",
        }
    }
    pub fn index(&self) -> usize {
        match self {
            Self::Segmentation => 0,
            Self::CalorieDistribution => 1,
            Self::LocationHeatmap => 2,
        }
    }
}
impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for ViewId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Histogram,
    DensityMap,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}
impl SeriesValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: SeriesValues,
}
impl Series {
    pub fn from_column(name: &str, column: &Column) -> Self {
        let values = match column {
            Column::Float64(data) => SeriesValues::Numeric(data.to_vec()),
            Column::String(data) => SeriesValues::Text(
                data.iter()
                    .map(|opt| opt.as_ref().map(|s| s.to_string()))
                    .collect(),
            ),
        };
        Self {
            name: name.to_string(),
            values,
        }
    }
    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            SeriesValues::Numeric(values) => Some(values.as_slice()),
            SeriesValues::Text(_) => None,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartOptions {
    Scatter,
    Histogram {
        bin_count: usize,
        bin_granularity: f64,
        bins: Vec<HistogramBin>,
    },
    DensityMap {
        center: GeoPoint,
        zoom: u8,
        radius: u32,
        map_style: String,
        height: u32,
    },
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DataStatus {
    Ready { rows: usize },
    NoData { reason: String },
}
/// Renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub view: ViewId,
    pub kind: ChartKind,
    pub title: String,
    pub encodings: BTreeMap<String, String>,
    pub series: Vec<Series>,
    pub options: ChartOptions,
    pub status: DataStatus,
}
impl ChartSpec {
    pub fn new(view: ViewId, kind: ChartKind, title: impl Into<String>, options: ChartOptions) -> Self {
        Self {
            view,
            kind,
            title: title.into(),
            encodings: BTreeMap::new(),
            series: Vec::new(),
            options,
            status: DataStatus::Ready { rows: 0 },
        }
    }
    pub fn encode(mut self, channel: &str, column: &str) -> Self {
        self.encodings.insert(channel.to_string(), column.to_string());
        self
    }
    /// Copies `columns` of `frame` into the spec; a frame with no rows marks
    /// the spec as having no data.
    pub fn with_frame(mut self, frame: &DataFrame, columns: &[&str], empty_reason: impl FnOnce() -> String) -> FrameResult<Self> {
        let mut series = Vec::with_capacity(columns.len());
        for name in columns {
            series.push(Series::from_column(name, frame.column(name)?));
        }
        self.series = series;
        self.status = if frame.row_count() == 0 {
            DataStatus::NoData {
                reason: empty_reason(),
            }
        } else {
            DataStatus::Ready {
                rows: frame.row_count(),
            }
        };
        Ok(self)
    }
    pub fn no_data(mut self, reason: impl Into<String>) -> Self {
        self.series.clear();
        self.status = DataStatus::NoData {
            reason: reason.into(),
        };
        self
    }
    pub fn point_count(&self) -> usize {
        match self.status {
            DataStatus::Ready { rows } => rows,
            DataStatus::NoData { .. } => 0,
        }
    }
    pub fn has_data(&self) -> bool {
        matches!(self.status, DataStatus::Ready { .. })
    }
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}
