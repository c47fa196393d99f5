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


pub mod calorie;
pub mod chart_spec;
pub mod controls;
pub mod heatmap;
pub mod params;
pub mod segmentation;
pub use chart_spec::{
    ChartKind, ChartOptions, ChartSpec, DataStatus, GeoPoint, HistogramBin, Series, SeriesValues,
    ViewId,
};
pub use controls::{ControlPanel, DashboardLayout};
pub use params::{CalorieRange, ClusterId, HeatmapTrigger, SegmentationParams, ViewParameters};
use crate::context::{DataContext, DatasetName};
use serde::Serialize;
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDefinition {
    pub id: ViewId,
    pub title: &'static str,
    pub datasets: &'static [DatasetName],
}
/// The three dashboard views and their bindings. Rendering is a pure
/// function of the data context and the parameters.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    definitions: Vec<ViewDefinition>,
}
impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            definitions: vec![
                ViewDefinition {
                    id: ViewId::Segmentation,
                    title: segmentation::TITLE,
                    datasets: &[DatasetName::Portfolio],
                },
                ViewDefinition {
                    id: ViewId::CalorieDistribution,
                    title: calorie::TITLE,
                    datasets: &[DatasetName::Menu],
                },
                ViewDefinition {
                    id: ViewId::LocationHeatmap,
                    title: heatmap::TITLE,
                    datasets: &[DatasetName::Directory],
                },
            ],
        }
    }
    pub fn definitions(&self) -> &[ViewDefinition] {
        &self.definitions
    }
    pub fn render(&self, context: &DataContext, params: &ViewParameters) -> ChartSpec {
        match params {
            ViewParameters::Segmentation(p) => segmentation::transform(context.portfolio(), p),
            ViewParameters::CalorieDistribution(range) => calorie::transform(context.menu(), range),
            ViewParameters::LocationHeatmap { trigger } => {
                heatmap::transform(context.directory(), trigger)
            }
        }
    }
}
impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
