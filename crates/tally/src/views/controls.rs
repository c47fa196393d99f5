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


use crate::context::DataContext;
use crate::views::chart_spec::ViewId;
use crate::views::params::{CalorieRange, ClusterId, HeatmapTrigger, SegmentationParams, ViewParameters};
use serde::Serialize;
pub const DASHBOARD_TITLE: &str = "Starbucks Dashboard";
pub const SLIDER_STEP: f64 = 10.0;
pub const MARK_INTERVAL: i64 = 100;
pub const MAX_MARKS: i64 = 50;
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: ClusterId,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterDropdown {
    pub options: Vec<DropdownOption>,
    pub default: Option<ClusterId>,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: i64,
    pub label: String,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub default: CalorieRange,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshButton {
    pub label: String,
}
/// The input widgets of the dashboard with their data-derived defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    pub cluster_dropdown: ClusterDropdown,
    pub calorie_slider: CalorieSlider,
    pub heatmap_button: RefreshButton,
}
impl ControlPanel {
    pub fn from_context(context: &DataContext) -> Self {
        let options: Vec<DropdownOption> = context
            .clusters()
            .into_iter()
            .map(|value| DropdownOption {
                label: format!("Cluster {value}"),
                value: ClusterId::new(value),
            })
            .collect();
        let default = options.first().map(|o| o.value.clone());
        let (min, max) = context.calorie_bounds().unwrap_or((0.0, 0.0));
        let mean = context.calorie_mean().unwrap_or(min);
        Self {
            cluster_dropdown: ClusterDropdown { options, default },
            calorie_slider: CalorieSlider {
                min,
                max,
                step: SLIDER_STEP,
                marks: slider_marks(max),
                default: CalorieRange::new(min, mean),
            },
            heatmap_button: RefreshButton {
                label: "Update Heatmap".to_string(),
            },
        }
    }
    /// Parameters each view is first rendered with.
    pub fn default_parameters(&self, view: ViewId) -> ViewParameters {
        match view {
            ViewId::Segmentation => ViewParameters::Segmentation(SegmentationParams {
                cluster: self
                    .cluster_dropdown
                    .default
                    .clone()
                    .unwrap_or_else(|| ClusterId::new("")),
            }),
            ViewId::CalorieDistribution => {
                ViewParameters::CalorieDistribution(self.calorie_slider.default)
            }
            ViewId::LocationHeatmap => ViewParameters::LocationHeatmap {
                trigger: HeatmapTrigger::default(),
            },
        }
    }
}
/// Marks every hundred calories from zero up to `max`. Wide ranges widen the
/// spacing to a multiple of a hundred so there are never more than
/// `MAX_MARKS + 1` marks.
pub fn slider_marks(max: f64) -> Vec<SliderMark> {
    if !max.is_finite() || max < 0.0 {
        return Vec::new();
    }
    let top = max as i64;
    let steps = top / MARK_INTERVAL;
    let interval = MARK_INTERVAL * ((steps + MAX_MARKS - 1) / MAX_MARKS).max(1);
    (0..=top)
        .step_by(usize::try_from(interval).unwrap_or(usize::MAX))
        .map(|value| SliderMark {
            value,
            label: value.to_string(),
        })
        .collect()
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    pub heading: String,
    pub view: ViewId,
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub tabs: Vec<Tab>,
    pub controls: ControlPanel,
}
impl DashboardLayout {
    pub fn new(controls: ControlPanel) -> Self {
        let tab = |label: &str, heading: &str, view| Tab {
            label: label.to_string(),
            heading: heading.to_string(),
            view,
        };
        Self {
            title: DASHBOARD_TITLE.to_string(),
            tabs: vec![
                tab("Customer Segmentation", "Customer Segmentation Analysis", ViewId::Segmentation),
                tab("Menu Optimization", "Menu Optimization Insights", ViewId::CalorieDistribution),
                tab("Store Location Optimization", "Store Location Insights", ViewId::LocationHeatmap),
            ],
            controls,
        }
    }
}
