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


use crate::views::{ClusterId, ViewId};
use serde::{Deserialize, Serialize};
/// Parameter changes coming from the UI layer. Each one concerns exactly one
/// view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    ClusterSelected { value: ClusterId },
    CalorieRangeChanged { low: f64, high: f64 },
    HeatmapRefreshRequested { trigger_count: u64 },
}
impl UiEvent {
    pub fn view(&self) -> ViewId {
        match self {
            Self::ClusterSelected { .. } => ViewId::Segmentation,
            Self::CalorieRangeChanged { .. } => ViewId::CalorieDistribution,
            Self::HeatmapRefreshRequested { .. } => ViewId::LocationHeatmap,
        }
    }
    pub fn cluster_selected(value: impl Into<ClusterId>) -> Self {
        Self::ClusterSelected {
            value: value.into(),
        }
    }
    pub fn calorie_range_changed(low: f64, high: f64) -> Self {
        Self::CalorieRangeChanged { low, high }
    }
    pub fn heatmap_refresh_requested(trigger_count: u64) -> Self {
        Self::HeatmapRefreshRequested { trigger_count }
    }
}
