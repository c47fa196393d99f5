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


use crate::views::chart_spec::ViewId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
/// A cluster identifier in its canonical text form. Numbers are rendered the
/// way the dataset renders them, so `1`, `1.0` and `"1"` name the same
/// cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClusterId(String);
impl ClusterId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<&str> for ClusterId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}
impl From<String> for ClusterId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}
impl From<i64> for ClusterId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}
impl From<f64> for ClusterId {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}
impl<'de> Deserialize<'de> for ClusterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Self::from(v),
            Raw::Float(v) => Self::from(v),
            Raw::Text(v) => Self::from(v),
        })
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentationParams {
    pub cluster: ClusterId,
}
impl SegmentationParams {
    pub fn new(cluster: impl Into<ClusterId>) -> Self {
        Self {
            cluster: cluster.into(),
        }
    }
}
/// Inclusive calorie window, always ordered `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieRange {
    low: f64,
    high: f64,
}
impl CalorieRange {
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }
    pub fn low(&self) -> f64 {
        self.low
    }
    pub fn high(&self) -> f64 {
        self.high
    }
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
    /// Intersects the window with `[min, max]`. Non-finite ends fall back to
    /// the bound on their side. A window that misses the bounds entirely is
    /// returned as is, so filtering with it selects nothing.
    pub fn clamped(self, bounds: Option<(f64, f64)>) -> Self {
        let Some((min, max)) = bounds else {
            return self;
        };
        let low = if self.low.is_finite() { self.low } else { min };
        let high = if self.high.is_finite() { self.high } else { max };
        let window = Self::new(low, high);
        if window.high < min || window.low > max {
            return window;
        }
        Self::new(window.low.max(min), window.high.min(max))
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeatmapTrigger(pub u64);
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewParameters {
    Segmentation(SegmentationParams),
    CalorieDistribution(CalorieRange),
    LocationHeatmap { trigger: HeatmapTrigger },
}
impl ViewParameters {
    pub fn view(&self) -> ViewId {
        match self {
            Self::Segmentation(_) => ViewId::Segmentation,
            Self::CalorieDistribution(_) => ViewId::CalorieDistribution,
            Self::LocationHeatmap { .. } => ViewId::LocationHeatmap,
        }
    }
}
