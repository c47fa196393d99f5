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


use crate::context::CALORIES;
use crate::data_handler::{ColumnData, DataFrame};
use crate::views::chart_spec::{ChartKind, ChartOptions, ChartSpec, HistogramBin, ViewId};
use crate::views::params::CalorieRange;
pub const TITLE: &str = "Calorie Distribution";
pub const BIN_COUNT: usize = 20;
pub const BIN_GRANULARITY: f64 = 10.0;
/// Histogram of menu items whose calories fall inside `range`, inclusive.
pub fn transform(menu: &DataFrame, range: &CalorieRange) -> ChartSpec {
    let spec = ChartSpec::new(
        ViewId::CalorieDistribution,
        ChartKind::Histogram,
        TITLE,
        histogram_options(&[]),
    )
    .encode("x", CALORIES);
    let Some(calories) = menu.get_column(CALORIES) else {
        return spec.no_data(format!("menu has no '{CALORIES}' column"));
    };
    let filtered = menu.filter(|i| calories.to_f64(i).is_some_and(|v| range.contains(v)));
    let result = filtered.and_then(|frame| {
        let values: Vec<f64> = frame
            .column(CALORIES)?
            .numeric_values()
            .into_iter()
            .flatten()
            .collect();
        let mut spec = spec.clone().with_frame(&frame, &[CALORIES], || {
            format!(
                "no items between {} and {} calories",
                range.low(),
                range.high()
            )
        })?;
        spec.options = histogram_options(&values);
        Ok(spec)
    });
    match result {
        Ok(spec) => spec,
        Err(e) => spec.no_data(e.to_string()),
    }
}
fn histogram_options(values: &[f64]) -> ChartOptions {
    ChartOptions::Histogram {
        bin_count: BIN_COUNT,
        bin_granularity: BIN_GRANULARITY,
        bins: bin_values(values),
    }
}
/// Buckets `values` into exactly [`BIN_COUNT`] equal bins whose edges sit on
/// multiples of [`BIN_GRANULARITY`]. The last bin is closed on the right.
pub fn bin_values(values: &[f64]) -> Vec<HistogramBin> {
    let Some((min, max)) = values.iter().fold(None, |bounds: Option<(f64, f64)>, &v| {
        Some(bounds.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        return Vec::new();
    };
    let start = (min / BIN_GRANULARITY).floor() * BIN_GRANULARITY;
    let span = max - start;
    let width = ((span / BIN_COUNT as f64 / BIN_GRANULARITY).ceil() * BIN_GRANULARITY)
        .max(BIN_GRANULARITY);
    let mut bins: Vec<HistogramBin> = (0..BIN_COUNT)
        .map(|i| HistogramBin {
            start: start + width * i as f64,
            end: start + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let index = (((v - start) / width).floor() as usize).min(BIN_COUNT - 1);
        bins[index].count += 1;
    }
    bins
}
