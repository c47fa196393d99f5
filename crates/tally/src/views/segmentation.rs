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


use crate::context::{CLUSTER, DIFFICULTY, DURATION, REWARD};
use crate::data_handler::{ColumnData, DataFrame};
use crate::views::chart_spec::{ChartKind, ChartOptions, ChartSpec, ViewId};
use crate::views::params::SegmentationParams;
pub const TITLE: &str = "Customer Segmentation Scatter Plot";
/// Scatter of one cluster's offers: reward against difficulty, sized by
/// duration.
pub fn transform(portfolio: &DataFrame, params: &SegmentationParams) -> ChartSpec {
    let spec = ChartSpec::new(ViewId::Segmentation, ChartKind::Scatter, TITLE, ChartOptions::Scatter)
        .encode("x", REWARD)
        .encode("y", DIFFICULTY)
        .encode("color", CLUSTER)
        .encode("size", DURATION);
    let Some(clusters) = portfolio.get_column(CLUSTER) else {
        return spec.no_data(format!("portfolio has no '{CLUSTER}' column"));
    };
    let selected = params.cluster.as_str();
    let filtered = portfolio.filter(|i| clusters.get_string(i).is_some_and(|v| v == selected));
    let result = filtered.and_then(|frame| {
        spec.clone()
            .with_frame(&frame, &[REWARD, DIFFICULTY, CLUSTER, DURATION], || {
                format!("no offers in cluster {selected}")
            })
    });
    match result {
        Ok(spec) => spec,
        Err(e) => spec.no_data(e.to_string()),
    }
}
