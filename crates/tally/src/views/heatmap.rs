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


use crate::context::{LATITUDE, LONGITUDE, STORE_NAME};
use crate::data_handler::{present_mean, DataFrame};
use crate::views::chart_spec::{ChartKind, ChartOptions, ChartSpec, GeoPoint, ViewId};
use crate::views::params::HeatmapTrigger;
pub const TITLE: &str = "Store Location Heatmap";
pub const RADIUS: u32 = 10;
pub const ZOOM: u8 = 3;
pub const HEIGHT: u32 = 600;
pub const MAP_STYLE: &str = "carto-positron";
/// Density map over every store. The trigger only asks for a redraw; it never
/// changes what is drawn.
pub fn transform(directory: &DataFrame, _trigger: &HeatmapTrigger) -> ChartSpec {
    let center = mean_coordinate(directory).unwrap_or(GeoPoint { lat: 0.0, lon: 0.0 });
    let mut spec = ChartSpec::new(
        ViewId::LocationHeatmap,
        ChartKind::DensityMap,
        TITLE,
        ChartOptions::DensityMap {
            center,
            zoom: ZOOM,
            radius: RADIUS,
            map_style: MAP_STYLE.to_string(),
            height: HEIGHT,
        },
    )
    .encode("lat", LATITUDE)
    .encode("lon", LONGITUDE);
    let mut columns = vec![LATITUDE, LONGITUDE];
    if directory.has_column(STORE_NAME) {
        spec = spec.encode("hover_name", STORE_NAME);
        columns.push(STORE_NAME);
    }
    match spec.clone().with_frame(directory, &columns, || "store directory is empty".to_string()) {
        Ok(spec) => spec,
        Err(e) => spec.no_data(e.to_string()),
    }
}
pub fn mean_coordinate(directory: &DataFrame) -> Option<GeoPoint> {
    let lat = present_mean(&directory.get_column(LATITUDE)?.numeric_values())?;
    let lon = present_mean(&directory.get_column(LONGITUDE)?.numeric_values())?;
    Some(GeoPoint { lat, lon })
}
