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


pub mod context;
pub mod data_handler;
pub mod error;
pub mod reactive;
pub mod views;

pub use context::{DataContext, DatasetName, SourcesConfig};
pub use data_handler::{
    CleaningPolicy, ColumnPolicies, ColumnRequirement, DataFrame, LoadMode, Sanitizer,
    TableLoader, TableSource,
};
pub use error::{DashboardError, FrameError, LoadError, Result, SanitizeError};
pub use reactive::{Emission, ReactiveController, UiEvent, ViewState};
pub use views::{ChartSpec, ControlPanel, DashboardLayout, ViewId, ViewParameters, ViewRegistry};
use std::sync::Arc;

/// Loads and cleans the three sources, then publishes the initial view of
/// every chart. Any failure here is fatal to the dashboard.
pub fn start(config: &SourcesConfig) -> Result<Arc<ReactiveController>> {
    let context = DataContext::load(config)?;
    Ok(Arc::new(ReactiveController::new(context)))
}
