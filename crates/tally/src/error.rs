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


use std::path::PathBuf;
use thiserror::Error;
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Sanitization error: {0}")]
    Sanitize(#[from] SanitizeError),
    #[error("Dataframe error: {0}")]
    Frame(#[from] FrameError),
}
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source '{dataset}' not found at '{}'", .path.display())]
    SourceNotFound { dataset: String, path: PathBuf },
    #[error("Failed to read source '{dataset}' at '{}': {reason}", .path.display())]
    SourceRead {
        dataset: String,
        path: PathBuf,
        reason: String,
    },
    #[error("Source '{dataset}' is missing required columns: {}", .missing.join(", "))]
    Schema {
        dataset: String,
        missing: Vec<String>,
    },
    #[error("Source '{dataset}' produced an invalid table: {error}")]
    Frame {
        dataset: String,
        #[source]
        error: FrameError,
    },
}
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("Cleaning policy references column '{column}' which is absent from dataset '{dataset}'")]
    MissingColumn { dataset: String, column: String },
    #[error("Column '{column}' in dataset '{dataset}' has no parseable numeric values; mean is undefined")]
    EmptyColumn { dataset: String, column: String },
    #[error("Failed to rebuild dataset '{dataset}': {error}")]
    Frame {
        dataset: String,
        #[source]
        error: FrameError,
    },
}
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Column length mismatch for '{column}': expected {expected}, got {found}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Index out of bounds: {0}")]
    OutOfBounds(usize),
}
pub type Result<T> = std::result::Result<T, DashboardError>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;
pub type SanitizeResult<T> = std::result::Result<T, SanitizeError>;
pub type FrameResult<T> = std::result::Result<T, FrameError>;
impl DashboardError {
    pub fn dataset(&self) -> Option<&str> {
        match self {
            DashboardError::Load(
                LoadError::SourceNotFound { dataset, .. }
                | LoadError::SourceRead { dataset, .. }
                | LoadError::Schema { dataset, .. }
                | LoadError::Frame { dataset, .. },
            )
            | DashboardError::Sanitize(
                SanitizeError::MissingColumn { dataset, .. }
                | SanitizeError::EmptyColumn { dataset, .. }
                | SanitizeError::Frame { dataset, .. },
            ) => Some(dataset),
            DashboardError::Frame(_) => None,
        }
    }
}
