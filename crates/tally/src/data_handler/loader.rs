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


use crate::data_handler::column::{Column, ColumnBuilder};
use crate::data_handler::common::{ColumnKind, ColumnRequirement, DatasetMetadata};
use crate::data_handler::dataframe::DataFrame;
use crate::error::{LoadError, LoadResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
/// How a load reacts to required columns that the source does not carry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    #[default]
    Strict,
    Lenient,
}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSource {
    pub name: String,
    pub path: PathBuf,
}
impl TableSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
#[derive(Debug, Clone)]
pub struct TableLoader {
    mode: LoadMode,
}
impl TableLoader {
    pub fn new(mode: LoadMode) -> Self {
        Self { mode }
    }
    pub fn strict() -> Self {
        Self::new(LoadMode::Strict)
    }
    pub fn lenient() -> Self {
        Self::new(LoadMode::Lenient)
    }
    pub fn load(
        &self,
        source: &TableSource,
        required: &[ColumnRequirement],
    ) -> LoadResult<DataFrame> {
        let file = File::open(&source.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::SourceNotFound {
                dataset: source.name.clone(),
                path: source.path.clone(),
            },
            _ => LoadError::SourceRead {
                dataset: source.name.clone(),
                path: source.path.clone(),
                reason: e.to_string(),
            },
        })?;
        if source.path.is_dir() {
            return Err(LoadError::SourceRead {
                dataset: source.name.clone(),
                path: source.path.clone(),
                reason: "path is a directory".to_string(),
            });
        }
        let mut dataframe = self.read_table(file, &source.name, &source.path)?;
        dataframe.metadata.source_path = Some(source.path.clone());
        self.enforce_schema(dataframe, required)
    }
    /// Same validation as [`TableLoader::load`] over an arbitrary reader.
    pub fn load_from_reader<R: Read>(
        &self,
        name: &str,
        reader: R,
        required: &[ColumnRequirement],
    ) -> LoadResult<DataFrame> {
        let dataframe = self.read_table(reader, name, Path::new("<memory>"))?;
        self.enforce_schema(dataframe, required)
    }
    fn read_table<R: Read>(&self, reader: R, name: &str, path: &Path) -> LoadResult<DataFrame> {
        let read_error = |reason: String| LoadError::SourceRead {
            dataset: name.to_string(),
            path: path.to_path_buf(),
            reason,
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| read_error(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(read_error("no header row".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(read_error(format!("duplicate column '{duplicate}'")));
        }
        let mut builders: Vec<ColumnBuilder> =
            headers.iter().map(|_| ColumnBuilder::new()).collect();
        let mut row_count = 0;
        for record in csv_reader.records() {
            let record = record.map_err(|e| read_error(e.to_string()))?;
            for (builder, field) in builders.iter_mut().zip(record.iter()) {
                builder.push(Some(field.to_string()));
            }
            row_count += 1;
        }
        let mut dataframe = DataFrame::new(DatasetMetadata::named(name));
        for (header, builder) in headers.into_iter().zip(builders) {
            dataframe
                .add_column(header, builder.build())
                .map_err(|error| LoadError::Frame {
                    dataset: name.to_string(),
                    error,
                })?;
        }
        info!(
            dataset = name,
            rows = row_count,
            columns = dataframe.column_count(),
            "Loaded table"
        );
        Ok(dataframe)
    }
    fn enforce_schema(
        &self,
        mut dataframe: DataFrame,
        required: &[ColumnRequirement],
    ) -> LoadResult<DataFrame> {
        let missing: Vec<&ColumnRequirement> = required
            .iter()
            .filter(|req| !dataframe.has_column(&req.name))
            .collect();
        if missing.is_empty() {
            return Ok(dataframe);
        }
        match self.mode {
            LoadMode::Strict => Err(LoadError::Schema {
                dataset: dataframe.name().to_string(),
                missing: missing.iter().map(|req| req.name.clone()).collect(),
            }),
            LoadMode::Lenient => {
                let rows = dataframe.row_count();
                for req in missing {
                    warn!(
                        dataset = dataframe.name(),
                        column = %req.name,
                        kind = ?req.kind,
                        "Required column missing; synthesizing defaults"
                    );
                    let column = match req.kind {
                        ColumnKind::Numeric => Column::null_numeric(rows),
                        ColumnKind::Text => Column::empty_text(rows),
                    };
                    let dataset = dataframe.name().to_string();
                    dataframe
                        .add_column(req.name.clone(), column)
                        .map_err(|error| LoadError::Frame { dataset, error })?;
                }
                debug!(dataset = dataframe.name(), "Schema repaired");
                Ok(dataframe)
            }
        }
    }
}
