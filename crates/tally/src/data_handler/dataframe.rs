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


use crate::data_handler::column::{Column, ColumnData};
use crate::data_handler::common::DatasetMetadata;
use crate::error::{FrameError, FrameResult};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: HashMap<String, Arc<Column>>,
    pub metadata: DatasetMetadata,
    column_order: Vec<String>,
}
impl DataFrame {
    pub fn new(metadata: DatasetMetadata) -> Self {
        Self {
            columns: HashMap::new(),
            metadata,
            column_order: Vec::new(),
        }
    }
    /// Appends a column, or replaces an existing one in place keeping its
    /// position.
    pub fn add_column(&mut self, name: String, column: Column) -> FrameResult<()> {
        let expected = self
            .column_order
            .iter()
            .find(|existing| **existing != name)
            .map(|existing| self.columns[existing].len());
        if let Some(expected) = expected {
            if column.len() != expected {
                return Err(FrameError::LengthMismatch {
                    column: name,
                    expected,
                    found: column.len(),
                });
            }
        }
        if !self.columns.contains_key(&name) {
            self.column_order.push(name.clone());
        }
        self.metadata.row_count = column.len();
        self.columns.insert(name, Arc::new(column));
        self.metadata.column_count = self.columns.len();
        Ok(())
    }
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
    pub fn row_count(&self) -> usize {
        self.metadata.row_count
    }
    pub fn column_count(&self) -> usize {
        self.metadata.column_count
    }
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name).map(|arc| arc.as_ref())
    }
    pub fn column(&self, name: &str) -> FrameResult<&Column> {
        self.get_column(name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }
    /// Row indices, in source order, for which `predicate` holds.
    pub fn matching_rows<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(usize) -> bool + Send + Sync,
    {
        (0..self.row_count())
            .into_par_iter()
            .filter(|&i| predicate(i))
            .collect()
    }
    pub fn filter<P>(&self, predicate: P) -> FrameResult<DataFrame>
    where
        P: Fn(usize) -> bool + Send + Sync,
    {
        let indices = self.matching_rows(predicate);
        self.select_rows(&indices)
    }
    pub fn select_rows(&self, indices: &[usize]) -> FrameResult<DataFrame> {
        let mut metadata = self.metadata.derived();
        metadata.name = format!("{}_filtered", self.metadata.name);
        let mut new_df = DataFrame::new(metadata);
        for name in &self.column_order {
            let new_column = self.columns[name].select_rows(indices)?;
            new_df.add_column(name.clone(), new_column)?;
        }
        new_df.metadata.row_count = indices.len();
        Ok(new_df)
    }
    /// Distinct rendered values of a column in first-seen order, missing cells
    /// skipped.
    pub fn distinct_strings(&self, name: &str) -> FrameResult<Vec<String>> {
        let column = self.column(name)?;
        let mut seen = std::collections::HashSet::new();
        let mut distinct = Vec::new();
        for i in 0..column.len() {
            if let Some(value) = column.get_string(i) {
                if seen.insert(value.clone()) {
                    distinct.push(value);
                }
            }
        }
        Ok(distinct)
    }
}
/// Two frames are equal when they hold the same columns, in the same order,
/// with the same values. Ids and timestamps are ignored.
impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.column_order == other.column_order
            && self.row_count() == other.row_count()
            && self
                .column_order
                .iter()
                .all(|name| self.columns[name] == other.columns[name])
    }
}
