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


use crate::data_handler::common::{parse_numeric, DataType};
use crate::error::{FrameError, FrameResult};
use rayon::prelude::*;
use std::sync::Arc;
pub trait ColumnData: Send + Sync + std::fmt::Debug {
    fn len(&self) -> usize;
    fn data_type(&self) -> DataType;
    fn null_count(&self) -> usize;
    fn get_string(&self, index: usize) -> Option<String>;
    fn to_f64(&self, index: usize) -> Option<f64>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float64(Arc<[Option<f64>]>),
    String(Arc<[Option<Arc<str>>]>),
}
impl ColumnData for Column {
    fn len(&self) -> usize {
        match self {
            Column::Float64(data) => data.len(),
            Column::String(data) => data.len(),
        }
    }
    fn data_type(&self) -> DataType {
        match self {
            Column::Float64(_) => DataType::Float64,
            Column::String(_) => DataType::String,
        }
    }
    fn null_count(&self) -> usize {
        match self {
            Column::Float64(data) => data.par_iter().filter(|v| v.is_none()).count(),
            Column::String(data) => data.par_iter().filter(|v| v.is_none()).count(),
        }
    }
    fn get_string(&self, index: usize) -> Option<String> {
        match self {
            Column::Float64(data) => data.get(index)?.as_ref().map(|v| v.to_string()),
            Column::String(data) => data.get(index)?.as_ref().map(|s| s.to_string()),
        }
    }
    fn to_f64(&self, index: usize) -> Option<f64> {
        match self {
            Column::Float64(data) => data.get(index).copied()?,
            Column::String(data) => data
                .get(index)
                .and_then(|opt| opt.as_ref().and_then(|s| parse_numeric(s))),
        }
    }
}
impl Column {
    pub fn from_f64(values: Vec<Option<f64>>) -> Self {
        Column::Float64(values.into())
    }
    pub fn from_text<S: AsRef<str>>(values: &[Option<S>]) -> Self {
        let strings: Vec<Option<Arc<str>>> = values
            .iter()
            .map(|opt| opt.as_ref().map(|s| Arc::from(s.as_ref())))
            .collect();
        Column::String(strings.into())
    }
    /// Column of `len` missing numeric cells.
    pub fn null_numeric(len: usize) -> Self {
        Column::Float64(vec![None; len].into())
    }
    /// Column of `len` empty strings.
    pub fn empty_text(len: usize) -> Self {
        let empty: Arc<str> = Arc::from("");
        Column::String(vec![Some(empty); len].into())
    }
    pub fn from_strings(values: &[Option<String>], data_type: DataType) -> Self {
        match data_type {
            DataType::Float64 => {
                let parsed: Vec<Option<f64>> = values
                    .par_iter()
                    .map(|opt| opt.as_deref().and_then(parse_numeric))
                    .collect();
                Column::Float64(parsed.into())
            }
            DataType::String => Self::from_text(values),
        }
    }
    /// Every value read as a number; cells that do not parse come back as `None`.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        match self {
            Column::Float64(data) => data.to_vec(),
            Column::String(data) => data
                .par_iter()
                .map(|opt| opt.as_deref().and_then(parse_numeric))
                .collect(),
        }
    }
    pub fn as_f64_slice(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Float64(data) => Some(&data[..]),
            Column::String(_) => None,
        }
    }
    pub fn select_rows(&self, indices: &[usize]) -> FrameResult<Column> {
        match self {
            Column::Float64(data) => {
                let new_data: FrameResult<Vec<Option<f64>>> = indices
                    .par_iter()
                    .map(|&i| data.get(i).copied().ok_or(FrameError::OutOfBounds(i)))
                    .collect();
                Ok(Column::Float64(new_data?.into()))
            }
            Column::String(data) => {
                let new_data: FrameResult<Vec<Option<Arc<str>>>> = indices
                    .par_iter()
                    .map(|&i| data.get(i).cloned().ok_or(FrameError::OutOfBounds(i)))
                    .collect();
                Ok(Column::String(new_data?.into()))
            }
        }
    }
}
#[derive(Debug)]
pub struct ColumnBuilder {
    values: Vec<Option<String>>,
    all_numeric: bool,
}
impl ColumnBuilder {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            all_numeric: true,
        }
    }
    pub fn push(&mut self, value: Option<String>) {
        let value = value.filter(|s| !s.trim().is_empty());
        if let Some(ref s) = value {
            if self.all_numeric && s.trim().parse::<f64>().is_err() {
                self.all_numeric = false;
            }
        }
        self.values.push(value);
    }
    pub fn inferred_type(&self) -> DataType {
        let has_values = self.values.iter().any(Option::is_some);
        if has_values && self.all_numeric {
            DataType::Float64
        } else {
            DataType::String
        }
    }
    pub fn build(self) -> Column {
        let data_type = self.inferred_type();
        Column::from_strings(&self.values, data_type)
    }
}
impl Default for ColumnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_infers_numeric_only_when_every_cell_parses() {
        let mut numeric = ColumnBuilder::new();
        for v in ["1", " 2.5 ", "", "NaN"] {
            numeric.push(Some(v.to_string()));
        }
        let column = numeric.build();
        assert_eq!(column.data_type(), DataType::Float64);
        assert_eq!(column.as_f64_slice().unwrap(), &[Some(1.0), Some(2.5), None, None]);

        let mut mixed = ColumnBuilder::new();
        for v in ["130", "-", "80"] {
            mixed.push(Some(v.to_string()));
        }
        let column = mixed.build();
        assert_eq!(column.data_type(), DataType::String);
        assert_eq!(column.to_f64(0), Some(130.0));
        assert_eq!(column.to_f64(1), None);
    }

    #[test]
    fn all_blank_column_is_text() {
        let mut builder = ColumnBuilder::new();
        builder.push(None);
        builder.push(Some("  ".to_string()));
        let column = builder.build();
        assert_eq!(column.data_type(), DataType::String);
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn select_rows_rejects_out_of_bounds() {
        let column = Column::from_f64(vec![Some(1.0), Some(2.0)]);
        assert_eq!(column.select_rows(&[1, 0]).unwrap(), Column::from_f64(vec![Some(2.0), Some(1.0)]));
        assert_eq!(column.select_rows(&[2]), Err(FrameError::OutOfBounds(2)));
    }
}
