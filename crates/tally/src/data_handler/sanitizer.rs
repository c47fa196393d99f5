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


use crate::data_handler::column::Column;
use crate::data_handler::common::DatasetMetadata;
use crate::data_handler::dataframe::DataFrame;
use crate::error::{SanitizeError, SanitizeResult};
use serde::{Deserialize, Serialize};
use tracing::info;
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CleaningPolicy {
    /// Parse as numbers; unparseable and missing cells take the column mean.
    CoerceNumericFillMean,
    /// Parse as numbers; unparseable and missing cells become 0.
    CoerceNumericFillZero,
    None,
}
/// Column name to policy, applied in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnPolicies {
    entries: Vec<(String, CleaningPolicy)>,
}
impl ColumnPolicies {
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets the policy for `column`, replacing any earlier one.
    pub fn with(mut self, column: impl Into<String>, policy: CleaningPolicy) -> Self {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = policy,
            None => self.entries.push((column, policy)),
        }
        self
    }
    pub fn get(&self, column: &str) -> Option<CleaningPolicy> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, policy)| *policy)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, CleaningPolicy)> {
        self.entries.iter().map(|(name, policy)| (name.as_str(), *policy))
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRepair {
    pub column: String,
    pub policy: CleaningPolicy,
    pub repaired: usize,
    pub fill_value: Option<f64>,
}
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SanitizeReport {
    pub dataset: String,
    pub repairs: Vec<ColumnRepair>,
}
impl SanitizeReport {
    pub fn total_repaired(&self) -> usize {
        self.repairs.iter().map(|r| r.repaired).sum()
    }
}
#[derive(Debug, Clone, Default)]
pub struct Sanitizer;
impl Sanitizer {
    pub fn new() -> Self {
        Self
    }
    pub fn sanitize(
        &self,
        dataset: &DataFrame,
        policies: &ColumnPolicies,
    ) -> SanitizeResult<DataFrame> {
        self.sanitize_with_report(dataset, policies)
            .map(|(cleaned, _)| cleaned)
    }
    pub fn sanitize_with_report(
        &self,
        dataset: &DataFrame,
        policies: &ColumnPolicies,
    ) -> SanitizeResult<(DataFrame, SanitizeReport)> {
        for (column, _) in policies.iter() {
            if !dataset.has_column(column) {
                return Err(SanitizeError::MissingColumn {
                    dataset: dataset.name().to_string(),
                    column: column.to_string(),
                });
            }
        }
        let mut cleaned = dataset.clone();
        cleaned.metadata = DatasetMetadata {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            ..dataset.metadata.derived()
        };
        let mut report = SanitizeReport {
            dataset: dataset.name().to_string(),
            repairs: Vec::new(),
        };
        for (name, policy) in policies.iter() {
            let Some(column) = dataset.get_column(name) else {
                continue;
            };
            let Some((repaired_column, repair)) =
                clean_column(dataset.name(), name, column, policy)?
            else {
                continue;
            };
            cleaned
                .add_column(name.to_string(), repaired_column)
                .map_err(|error| SanitizeError::Frame {
                    dataset: dataset.name().to_string(),
                    error,
                })?;
            info!(
                dataset = dataset.name(),
                column = name,
                policy = ?policy,
                repaired = repair.repaired,
                fill_value = ?repair.fill_value,
                "Sanitized column"
            );
            report.repairs.push(repair);
        }
        Ok((cleaned, report))
    }
}
fn clean_column(
    dataset: &str,
    name: &str,
    column: &Column,
    policy: CleaningPolicy,
) -> SanitizeResult<Option<(Column, ColumnRepair)>> {
    if policy == CleaningPolicy::None {
        return Ok(None);
    }
    let parsed = column.numeric_values();
    let repaired = parsed.iter().filter(|v| v.is_none()).count();
    let fill = match policy {
        CleaningPolicy::CoerceNumericFillMean if repaired > 0 => present_mean(&parsed)
            .ok_or_else(|| SanitizeError::EmptyColumn {
                dataset: dataset.to_string(),
                column: name.to_string(),
            })?,
        _ => 0.0,
    };
    let values: Vec<Option<f64>> = parsed
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill)))
        .collect();
    let repair = ColumnRepair {
        column: name.to_string(),
        policy,
        repaired,
        fill_value: (repaired > 0).then_some(fill),
    };
    Ok(Some((Column::from_f64(values), repair)))
}
/// Arithmetic mean over the values that are present; `None` when there are
/// none. The result is finite whenever the inputs are.
pub fn present_mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let n = present.len() as f64;
    let sum: f64 = present.iter().sum();
    if sum.is_finite() {
        return Some(sum / n);
    }
    // The plain sum overflowed; a scaled running mean stays within the
    // range of the inputs.
    let mean = present
        .iter()
        .enumerate()
        .fold(0.0_f64, |mean, (i, v)| {
            let k = (i + 1) as f64;
            mean + (v / k - mean / k)
        });
    Some(mean)
}
