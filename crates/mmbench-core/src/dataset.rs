// mmbench - Matrix Multiplication Benchmark Analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Column-oriented view over a table of measurements.
//!
//! A [`Dataset`] is a list of named columns and a list of rows, each row
//! holding exactly one [`Value`] per column. Sources with differing column
//! sets are combined by union, with missing cells filled by [`Value::Null`].

use crate::error::{MmbenchError, MmbenchResult};
use crate::value::Value;

/// An ordered table of measurement rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the column is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a row. The row must have one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> MmbenchResult<()> {
        if row.len() != self.columns.len() {
            return Err(MmbenchError::schema(format!(
                "row has {} values but dataset has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row built alongside the column list.
    ///
    /// The row is resized to the column count: missing trailing values are
    /// null and surplus values are dropped.
    pub fn add_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Borrow a row by position.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row {
            dataset: self,
            index,
        })
    }

    /// Iterate over rows in order.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row {
            dataset: self,
            index,
        })
    }

    /// Cell lookup by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Overwrite a cell. Returns false when the row or column does not exist.
    pub fn set(&mut self, row: usize, column: &str, value: Value) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row) {
            Some(r) => {
                r[col] = value;
                true
            }
            None => false,
        }
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Add a column with every row set to `fill`.
    ///
    /// Returns false and leaves the dataset untouched if the column exists.
    pub fn add_column(&mut self, name: impl Into<String>, fill: Value) -> bool {
        let name = name.into();
        if self.has_column(&name) {
            return false;
        }
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(fill.clone());
        }
        true
    }

    /// Rename a column.
    ///
    /// Returns false if `from` is absent or `to` is already taken.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) {
            return false;
        }
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Append the rows of `other`, widening both sides to the union of
    /// their columns. Columns new to `self` are appended in `other`'s order.
    pub fn append(&mut self, other: Dataset) {
        for name in &other.columns {
            self.add_column(name.clone(), Value::Null);
        }
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();
        let width = self.columns.len();
        for src in other.rows {
            let mut row = vec![Value::Null; width];
            for (value, &dst) in src.into_iter().zip(&mapping) {
                row[dst] = value;
            }
            self.rows.push(row);
        }
    }

    /// Union of several datasets, preserving source order then row order.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Dataset>,
    {
        let mut out = Dataset::default();
        for part in parts {
            out.append(part);
        }
        out
    }

    /// Keep only rows matching the predicate.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let keep_mask: Vec<bool> = self.iter().map(&mut keep).collect();
        let mut mask = keep_mask.into_iter();
        self.rows.retain(|_| mask.next().unwrap_or(false));
    }

    /// Copy of the dataset with only rows matching the predicate.
    pub fn filtered<F>(&self, keep: F) -> Self
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let mut out = self.clone();
        out.retain(keep);
        out
    }
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    index: usize,
}

static NULL: Value = Value::Null;

impl<'a> Row<'a> {
    /// Position of this row in its dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value for a column. Absent columns read as null.
    pub fn get(&self, column: &str) -> &'a Value {
        match self.dataset.column_index(column) {
            Some(col) => &self.dataset.rows[self.index][col],
            None => &NULL,
        }
    }

    /// All values of this row in column order.
    pub fn values(&self) -> &'a [Value] {
        &self.dataset.rows[self.index]
    }
}
