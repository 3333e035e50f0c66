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

//! Cell values for measurement tables.

use serde::Serialize;

/// A single cell in a measurement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or unknown value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer (strict, no coercion).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float (integers widen).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce to an integer the way measurement columns are read.
    ///
    /// Integers pass through, integral finite floats are narrowed, and numeric
    /// strings are parsed. Everything else is unknown (`None`); there is no
    /// sentinel value.
    pub fn coerce_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) => float_to_int(*f),
            Self::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_int))
            }
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Coerce to a finite float. `NaN` and infinities are unknown.
    pub fn coerce_float(&self) -> Option<f64> {
        let f = match self {
            Self::Int(n) => *n as f64,
            Self::Float(f) => *f,
            Self::String(s) => s.trim().parse::<f64>().ok()?,
            Self::Null | Self::Bool(_) => return None,
        };
        f.is_finite().then_some(f)
    }

    /// Hashable identity of this value, used for grouping rows.
    ///
    /// Integral floats collapse onto the integer key so that `256` read from
    /// one source and `256.0` read from another land in the same group.
    pub fn key(&self) -> ValueKey {
        match self {
            Self::Null => ValueKey::Null,
            Self::Bool(b) => ValueKey::Bool(*b),
            Self::Int(n) => ValueKey::Int(*n),
            Self::Float(f) => match float_to_int(*f) {
                Some(n) => ValueKey::Int(n),
                None => ValueKey::Float(f.to_bits()),
            },
            Self::String(s) => ValueKey::Text(s.clone()),
        }
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "~"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Hashable, totally ordered projection of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    /// Raw bits of a non-integral float.
    Float(u64),
    Text(String),
}

impl std::fmt::Display for ValueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "~"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int_passthrough() {
        assert_eq!(Value::Int(256).coerce_int(), Some(256));
    }

    #[test]
    fn test_coerce_int_integral_float() {
        assert_eq!(Value::Float(1024.0).coerce_int(), Some(1024));
    }

    #[test]
    fn test_coerce_int_fractional_float_is_unknown() {
        assert_eq!(Value::Float(3.5).coerce_int(), None);
    }

    #[test]
    fn test_coerce_int_numeric_string() {
        assert_eq!(Value::from(" 512 ").coerce_int(), Some(512));
        assert_eq!(Value::from("64.0").coerce_int(), Some(64));
    }

    #[test]
    fn test_coerce_int_garbage_is_unknown_not_sentinel() {
        assert_eq!(Value::from("abc").coerce_int(), None);
        assert_eq!(Value::Null.coerce_int(), None);
        assert_eq!(Value::Bool(true).coerce_int(), None);
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(Value::Int(2).coerce_float(), Some(2.0));
        assert_eq!(Value::Float(0.25).coerce_float(), Some(0.25));
        assert_eq!(Value::from("1e-3").coerce_float(), Some(0.001));
    }

    #[test]
    fn test_coerce_float_non_finite_is_unknown() {
        assert_eq!(Value::Float(f64::NAN).coerce_float(), None);
        assert_eq!(Value::Float(f64::INFINITY).coerce_float(), None);
        assert_eq!(Value::from("fast").coerce_float(), None);
    }

    #[test]
    fn test_key_collapses_integral_float() {
        assert_eq!(Value::Float(256.0).key(), Value::Int(256).key());
        assert_ne!(Value::Float(256.5).key(), Value::Int(256).key());
    }

    #[test]
    fn test_key_distinguishes_text_and_null() {
        assert_ne!(Value::from("naive").key(), Value::Null.key());
        assert_eq!(Value::from("naive").key(), ValueKey::Text("naive".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "~");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::from("mpi").to_string(), "mpi");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
        assert_eq!(Value::from(None::<f64>), Value::Null);
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Int(1),
            Value::Float(0.5),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,1,0.5,"x"]"#);
    }
}
