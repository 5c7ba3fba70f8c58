use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::Point2;

/// A typed parameter value extracted from an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single 2D point (center, start, position, ...).
    Point(Point2),
    /// An ordered list of points (polyline vertices, hatch boundary).
    Points(Vec<Point2>),
    /// Integer quantity (lineweight).
    Integer(i64),
    /// Floating-point measurement (radius, height, angle, ratio).
    Scalar(f64),
    /// Free text (names, colors, text content, pattern names).
    Text(String),
    /// Boolean flag (closed polyline).
    Flag(bool),
}

impl ParamValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Points(_) => "points",
            Self::Integer(_) => "integer",
            Self::Scalar(_) => "scalar",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }
}

impl From<Point2> for ParamValue {
    fn from(p: Point2) -> Self {
        Self::Point(p)
    }
}

impl From<Vec<Point2>> for ParamValue {
    fn from(points: Vec<Point2>) -> Self {
        Self::Points(points)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Scalar(n)
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Named parameters of a parsed command, keyed by parameter name.
///
/// Ordered by key so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn point(&self, key: &str) -> Option<Point2> {
        match self.0.get(key)? {
            ParamValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn points(&self, key: &str) -> Option<&[Point2]> {
        match self.0.get(key)? {
            ParamValue::Points(points) => Some(points),
            _ => None,
        }
    }

    /// Numeric value as `f64`; integers are widened.
    pub fn scalar(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            ParamValue::Scalar(n) => Some(*n),
            ParamValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            ParamValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
