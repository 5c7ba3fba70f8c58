use serde::{Deserialize, Serialize};

/// A 2D point in drawing units.
///
/// Serialized as a `[x, y]` pair. Z is the execution backend's concern and
/// never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f64, f64) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Point2::new(10.0, -2.5)).unwrap();
        assert_eq!(json, "[10.0,-2.5]");
    }

    #[test]
    fn deserializes_from_pair() {
        let p: Point2 = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(p, Point2::new(3.0, 4.0));
    }

    #[test]
    fn display_format() {
        assert_eq!(Point2::new(1.0, 2.5).to_string(), "(1, 2.5)");
    }
}
