//! CAD executor abstraction.
//!
//! `CadExecutor` is the seam between interpreted commands and a drawing
//! backend. Draw calls return the new entity's handle; layer calls return
//! whether the backend accepted the change, as CAD automation APIs do.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mc_protocol::Point2;

use crate::error::ExecResult;

/// Layer, color, and lineweight applied to a new entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStyle {
    pub layer: String,
    pub color: String,
    pub lineweight: i64,
}

impl Default for EntityStyle {
    fn default() -> Self {
        Self {
            layer: "0".into(),
            color: "white".into(),
            lineweight: 0,
        }
    }
}

/// Backend identifier of a drawn entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityHandle(pub String);

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for CAD backends.
#[async_trait]
pub trait CadExecutor: Send + Sync {
    async fn draw_line(&self, start: Point2, end: Point2, style: &EntityStyle)
    -> ExecResult<EntityHandle>;

    async fn draw_circle(
        &self,
        center: Point2,
        radius: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    /// Angles are in degrees, counter-clockwise from +x.
    async fn draw_arc(
        &self,
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    async fn draw_rectangle(
        &self,
        corner1: Point2,
        corner2: Point2,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    async fn draw_polyline(
        &self,
        points: &[Point2],
        closed: bool,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    /// `major_axis` is a vector relative to `center`.
    async fn draw_ellipse(
        &self,
        center: Point2,
        major_axis: Point2,
        minor_ratio: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    async fn draw_text(
        &self,
        position: Point2,
        text: &str,
        height: f64,
        rotation: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    async fn draw_hatch(
        &self,
        boundary: &[Point2],
        pattern: &str,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle>;

    async fn create_layer(&self, name: &str, color: &str, lineweight: i64) -> ExecResult<bool>;

    async fn delete_layer(&self, name: &str) -> ExecResult<bool>;

    async fn rename_layer(&self, old_name: &str, new_name: &str) -> ExecResult<bool>;

    async fn turn_layer_on(&self, name: &str) -> ExecResult<bool>;

    async fn turn_layer_off(&self, name: &str) -> ExecResult<bool>;

    async fn list_layers(&self) -> ExecResult<Vec<String>>;
}
