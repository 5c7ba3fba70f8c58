//! In-memory CAD backend.
//!
//! Simulates a drawing: a layer table with visibility flags and a list of
//! entities with sequential hexadecimal handles. Every call is recorded so
//! tests and the console can run without a CAD application.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use mc_protocol::{Point2, Shape};

use crate::error::{ExecError, ExecResult};
use crate::interface::{CadExecutor, EntityHandle, EntityStyle};

/// Name of the standard layer that always exists.
pub const STANDARD_LAYER: &str = "0";

/// First handle issued; low handles belong to the document's own objects.
const FIRST_HANDLE: u64 = 0x1A0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub name: String,
    pub color: String,
    pub lineweight: i64,
    pub visible: bool,
}

impl LayerInfo {
    fn new(name: &str, color: &str, lineweight: i64) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            lineweight,
            visible: true,
        }
    }
}

/// An entity in the simulated drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnEntity {
    pub handle: EntityHandle,
    pub shape: Shape,
    pub style: EntityStyle,
    /// Defining points, in call order.
    pub points: Vec<Point2>,
}

#[derive(Debug)]
struct Drawing {
    layers: Vec<LayerInfo>,
    entities: Vec<DrawnEntity>,
    next_handle: u64,
    calls: Vec<&'static str>,
}

impl Drawing {
    fn find_layer(&self, name: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|l| l.name.eq_ignore_ascii_case(name))
    }
}

/// Simulated CAD backend with call recording.
pub struct DryRunExecutor {
    drawing: Mutex<Drawing>,
}

impl DryRunExecutor {
    /// Empty drawing containing only the standard layer.
    pub fn new() -> Self {
        Self {
            drawing: Mutex::new(Drawing {
                layers: vec![LayerInfo::new(STANDARD_LAYER, "white", 0)],
                entities: Vec::new(),
                next_handle: FIRST_HANDLE,
                calls: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> ExecResult<MutexGuard<'_, Drawing>> {
        self.drawing
            .lock()
            .map_err(|_| ExecError::Backend("drawing state poisoned".into()))
    }

    /// Get copies of all drawn entities.
    pub fn entities(&self) -> Vec<DrawnEntity> {
        self.lock().map(|d| d.entities.clone()).unwrap_or_default()
    }

    /// Get copies of all layers, in creation order.
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.lock().map(|d| d.layers.clone()).unwrap_or_default()
    }

    /// Look up one layer by name (case-insensitive, like CAD layer tables).
    pub fn layer(&self, name: &str) -> Option<LayerInfo> {
        let drawing = self.lock().ok()?;
        drawing.find_layer(name).map(|i| drawing.layers[i].clone())
    }

    /// Names of the executor methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().map(|d| d.calls.clone()).unwrap_or_default()
    }

    fn add_entity(
        &self,
        call: &'static str,
        shape: Shape,
        points: Vec<Point2>,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        let mut drawing = self.lock()?;
        drawing.calls.push(call);

        let mut style = style.clone();
        match drawing.find_layer(&style.layer) {
            Some(index) => style.layer = drawing.layers[index].name.clone(),
            None => {
                tracing::warn!(layer = %style.layer, "layer does not exist, placing entity on layer 0");
                style.layer = STANDARD_LAYER.to_string();
            }
        }

        let handle = EntityHandle(format!("{:X}", drawing.next_handle));
        drawing.next_handle += 1;
        tracing::debug!(handle = %handle, shape = %shape, layer = %style.layer, "entity added");
        drawing.entities.push(DrawnEntity {
            handle: handle.clone(),
            shape,
            style,
            points,
        });
        Ok(handle)
    }
}

impl Default for DryRunExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CadExecutor for DryRunExecutor {
    async fn draw_line(&self, start: Point2, end: Point2, style: &EntityStyle) -> ExecResult<EntityHandle> {
        self.add_entity("draw_line", Shape::Line, vec![start, end], style)
    }

    async fn draw_circle(&self, center: Point2, radius: f64, style: &EntityStyle) -> ExecResult<EntityHandle> {
        if radius <= 0.0 {
            return Err(ExecError::Backend(format!("invalid circle radius {radius}")));
        }
        self.add_entity("draw_circle", Shape::Circle, vec![center], style)
    }

    async fn draw_arc(
        &self,
        center: Point2,
        radius: f64,
        _start_angle: f64,
        _end_angle: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        if radius <= 0.0 {
            return Err(ExecError::Backend(format!("invalid arc radius {radius}")));
        }
        self.add_entity("draw_arc", Shape::Arc, vec![center], style)
    }

    async fn draw_rectangle(
        &self,
        corner1: Point2,
        corner2: Point2,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        self.add_entity("draw_rectangle", Shape::Rectangle, vec![corner1, corner2], style)
    }

    async fn draw_polyline(
        &self,
        points: &[Point2],
        _closed: bool,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        if points.len() < 2 {
            return Err(ExecError::Backend("polyline needs at least 2 points".into()));
        }
        self.add_entity("draw_polyline", Shape::Polyline, points.to_vec(), style)
    }

    async fn draw_ellipse(
        &self,
        center: Point2,
        major_axis: Point2,
        _minor_ratio: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        if major_axis == Point2::ORIGIN {
            return Err(ExecError::Backend("ellipse major axis has zero length".into()));
        }
        self.add_entity("draw_ellipse", Shape::Ellipse, vec![center, major_axis], style)
    }

    async fn draw_text(
        &self,
        position: Point2,
        _text: &str,
        _height: f64,
        _rotation: f64,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        self.add_entity("draw_text", Shape::Text, vec![position], style)
    }

    async fn draw_hatch(
        &self,
        boundary: &[Point2],
        _pattern: &str,
        style: &EntityStyle,
    ) -> ExecResult<EntityHandle> {
        if boundary.len() < 3 {
            return Err(ExecError::Backend("hatch boundary needs at least 3 points".into()));
        }
        self.add_entity("draw_hatch", Shape::Hatch, boundary.to_vec(), style)
    }

    async fn create_layer(&self, name: &str, color: &str, lineweight: i64) -> ExecResult<bool> {
        let mut drawing = self.lock()?;
        drawing.calls.push("create_layer");
        if drawing.find_layer(name).is_some() {
            tracing::warn!(layer = name, "layer already exists");
            return Ok(false);
        }
        drawing.layers.push(LayerInfo::new(name, color, lineweight));
        tracing::info!(layer = name, "created layer");
        Ok(true)
    }

    async fn delete_layer(&self, name: &str) -> ExecResult<bool> {
        let mut drawing = self.lock()?;
        drawing.calls.push("delete_layer");
        if name == STANDARD_LAYER {
            tracing::warn!("cannot delete the standard layer");
            return Ok(false);
        }
        let Some(index) = drawing.find_layer(name) else {
            tracing::warn!(layer = name, "no such layer");
            return Ok(false);
        };
        let layer_name = drawing.layers[index].name.clone();
        if drawing.entities.iter().any(|e| e.style.layer == layer_name) {
            tracing::warn!(layer = name, "layer is in use");
            return Ok(false);
        }
        drawing.layers.remove(index);
        tracing::info!(layer = name, "deleted layer");
        Ok(true)
    }

    async fn rename_layer(&self, old_name: &str, new_name: &str) -> ExecResult<bool> {
        let mut drawing = self.lock()?;
        drawing.calls.push("rename_layer");
        if old_name == STANDARD_LAYER {
            tracing::warn!("cannot rename the standard layer");
            return Ok(false);
        }
        let Some(index) = drawing.find_layer(old_name) else {
            tracing::warn!(layer = old_name, "no such layer");
            return Ok(false);
        };
        if drawing.find_layer(new_name).is_some_and(|other| other != index) {
            tracing::warn!(layer = new_name, "target name already taken");
            return Ok(false);
        }
        let previous = std::mem::replace(&mut drawing.layers[index].name, new_name.to_string());
        for entity in drawing.entities.iter_mut().filter(|e| e.style.layer == previous) {
            entity.style.layer = new_name.to_string();
        }
        tracing::info!(from = old_name, to = new_name, "renamed layer");
        Ok(true)
    }

    async fn turn_layer_on(&self, name: &str) -> ExecResult<bool> {
        self.set_visibility("turn_layer_on", name, true)
    }

    async fn turn_layer_off(&self, name: &str) -> ExecResult<bool> {
        self.set_visibility("turn_layer_off", name, false)
    }

    async fn list_layers(&self) -> ExecResult<Vec<String>> {
        let mut drawing = self.lock()?;
        drawing.calls.push("list_layers");
        Ok(drawing.layers.iter().map(|l| l.name.clone()).collect())
    }
}

impl DryRunExecutor {
    fn set_visibility(&self, call: &'static str, name: &str, visible: bool) -> ExecResult<bool> {
        let mut drawing = self.lock()?;
        drawing.calls.push(call);
        let Some(index) = drawing.find_layer(name) else {
            tracing::warn!(layer = name, "no such layer");
            return Ok(false);
        };
        drawing.layers[index].visible = visible;
        tracing::info!(layer = name, visible, "layer visibility changed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_on(layer: &str) -> EntityStyle {
        EntityStyle {
            layer: layer.into(),
            ..EntityStyle::default()
        }
    }

    // ── Entities ────────────────────────────────────────────────

    #[tokio::test]
    async fn sequential_hex_handles() {
        let backend = DryRunExecutor::new();
        let style = EntityStyle::default();
        let a = backend.draw_line(Point2::ORIGIN, Point2::new(1.0, 1.0), &style).await.unwrap();
        let b = backend.draw_circle(Point2::ORIGIN, 2.0, &style).await.unwrap();
        assert_eq!(a.0, "1A0");
        assert_eq!(b.0, "1A1");
        assert_eq!(backend.entities()[1].shape, Shape::Circle);
    }

    #[tokio::test]
    async fn unknown_layer_falls_back_to_standard() {
        let backend = DryRunExecutor::new();
        backend
            .draw_circle(Point2::ORIGIN, 1.0, &style_on("Nowhere"))
            .await
            .unwrap();
        assert_eq!(backend.entities()[0].style.layer, "0");
    }

    #[tokio::test]
    async fn degenerate_geometry_is_rejected() {
        let backend = DryRunExecutor::new();
        let style = EntityStyle::default();
        assert!(backend.draw_circle(Point2::ORIGIN, 0.0, &style).await.is_err());
        assert!(backend.draw_polyline(&[Point2::ORIGIN], false, &style).await.is_err());
        assert!(backend.draw_hatch(&[Point2::ORIGIN, Point2::ORIGIN], "SOLID", &style).await.is_err());
        assert!(backend.draw_ellipse(Point2::ORIGIN, Point2::ORIGIN, 0.5, &style).await.is_err());
        assert!(backend.entities().is_empty());
    }

    // ── Layers ──────────────────────────────────────────────────

    #[tokio::test]
    async fn standard_layer_always_exists() {
        let backend = DryRunExecutor::new();
        assert_eq!(backend.list_layers().await.unwrap(), vec!["0"]);
        assert!(!backend.delete_layer("0").await.unwrap());
        assert!(!backend.rename_layer("0", "Base").await.unwrap());
        assert!(backend.layer("0").is_some());
    }

    #[tokio::test]
    async fn create_and_delete() {
        let backend = DryRunExecutor::new();
        assert!(backend.create_layer("Walls", "red", 30).await.unwrap());
        assert!(!backend.create_layer("walls", "blue", 0).await.unwrap());
        let walls = backend.layer("Walls").unwrap();
        assert_eq!(walls.color, "red");
        assert_eq!(walls.lineweight, 30);

        assert!(backend.delete_layer("Walls").await.unwrap());
        assert!(!backend.delete_layer("Walls").await.unwrap());
        assert_eq!(backend.layers().len(), 1);
    }

    #[tokio::test]
    async fn layer_in_use_cannot_be_deleted() {
        let backend = DryRunExecutor::new();
        backend.create_layer("Doors", "white", 0).await.unwrap();
        backend
            .draw_line(Point2::ORIGIN, Point2::new(1.0, 0.0), &style_on("Doors"))
            .await
            .unwrap();
        assert!(!backend.delete_layer("Doors").await.unwrap());
    }

    #[tokio::test]
    async fn rename_moves_entities() {
        let backend = DryRunExecutor::new();
        backend.create_layer("Old", "white", 0).await.unwrap();
        backend
            .draw_circle(Point2::ORIGIN, 1.0, &style_on("Old"))
            .await
            .unwrap();
        assert!(backend.rename_layer("Old", "New").await.unwrap());
        assert!(backend.layer("Old").is_none());
        assert_eq!(backend.entities()[0].style.layer, "New");
        assert!(!backend.rename_layer("Missing", "Other").await.unwrap());
    }

    #[tokio::test]
    async fn rename_to_taken_name_is_refused() {
        let backend = DryRunExecutor::new();
        backend.create_layer("A", "white", 0).await.unwrap();
        backend.create_layer("B", "white", 0).await.unwrap();
        assert!(!backend.rename_layer("A", "B").await.unwrap());
        // Case-only rename of the same layer is allowed.
        assert!(backend.rename_layer("A", "a").await.unwrap());
    }

    #[tokio::test]
    async fn visibility() {
        let backend = DryRunExecutor::new();
        backend.create_layer("Guides", "cyan", 0).await.unwrap();
        assert!(backend.turn_layer_off("guides").await.unwrap());
        assert!(!backend.layer("Guides").unwrap().visible);
        assert!(backend.turn_layer_on("Guides").await.unwrap());
        assert!(backend.layer("Guides").unwrap().visible);
        assert!(!backend.turn_layer_on("Missing").await.unwrap());
    }

    #[tokio::test]
    async fn records_calls() {
        let backend = DryRunExecutor::new();
        backend.create_layer("X", "white", 0).await.unwrap();
        backend.list_layers().await.unwrap();
        backend.turn_layer_off("X").await.unwrap();
        assert_eq!(backend.calls(), vec!["create_layer", "list_layers", "turn_layer_off"]);
    }
}
