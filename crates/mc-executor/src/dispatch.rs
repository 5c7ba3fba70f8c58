//! Command dispatcher: routes a `ParsedCommand` to exactly one executor call.

use serde::Serialize;

use mc_protocol::{Operation, Parameters, ParsedCommand, Point2};

use crate::error::{ExecError, ExecResult};
use crate::interface::{CadExecutor, EntityHandle, EntityStyle};

/// What an executor call produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// A new entity was drawn.
    Entity(EntityHandle),
    /// A layer change was accepted (`true`) or refused (`false`).
    Done(bool),
    /// Layer names, in backend order.
    Layers(Vec<String>),
}

impl ExecutionOutcome {
    /// Whether the backend carried the command out.
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::Done(false))
    }

    /// Human-readable rendering: the handle, `Success`/`Failed`, or a
    /// numbered list.
    pub fn summary(&self) -> String {
        match self {
            Self::Entity(handle) => handle.to_string(),
            Self::Done(true) => "Success".into(),
            Self::Done(false) => "Failed".into(),
            Self::Layers(names) => {
                let mut out = String::from("Results:");
                for (i, name) in names.iter().enumerate() {
                    out.push_str(&format!("\n  {}. {name}", i + 1));
                }
                out
            }
        }
    }
}

/// Dispatches parsed commands to a CAD backend.
pub struct CommandDispatcher<'a> {
    executor: &'a dyn CadExecutor,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(executor: &'a dyn CadExecutor) -> Self {
        Self { executor }
    }

    /// Execute one command.
    ///
    /// Fails only when a parameter the operation needs is absent or has the
    /// wrong type, or when the backend itself errors. A refused layer
    /// change is an `Ok(Done(false))`.
    pub async fn dispatch(&self, command: &ParsedCommand) -> ExecResult<ExecutionOutcome> {
        let params = command.parameters();
        let operation = command.operation();
        tracing::info!(
            operation = %operation,
            confidence = command.confidence(),
            "dispatching command"
        );

        let exec = self.executor;
        let outcome = match operation {
            Operation::DrawLine => ExecutionOutcome::Entity(
                exec.draw_line(point(params, "start")?, point(params, "end")?, &style(params))
                    .await?,
            ),
            Operation::DrawCircle => ExecutionOutcome::Entity(
                exec.draw_circle(
                    point(params, "center")?,
                    scalar(params, "radius")?,
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawArc => ExecutionOutcome::Entity(
                exec.draw_arc(
                    point(params, "center")?,
                    scalar(params, "radius")?,
                    scalar(params, "start_angle")?,
                    scalar(params, "end_angle")?,
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawRectangle => ExecutionOutcome::Entity(
                exec.draw_rectangle(
                    point(params, "corner1")?,
                    point(params, "corner2")?,
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawPolyline => ExecutionOutcome::Entity(
                exec.draw_polyline(
                    points(params, "points")?,
                    params.flag("closed").unwrap_or(false),
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawEllipse => ExecutionOutcome::Entity(
                exec.draw_ellipse(
                    point(params, "center")?,
                    point(params, "major_axis")?,
                    scalar(params, "minor_ratio")?,
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawText => ExecutionOutcome::Entity(
                exec.draw_text(
                    point(params, "position")?,
                    text(params, "text")?,
                    scalar(params, "height")?,
                    params.scalar("rotation").unwrap_or(0.0),
                    &style(params),
                )
                .await?,
            ),
            Operation::DrawHatch => ExecutionOutcome::Entity(
                exec.draw_hatch(
                    points(params, "boundary_points")?,
                    text(params, "pattern")?,
                    &style(params),
                )
                .await?,
            ),
            Operation::CreateLayer => {
                let style = style(params);
                ExecutionOutcome::Done(
                    exec.create_layer(text(params, "name")?, &style.color, style.lineweight)
                        .await?,
                )
            }
            Operation::DeleteLayer => {
                ExecutionOutcome::Done(exec.delete_layer(text(params, "name")?).await?)
            }
            Operation::RenameLayer => ExecutionOutcome::Done(
                exec.rename_layer(text(params, "old_name")?, text(params, "new_name")?)
                    .await?,
            ),
            Operation::TurnLayerOn => {
                ExecutionOutcome::Done(exec.turn_layer_on(text(params, "name")?).await?)
            }
            Operation::TurnLayerOff => {
                ExecutionOutcome::Done(exec.turn_layer_off(text(params, "name")?).await?)
            }
            Operation::ListLayers => ExecutionOutcome::Layers(exec.list_layers().await?),
        };

        if outcome.succeeded() {
            tracing::info!(operation = %operation, result = %outcome.summary(), "command executed");
        } else {
            tracing::warn!(operation = %operation, "backend refused command");
        }
        Ok(outcome)
    }
}

/// Style attributes, defaulting whatever the command does not carry.
fn style(params: &Parameters) -> EntityStyle {
    let defaults = EntityStyle::default();
    EntityStyle {
        layer: params.text("layer").map_or(defaults.layer, str::to_string),
        color: params.text("color").map_or(defaults.color, str::to_string),
        lineweight: params.integer("lineweight").unwrap_or(defaults.lineweight),
    }
}

fn point(params: &Parameters, key: &'static str) -> ExecResult<Point2> {
    params.point(key).ok_or(ExecError::InvalidParameter {
        key,
        expected: "point",
    })
}

fn points<'p>(params: &'p Parameters, key: &'static str) -> ExecResult<&'p [Point2]> {
    params.points(key).ok_or(ExecError::InvalidParameter {
        key,
        expected: "point list",
    })
}

fn scalar(params: &Parameters, key: &'static str) -> ExecResult<f64> {
    params.scalar(key).ok_or(ExecError::InvalidParameter {
        key,
        expected: "number",
    })
}

fn text<'p>(params: &'p Parameters, key: &'static str) -> ExecResult<&'p str> {
    params.text(key).ok_or(ExecError::InvalidParameter {
        key,
        expected: "string",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry_run::DryRunExecutor;

    fn command(operation: Operation, params: Parameters) -> ParsedCommand {
        ParsedCommand::new(operation, params, 0.9, "test")
    }

    fn styled(mut params: Parameters) -> Parameters {
        params.insert("color", "red");
        params.insert("layer", "0");
        params.insert("lineweight", 25_i64);
        params
    }

    // ── Outcome rendering ───────────────────────────────────────

    #[test]
    fn summary_rendering() {
        assert_eq!(ExecutionOutcome::Entity(EntityHandle("1A".into())).summary(), "1A");
        assert_eq!(ExecutionOutcome::Done(true).summary(), "Success");
        assert_eq!(ExecutionOutcome::Done(false).summary(), "Failed");
        assert_eq!(
            ExecutionOutcome::Layers(vec!["0".into(), "Walls".into()]).summary(),
            "Results:\n  1. 0\n  2. Walls"
        );
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(ExecutionOutcome::Done(true)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "done", "value": true}));
        let json = serde_json::to_value(ExecutionOutcome::Entity(EntityHandle("2B".into()))).unwrap();
        assert_eq!(json["value"], "2B");
    }

    #[test]
    fn refused_change_is_not_success() {
        assert!(!ExecutionOutcome::Done(false).succeeded());
        assert!(ExecutionOutcome::Layers(vec![]).succeeded());
    }

    // ── Dispatch ────────────────────────────────────────────────

    #[tokio::test]
    async fn draws_line_with_style() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);

        let mut params = Parameters::new();
        params.insert("start", Point2::new(0.0, 0.0));
        params.insert("end", Point2::new(10.0, 10.0));
        let outcome = dispatcher
            .dispatch(&command(Operation::DrawLine, styled(params)))
            .await
            .unwrap();

        assert!(matches!(outcome, ExecutionOutcome::Entity(_)));
        let entities = backend.entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].style.color, "red");
        assert_eq!(entities[0].style.lineweight, 25);
        assert_eq!(backend.calls(), vec!["draw_line"]);
    }

    #[tokio::test]
    async fn every_draw_operation_reaches_backend() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];

        let cases: Vec<(Operation, Parameters)> = vec![
            (Operation::DrawCircle, {
                let mut p = Parameters::new();
                p.insert("center", Point2::ORIGIN);
                p.insert("radius", 5.0);
                p
            }),
            (Operation::DrawArc, {
                let mut p = Parameters::new();
                p.insert("center", Point2::ORIGIN);
                p.insert("radius", 5.0);
                p.insert("start_angle", 0.0);
                p.insert("end_angle", 90.0);
                p
            }),
            (Operation::DrawRectangle, {
                let mut p = Parameters::new();
                p.insert("corner1", Point2::ORIGIN);
                p.insert("corner2", Point2::new(4.0, 3.0));
                p
            }),
            (Operation::DrawPolyline, {
                let mut p = Parameters::new();
                p.insert("points", square.clone());
                p.insert("closed", true);
                p
            }),
            (Operation::DrawEllipse, {
                let mut p = Parameters::new();
                p.insert("center", Point2::ORIGIN);
                p.insert("major_axis", Point2::new(10.0, 0.0));
                p.insert("minor_ratio", 0.5);
                p
            }),
            (Operation::DrawText, {
                let mut p = Parameters::new();
                p.insert("position", Point2::ORIGIN);
                p.insert("text", "Hi");
                p.insert("height", 2.5);
                p.insert("rotation", 0.0);
                p
            }),
            (Operation::DrawHatch, {
                let mut p = Parameters::new();
                p.insert("boundary_points", square.clone());
                p.insert("pattern", "SOLID");
                p
            }),
        ];

        for (operation, params) in cases {
            let outcome = dispatcher
                .dispatch(&command(operation, styled(params)))
                .await
                .unwrap();
            assert!(matches!(outcome, ExecutionOutcome::Entity(_)), "{operation}");
        }
        assert_eq!(backend.entities().len(), 7);
        assert_eq!(
            backend.calls(),
            vec![
                "draw_circle",
                "draw_arc",
                "draw_rectangle",
                "draw_polyline",
                "draw_ellipse",
                "draw_text",
                "draw_hatch",
            ]
        );
    }

    #[tokio::test]
    async fn layer_operations() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);

        let mut create = Parameters::new();
        create.insert("name", "Walls");
        create.insert("color", "red");
        create.insert("lineweight", 0_i64);
        let outcome = dispatcher
            .dispatch(&command(Operation::CreateLayer, create))
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Done(true));

        let mut off = Parameters::new();
        off.insert("name", "Walls");
        let outcome = dispatcher
            .dispatch(&command(Operation::TurnLayerOff, off))
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Done(true));
        assert_eq!(backend.layer("Walls").map(|l| l.visible), Some(false));

        let outcome = dispatcher
            .dispatch(&command(Operation::ListLayers, Parameters::new()))
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Layers(vec!["0".into(), "Walls".into()]));
    }

    #[tokio::test]
    async fn refused_layer_change() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);

        let mut params = Parameters::new();
        params.insert("name", "0");
        let outcome = dispatcher
            .dispatch(&command(Operation::DeleteLayer, params))
            .await
            .unwrap();
        assert_eq!(outcome, ExecutionOutcome::Done(false));
        assert_eq!(outcome.summary(), "Failed");
    }

    #[tokio::test]
    async fn wrong_parameter_type() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);

        let mut params = Parameters::new();
        params.insert("center", Point2::ORIGIN);
        params.insert("radius", "big");
        let err = dispatcher
            .dispatch(&command(Operation::DrawCircle, params))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExecError::InvalidParameter { key: "radius", expected: "number" }
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_style_uses_defaults() {
        let backend = DryRunExecutor::new();
        let dispatcher = CommandDispatcher::new(&backend);

        let mut params = Parameters::new();
        params.insert("center", Point2::ORIGIN);
        params.insert("radius", 1.0);
        dispatcher
            .dispatch(&command(Operation::DrawCircle, params))
            .await
            .unwrap();
        assert_eq!(backend.entities()[0].style, EntityStyle::default());
    }
}
