//! Integration tests for path replay (vecpaint-renderer).
//!
//! Drives `PathRenderer` over the recording backend and checks the exact
//! sequence of 2D context calls for replay, fills, outlines and shadows.

use vecpaint_core::{Color, Fill, FillMode, LineCap, LineJoin, Point, Style};
use vecpaint_renderer::backend::recording::{ContextCall, RecordingBackend};
use vecpaint_renderer::{CompositeOperation, PathRenderer, SurfaceElement};

fn surface() -> PathRenderer<RecordingBackend> {
    PathRenderer::new(&RecordingBackend::new(), Some("replay"), 100, 100).expect("surface")
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Calls recorded after the leading `beginPath` issued by `start`.
fn calls_after_start(surface: &mut PathRenderer<RecordingBackend>) -> Vec<ContextCall> {
    let mut calls = surface.context_mut().take_calls();
    assert_eq!(calls.first(), Some(&ContextCall::BeginPath));
    calls.remove(0);
    calls
}

// ==========================================================================
// Replay order
// ==========================================================================

#[test]
fn test_polyline_replays_in_recorded_order() {
    let mut s = surface();
    let points = [p(0.0, 0.0), p(5.0, 1.0), p(9.0, 4.0), p(2.0, 8.0)];

    let mut pass = s.start();
    pass.move_to(points[0]);
    for &pt in &points[1..] {
        pass.line_to(pt);
    }
    s.end(pass, &Style::new()).expect("end");

    let expected: Vec<ContextCall> = std::iter::once(ContextCall::MoveTo(0.0, 0.0))
        .chain(points[1..].iter().map(|pt| ContextCall::LineTo(pt.x, pt.y)))
        .collect();
    assert_eq!(calls_after_start(&mut s), expected);
}

#[test]
fn test_drawing_calls_only_buffer_until_end() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(1.0, 1.0));

    assert_eq!(s.context().calls(), &[ContextCall::BeginPath]);
    assert_eq!(pass.commands().len(), 2);
}

#[test]
fn test_bezier_replays_six_arguments() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0))
        .bezier_to(p(1.0, 2.0), p(3.0, 4.0), p(5.0, 6.0));
    s.end(pass, &Style::new()).expect("end");

    assert_eq!(
        calls_after_start(&mut s),
        vec![
            ContextCall::MoveTo(0.0, 0.0),
            ContextCall::BezierCurveTo([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        ]
    );
}

#[test]
fn test_each_start_discards_previous_commands() {
    let mut s = surface();
    let mut first = s.start();
    first.move_to(p(0.0, 0.0)).line_to(p(9.0, 9.0));
    s.end(first, &Style::new()).expect("first");
    s.context_mut().take_calls();

    let mut second = s.start();
    second.move_to(p(1.0, 1.0));
    assert_eq!(second.commands().len(), 1);
    assert!(second.bounds().is_empty());
}

// ==========================================================================
// Fill
// ==========================================================================

#[test]
fn test_square_with_flat_fill() {
    let color_a = Color::rgb(255, 0, 0);
    let mut s = surface();

    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0))
        .line_to(p(10.0, 0.0))
        .line_to(p(10.0, 10.0))
        .join();
    s.end(pass, &Style::new().with_fill(color_a)).expect("end");

    assert_eq!(
        calls_after_start(&mut s),
        vec![
            ContextCall::MoveTo(0.0, 0.0),
            ContextCall::LineTo(10.0, 0.0),
            ContextCall::LineTo(10.0, 10.0),
            ContextCall::ClosePath,
            ContextCall::SetFillStyle(color_a.to_string()),
            ContextCall::Fill,
        ]
    );
}

#[test]
fn test_vertical_gradient_spans_y_bounds() {
    let top = Color::rgb(255, 255, 255);
    let bottom = Color::rgb(0, 0, 0);
    let mut s = surface();

    let mut pass = s.start();
    pass.move_to(p(3.0, 10.0))
        .line_to(p(7.0, 40.0))
        .line_to(p(1.0, 25.0));
    assert_eq!(pass.bounds().y, vec![10.0, 40.0, 25.0]);

    s.end(pass, &Style::new().with_gradient(top, bottom, FillMode::Vertical))
        .expect("end");

    let calls = calls_after_start(&mut s);
    assert!(calls.contains(&ContextCall::CreateLinearGradient([0.0, 10.0, 0.0, 40.0])));
    assert!(calls.contains(&ContextCall::SetFillGradient(vec![
        (0.0, top.to_string()),
        (1.0, bottom.to_string()),
    ])));
    assert_eq!(calls.last(), Some(&ContextCall::Fill));
}

#[test]
fn test_horizontal_gradient_spans_x_bounds() {
    let mut s = surface();

    let mut pass = s.start();
    pass.move_to(p(10.0, 0.0))
        .bezier_to(p(-5.0, 3.0), p(30.0, 3.0), p(20.0, 0.0));

    let style = Style::new().with_gradient(Color::BLACK, Color::rgb(0, 0, 255), FillMode::Horizontal);
    s.end(pass, &style).expect("end");

    assert!(calls_after_start(&mut s)
        .contains(&ContextCall::CreateLinearGradient([-5.0, 0.0, 30.0, 0.0])));
}

#[test]
fn test_gradient_from_json_style() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(0.0, 50.0));

    let style = Style::from_json(r##"{"fill": ["#ff0000", "#0000ff"], "fillMode": "vertical"}"##)
        .expect("style");
    assert_eq!(
        style.fill,
        Some(Fill::gradient(Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)))
    );
    s.end(pass, &style).expect("end");

    assert!(calls_after_start(&mut s)
        .contains(&ContextCall::CreateLinearGradient([0.0, 0.0, 0.0, 50.0])));
}

// ==========================================================================
// Outline
// ==========================================================================

#[test]
fn test_outline_sets_stroke_state_then_strokes() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(5.0, 5.0));

    let style = Style::new().with_outline(Color::BLACK, 2.5, LineCap::Square, LineJoin::Round);
    s.end(pass, &style).expect("end");

    let calls = calls_after_start(&mut s);
    assert_eq!(
        &calls[2..],
        &[
            ContextCall::SetStrokeStyle(Color::BLACK.to_string()),
            ContextCall::SetLineWidth(2.5),
            ContextCall::SetLineCap(LineCap::Square),
            ContextCall::SetLineJoin(LineJoin::Round),
            ContextCall::Stroke,
        ]
    );
}

#[test]
fn test_fill_precedes_outline() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(5.0, 5.0));

    let style = Style::new()
        .with_fill(Color::rgb(1, 2, 3))
        .with_outline(Color::BLACK, 1.0, LineCap::Butt, LineJoin::Miter);
    s.end(pass, &style).expect("end");

    let calls = calls_after_start(&mut s);
    let fill = calls.iter().position(|c| *c == ContextCall::Fill).expect("fill");
    let stroke = calls.iter().position(|c| *c == ContextCall::Stroke).expect("stroke");
    assert!(fill < stroke);
}

// ==========================================================================
// Shadow
// ==========================================================================

#[test]
fn test_shadow_draws_behind_with_balanced_translate() {
    let shadow = Color::rgba(0, 0, 0, 0.5);
    let fill = Color::rgb(200, 0, 0);
    let mut s = surface();

    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0))
        .line_to(p(10.0, 0.0))
        .line_to(p(10.0, 10.0))
        .join();
    let style = Style::new()
        .with_fill(fill)
        .with_shadow(shadow, p(3.0, 4.0));
    s.end(pass, &style).expect("end");

    assert_eq!(
        calls_after_start(&mut s),
        vec![
            ContextCall::MoveTo(0.0, 0.0),
            ContextCall::LineTo(10.0, 0.0),
            ContextCall::LineTo(10.0, 10.0),
            ContextCall::ClosePath,
            ContextCall::SetFillStyle(fill.to_string()),
            ContextCall::Fill,
            ContextCall::SetCompositeOperation(CompositeOperation::DestinationOver),
            ContextCall::Translate(3.0, 4.0),
            ContextCall::BeginPath,
            ContextCall::MoveTo(0.0, 0.0),
            ContextCall::LineTo(10.0, 0.0),
            ContextCall::LineTo(10.0, 10.0),
            ContextCall::ClosePath,
            ContextCall::SetFillStyle(shadow.to_string()),
            ContextCall::Fill,
            ContextCall::Translate(-3.0, -4.0),
            ContextCall::SetCompositeOperation(CompositeOperation::SourceOver),
        ]
    );
}

#[test]
fn test_shadow_net_translation_is_identity() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(1.0, 1.0));
    s.end(pass, &Style::new().with_shadow(Color::BLACK, p(-2.25, 7.5)))
        .expect("end");

    let (dx, dy) = s
        .context()
        .calls()
        .iter()
        .filter_map(|c| match c {
            ContextCall::Translate(x, y) => Some((*x, *y)),
            _ => None,
        })
        .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
    assert!(dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON);
}

#[test]
fn test_shadow_reuses_outline_parameters() {
    let shadow = Color::rgba(0, 0, 0, 0.25);
    let mut s = surface();

    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(5.0, 0.0));
    let style = Style::from_json(
        r##"{"outline": "#00ff00", "outlineWidth": 3, "outlineCap": "round",
             "outlineJoin": "bevel", "shadow": "rgba(0, 0, 0, 0.25)",
             "shadowOffset": {"x": 1, "y": 1}}"##,
    )
    .expect("style");
    s.end(pass, &style).expect("end");

    let calls = calls_after_start(&mut s);
    let shadow_start = calls
        .iter()
        .position(|c| *c == ContextCall::SetCompositeOperation(CompositeOperation::DestinationOver))
        .expect("shadow pass");
    let shadow_calls = &calls[shadow_start..];

    assert!(shadow_calls.contains(&ContextCall::SetStrokeStyle(shadow.to_string())));
    assert!(shadow_calls.contains(&ContextCall::SetLineWidth(3.0)));
    assert!(shadow_calls.contains(&ContextCall::SetLineCap(LineCap::Round)));
    assert!(shadow_calls.contains(&ContextCall::SetLineJoin(LineJoin::Bevel)));
    assert!(shadow_calls.contains(&ContextCall::Stroke));
}

#[test]
fn test_shadow_without_outline_only_fills() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(5.0, 0.0));
    s.end(pass, &Style::new().with_shadow(Color::BLACK, p(1.0, 1.0)).with_shadow_blur(6.0))
        .expect("end");

    let calls = calls_after_start(&mut s);
    assert!(!calls.contains(&ContextCall::Stroke));
    assert_eq!(calls.iter().filter(|c| **c == ContextCall::Fill).count(), 1);
}

// ==========================================================================
// Surface lifecycle
// ==========================================================================

#[test]
fn test_resize_then_clear_uses_new_dimensions() {
    let mut s = surface();
    s.resize(200, 100).clear();

    assert_eq!(s.to_element().width(), 200);
    assert_eq!(s.to_element().height(), 100);
    assert_eq!(
        s.context().calls(),
        &[ContextCall::ClearRect([0.0, 0.0, 200.0, 100.0])]
    );
}

#[test]
fn test_clear_leaves_pending_pass_intact() {
    let mut s = surface();
    let mut pass = s.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(4.0, 4.0));
    s.clear();
    s.end(pass, &Style::new()).expect("end");

    let calls = calls_after_start(&mut s);
    assert_eq!(calls[0], ContextCall::ClearRect([0.0, 0.0, 100.0, 100.0]));
    assert_eq!(calls[1..], [ContextCall::MoveTo(0.0, 0.0), ContextCall::LineTo(4.0, 4.0)]);
}

#[test]
fn test_surfaces_are_isolated() {
    let backend = RecordingBackend::new();
    let mut a = PathRenderer::new(&backend, Some("a"), 10, 10).expect("a");
    let mut b = PathRenderer::new(&backend, Some("b"), 20, 20).expect("b");

    let mut pass = a.start();
    pass.move_to(p(0.0, 0.0)).line_to(p(1.0, 1.0));
    a.end(pass, &Style::new().with_fill(Color::BLACK)).expect("end");

    assert!(b.context_mut().take_calls().is_empty());
    assert_eq!(b.to_element().width(), 20);
}
