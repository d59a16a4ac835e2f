use std::f32::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy::color::{Hsva, Hue, Srgba};
use bevy::math::Vec3;
use bevy_lindenmayer::{LSystem, TriangleList, Turtle, TurtleConfig};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

fn system(axiom: &str, angle: f32, distance: f32) -> LSystem {
    LSystem::new()
        .with_axiom(axiom)
        .with_angle(angle)
        .with_distance(distance)
        .with_iterations(0)
}

/// Counts `WARN` events seen while installed.
#[derive(Clone, Default)]
struct WarningCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarningCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_warnings(run: impl FnOnce()) -> usize {
    let counter = WarningCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, run);
    counter.0.load(Ordering::SeqCst)
}

fn hue_of(rgb: Vec3) -> f32 {
    Hsva::from(Srgba::rgb(rgb.x, rgb.y, rgb.z)).hue
}

#[test]
fn test_forward_segment_spans_unit_length() {
    let sys = system("F", 45.0, 1.0);
    let triangles = Turtle::default().draw_system(&sys);

    // 11 sides * 2 triangles
    assert_eq!(triangles.len(), 22);

    let radius = 1.0 / PI;
    let (min, max) = triangles.bounds().unwrap();
    assert!(min.z.abs() < 1e-5, "Cone should start at the origin");
    assert!((max.z - 1.0).abs() < 1e-5, "Cone should end one unit forward");
    assert!(max.x <= radius + 1e-5 && min.x >= -radius - 1e-5);
    assert!(max.y <= radius + 1e-5 && min.y >= -radius - 1e-5);
}

#[test]
fn test_cone_normals_point_outward() {
    let sys = system("F", 0.0, 1.0);
    let triangles = Turtle::default().draw_system(&sys);

    for t in &triangles {
        let centroid = (t.positions[0] + t.positions[1] + t.positions[2]) / 3.0;
        let radial = Vec3::new(centroid.x, centroid.y, 0.0);
        assert!(
            t.normals[0].dot(radial) > 0.0,
            "Lateral normal {:?} should face away from the axis",
            t.normals[0]
        );
    }
}

#[test]
fn test_cone_sides_follow_config() {
    let sys = system("FF", 0.0, 1.0);
    let mut turtle = Turtle::new(TurtleConfig::default().with_cone_sides(7));
    assert_eq!(turtle.draw_system(&sys).len(), 28);

    turtle.set_config(TurtleConfig::default().with_cone_sides(1));
    assert_eq!(turtle.draw_system(&sys).len(), 12, "Sides clamp to 3");
}

#[test]
fn test_move_without_drawing() {
    let sys = system("fff", 0.0, 1.0);
    let mut turtle = Turtle::default();
    let triangles = turtle.draw_system(&sys);
    assert!(triangles.is_empty());
    assert!(turtle.cursor().position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
}

#[test]
fn test_turns_change_heading() {
    let sys = system("+f", 90.0, 1.0);
    let mut turtle = Turtle::default();
    turtle.draw_system(&sys);
    assert!(turtle.cursor().position().abs_diff_eq(Vec3::X, 1e-5));

    let sys = system("|f", 30.0, 1.0);
    turtle.draw_system(&sys);
    assert!(turtle.cursor().position().abs_diff_eq(Vec3::NEG_Z, 1e-5));

    let sys = system("&f", 90.0, 1.0);
    turtle.draw_system(&sys);
    assert!(turtle.cursor().position().abs_diff_eq(Vec3::Y, 1e-5));
}

#[test]
fn test_branch_restores_full_state() {
    let sys = system("", 30.0, 1.0);
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(10_000);
    turtle.begin(&sys);

    for symbol in "F+F^".chars() {
        turtle.interpret(symbol, &sys, &mut out).unwrap();
    }
    turtle.interpret('[', &sys, &mut out).unwrap();
    let saved = turtle.state();

    for symbol in "+F&F\\F[/F]F$F".chars() {
        turtle.interpret(symbol, &sys, &mut out).unwrap();
    }
    assert_ne!(turtle.state(), saved, "Branch body should move the turtle");

    turtle.interpret(']', &sys, &mut out).unwrap();
    assert_eq!(turtle.state(), saved, "Closing the branch restores everything");
    assert_eq!(turtle.branch_depth(), 0);
}

#[test]
fn test_unmatched_pop_is_reported_and_skipped() {
    let sys = system("F]]F", 0.0, 1.0);
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(1_000);
    let summary = turtle.draw_system_into(&sys, &mut out);

    assert_eq!(summary.unmatched_pops, 2);
    assert_eq!(summary.symbols_processed, 4);
    assert_eq!(summary.triangles, 44, "Drawing continues after the bad pop");
    assert!(!summary.truncated);
}

#[test]
fn test_capacity_stops_interpretation() {
    let sys = system("FFFF", 0.0, 1.0);
    let mut turtle = Turtle::new(TurtleConfig::default().with_max_triangles(10));
    let mut out = TriangleList::new(10);
    let summary = turtle.draw_system_into(&sys, &mut out);

    assert_eq!(out.len(), 10, "Exactly capacity triangles are kept");
    assert!(summary.truncated);
    assert_eq!(summary.symbols_processed, 0);
}

#[test]
fn test_full_buffer_halts_remaining_symbols() {
    let sys = system("FFf", 0.0, 1.0);
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(22);
    let summary = turtle.draw_system_into(&sys, &mut out);

    assert_eq!(out.len(), 22);
    assert!(summary.truncated);
    assert_eq!(summary.symbols_processed, 1);
}

#[test]
fn test_draw_into_reuses_buffer() {
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(1_000);

    turtle.draw_system_into(&system("FFF", 0.0, 1.0), &mut out);
    assert_eq!(out.len(), 66);

    turtle.draw_system_into(&system("F", 0.0, 0.5), &mut out);
    assert_eq!(out.len(), 22);
    let (_, max) = out.bounds().unwrap();
    assert!((max.z - 0.5).abs() < 1e-5, "Bounds come from the new pass only");
}

#[test]
fn test_width_tapers_and_hue_steps() {
    let sys = system("F", 0.0, 2.0);
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(100);
    turtle.begin(&sys);

    let start_width = turtle.width();
    let start_hue = hue_of(turtle.color());
    assert!((start_width - 2.0 / PI).abs() < 1e-6);
    assert!((start_hue - 26.3).abs() < 0.05);

    turtle.interpret('F', &sys, &mut out).unwrap();

    let expected = start_width - start_width / (PI * PI * PI);
    assert!((turtle.width() - expected).abs() < 1e-6);
    assert!((hue_of(turtle.color()) - 34.3).abs() < 0.05);
}

#[test]
fn test_width_never_drops_below_minimum() {
    let sys = system(&"F".repeat(200), 0.0, 0.1);
    let mut turtle = Turtle::default();
    turtle.draw_system(&sys);
    assert!((turtle.width() - 0.005).abs() < 1e-7);
}

#[test]
fn test_hue_wraps_around() {
    let config = TurtleConfig::default()
        .with_initial_hsv([350.0, 0.7, 0.5])
        .with_hue_step(20.0);
    let mut turtle = Turtle::new(config);
    turtle.draw_system(&system("F", 0.0, 1.0));

    let expected = Hsva::hsv(350.0, 0.7, 0.5).rotate_hue(20.0).hue;
    assert!((expected - 10.0).abs() < 1e-3);
    assert!((hue_of(turtle.color()) - 10.0).abs() < 0.05);
}

#[test]
fn test_polygon_is_double_sided() {
    let sys = system("{f+f+f}", 90.0, 1.0);
    let triangles = Turtle::default().draw_system(&sys);

    // 4 vertices -> 2 fan triangles, each with a back face.
    assert_eq!(triangles.len(), 4);

    let top = triangles.triangles()[0];
    let bottom = triangles.triangles()[1];
    assert!(top.normals[0].abs_diff_eq(Vec3::Y, 1e-5));
    assert!(bottom.normals[0].abs_diff_eq(Vec3::NEG_Y, 1e-5));
    assert!((bottom.positions[0].y + 0.001).abs() < 1e-6);
    assert_eq!(top.colors[0], Vec3::new(0.1, 0.3, 0.2));

    let (min, max) = triangles.bounds().unwrap();
    assert!((min.y + 0.001).abs() < 1e-6);
    assert!(max.y.abs() < 1e-5);
}

#[test]
fn test_closed_polygon_drops_duplicate_vertex() {
    let sys = system("{f+f+f+f}", 90.0, 1.0);
    let triangles = Turtle::default().draw_system(&sys);
    assert_eq!(triangles.len(), 4, "Square closes on its first vertex");
}

#[test]
fn test_polygon_edge_cases() {
    let mut turtle = Turtle::default();

    let lone_close = turtle.draw_system(&system("}F", 0.0, 1.0));
    assert_eq!(lone_close.len(), 22, "Closing without opening emits nothing");

    let too_small = turtle.draw_system(&system("{f}", 0.0, 1.0));
    assert!(too_small.is_empty(), "Two vertices cannot make a cap");

    let unclosed = turtle.draw_system(&system("{f+f+f", 90.0, 1.0));
    assert!(unclosed.is_empty());
}

#[test]
fn test_unclosed_polygon_is_warned() {
    let warnings = count_warnings(|| {
        Turtle::default().draw_system(&system("{f+f+f", 90.0, 1.0));
    });
    assert_eq!(warnings, 1, "Dropping an open polygon should warn once");

    let warnings = count_warnings(|| {
        Turtle::default().draw_system(&system("{f+f+f}", 90.0, 1.0));
    });
    assert_eq!(warnings, 0);
}

#[test]
fn test_unmatched_pops_are_warned() {
    let warnings = count_warnings(|| {
        Turtle::default().draw_system(&system("F]]F", 0.0, 1.0));
    });
    assert_eq!(warnings, 2);
}

#[test]
fn test_branch_restores_polygon_mode() {
    let sys = system("[{f+f]", 90.0, 1.0);
    let mut turtle = Turtle::default();
    turtle.draw_system(&sys);
    assert!(!turtle.is_defining_polygon());
}

#[test]
fn test_reserved_and_unknown_symbols_are_noops() {
    let sys = system("G.~!`%XYZ 7", 30.0, 1.0);
    let mut turtle = Turtle::default();
    let mut out = TriangleList::new(100);
    let summary = turtle.draw_system_into(&sys, &mut out);

    assert!(out.is_empty());
    assert_eq!(summary.symbols_processed, 11);
    assert_eq!(turtle.cursor().position(), Vec3::ZERO);
}

#[test]
fn test_empty_source_draws_nothing() {
    let sys = system("", 30.0, 1.0);
    let triangles = Turtle::default().draw_system(&sys);
    assert!(triangles.is_empty());
    assert_eq!(triangles.bounds(), None);
}

#[test]
fn test_draws_generated_string() {
    let mut sys = LSystem::new()
        .with_axiom("X")
        .with_rule('X', "F[+F]F")
        .unwrap()
        .with_angle(25.0)
        .with_distance(1.0)
        .with_iterations(1);

    let before = Turtle::default().draw_system(&sys);
    assert!(before.is_empty(), "Axiom alone has no drawing symbols");

    sys.rewrite();
    let after = Turtle::default().draw_system(&sys);
    assert_eq!(after.len(), 66);
}
