//! Whole-frame tests: drive `ShapesApp` through the headless backend and
//! assert on the recorded draw stream.

use glam::{Quat, Vec2, Vec3};
use shapeyard_common::Pose;
use shapeyard_demo::ShapesApp;
use shapeyard_engine::{
    DisplayMode, DrawRecord, Engine, EngineConfig, HeadlessEngine, ShaderRef, Transparency,
};
use shapeyard_scene::ShapeKind;

fn headless_app() -> (HeadlessEngine, ShapesApp) {
    let mut engine = HeadlessEngine::init(EngineConfig::default()).expect("init");
    let app = ShapesApp::new(&mut engine).expect("app");
    (engine, app)
}

fn step(engine: &mut HeadlessEngine, app: &mut ShapesApp) {
    engine.step(&mut |ctx| app.frame(ctx)).expect("step");
}

#[test]
fn empty_scene_draws_floor_then_panel() {
    let (mut engine, mut app) = headless_app();
    step(&mut engine, &mut app);

    let frame = engine.last_frame().expect("frame");
    // floor first, then the whole panel, nothing else (no entities, no
    // tracked controllers)
    assert!(matches!(frame[0], DrawRecord::Model { .. }));
    assert!(matches!(frame[1], DrawRecord::WindowBegin { ref title, .. } if title == "Objects"));
    assert!(matches!(frame.last(), Some(DrawRecord::WindowEnd)));
    assert_eq!(frame.len(), 10);
}

#[test]
fn panel_layout_matches_the_design() {
    let (mut engine, mut app) = headless_app();
    engine.set_display_mode(DisplayMode::Passthrough);
    step(&mut engine, &mut app);

    let frame = engine.last_frame().expect("frame");
    let labels: Vec<String> = frame
        .iter()
        .map(|r| match r {
            DrawRecord::WindowBegin { title, .. } => format!("window:{title}"),
            DrawRecord::Label { text } => format!("label:{text}"),
            DrawRecord::Radio { label, .. } => format!("radio:{label}"),
            DrawRecord::SameLine => "same-line".to_string(),
            DrawRecord::Button { label } => format!("button:{label}"),
            DrawRecord::WindowEnd => "end".to_string(),
            other => panic!("unexpected record {other:?}"),
        })
        .collect();
    assert_eq!(
        labels,
        vec![
            "window:Objects",
            "label:Object To Create:",
            "radio:Cube",
            "same-line",
            "radio:Ball",
            "same-line",
            "radio:Cylinder",
            "button:New",
            "end",
        ]
    );
}

#[test]
fn passthrough_display_skips_the_floor() {
    let (mut engine, mut app) = headless_app();
    engine.set_display_mode(DisplayMode::Passthrough);
    step(&mut engine, &mut app);

    let frame = engine.last_frame().expect("frame");
    assert!(matches!(frame[0], DrawRecord::WindowBegin { .. }));
    assert!(!frame.iter().any(|r| matches!(r, DrawRecord::Model { .. })));
}

#[test]
fn panel_window_starts_at_the_designed_pose() {
    let (mut engine, mut app) = headless_app();
    step(&mut engine, &mut app);

    let frame = engine.last_frame().expect("frame");
    let (pose, size) = frame
        .iter()
        .find_map(|r| match r {
            DrawRecord::WindowBegin { pose, size, .. } => Some((*pose, *size)),
            _ => None,
        })
        .expect("panel window");
    assert!(pose.position.abs_diff_eq(Vec3::new(-0.2, 0.0, -0.6), 1e-6));
    assert_eq!(size, Vec2::new(0.4, 0.0));
    // the panel faces in toward the user
    let facing = pose.forward();
    assert!(facing.abs_diff_eq(Vec3::new(1.0, 0.0, 1.0).normalize(), 1e-6));
}

#[test]
fn entities_draw_in_creation_order_with_handles() {
    let (mut engine, mut app) = headless_app();
    app.spawn(ShapeKind::Cube);
    app.spawn(ShapeKind::Ball);
    app.spawn(ShapeKind::Cylinder);
    step(&mut engine, &mut app);

    let frame = engine.last_frame().expect("frame");
    let shapes = *app.registry().shapes();
    let drawn: Vec<_> = frame
        .iter()
        .filter_map(|r| match r {
            DrawRecord::Model { model, .. } => Some(*model),
            _ => None,
        })
        .collect();
    // floor first, then the three shapes in creation order
    assert_eq!(drawn.len(), 4);
    assert_eq!(drawn[1..], [shapes.cube.handle, shapes.ball.handle, shapes.cylinder.handle]);

    // each entity's handle is keyed by its id and drawn before its model
    let handle_ids: Vec<String> = frame
        .iter()
        .filter_map(|r| match r {
            DrawRecord::Handle { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect();
    let expected: Vec<String> = app.registry().iter().map(|e| e.name()).collect();
    assert_eq!(handle_ids, expected);
}

#[test]
fn new_button_creates_and_draws_same_frame() {
    let (mut engine, mut app) = headless_app();
    engine.press_button("New");
    step(&mut engine, &mut app);

    assert_eq!(app.registry().len(), 1);
    let frame = engine.last_frame().expect("frame");
    let cube = app.registry().shapes().cube.handle;
    assert!(frame
        .iter()
        .any(|r| matches!(r, DrawRecord::Model { model, .. } if *model == cube)));
}

#[test]
fn dragging_moves_only_the_dragged_entity() {
    let (mut engine, mut app) = headless_app();
    let a = app.spawn(ShapeKind::Cube);
    let b = app.spawn(ShapeKind::Ball);

    let target = Pose::new(Vec3::new(0.4, 0.2, -0.8), Quat::IDENTITY);
    let a_name = app.registry().get(a).expect("a").name();
    engine.move_handle(a_name, target);
    step(&mut engine, &mut app);

    assert_eq!(app.registry().get(a).expect("a").pose, target);
    assert_eq!(app.registry().get(b).expect("b").pose, ShapesApp::spawn_pose());
}

#[test]
fn floor_material_blends_a_shader_file() {
    let (engine, _app) = headless_app();
    let floor = engine
        .models()
        .iter()
        .find(|m| matches!(m.material.shader, ShaderRef::File(_)))
        .expect("floor model");
    assert_eq!(floor.material.transparency, Transparency::Blend);
    match &floor.material.shader {
        ShaderRef::File(path) => {
            assert_eq!(path.file_stem().and_then(|s| s.to_str()), Some("floor"));
        }
        _ => unreachable!(),
    }
}
