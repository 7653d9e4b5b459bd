use glam::{Mat4, Quat, Vec2, Vec3};
use shapeyard_common::{Color, EntityId, Model, Pose};
use shapeyard_engine::{
    DisplayMode, Engine, EngineError, FrameCtx, MaterialDesc, MeshPrimitive, Transparency,
};
use shapeyard_input::Handed;
use shapeyard_scene::{SceneRegistry, ShapeKind, ShapeSet};

use crate::overlay;

/// Side length of the cube and diameter of the ball and cylinder.
const SHAPE_SIZE: f32 = 0.1;
const CUBE_EDGE_RADIUS: f32 = 0.02;
const CYLINDER_HEIGHT: f32 = 0.2;

/// New entities appear half a meter in front of the origin.
const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -0.5);
/// Panel starts left of center, angled in toward the user.
const PANEL_POSITION: Vec3 = Vec3::new(-0.2, 0.0, -0.6);
const PANEL_FACING: Vec3 = Vec3::new(1.0, 0.0, 1.0);
/// Panel width in meters; height auto-sizes.
const PANEL_SIZE: Vec2 = Vec2::new(0.4, 0.0);

const FLOOR_POSITION: Vec3 = Vec3::new(0.0, -1.5, 0.0);
const FLOOR_SCALE: Vec3 = Vec3::new(30.0, 0.1, 30.0);

/// All state for the shape sandbox.
///
/// Owned by the process entry point and passed into every frame; nothing
/// here is global. The registry holds the created entities, the rest is
/// panel state and the fixed scenery models.
pub struct ShapesApp {
    registry: SceneRegistry,
    panel_pose: Pose,
    selected: ShapeKind,
    floor_model: Model,
    floor_transform: Mat4,
    gizmo_cube: Model,
}

impl ShapesApp {
    /// Build the shared models on `engine` and start with an empty registry.
    pub fn new(engine: &mut impl Engine) -> Result<Self, EngineError> {
        let ui = MaterialDesc::default_ui();
        let cube = engine.create_model(
            MeshPrimitive::RoundedCube {
                dimensions: Vec3::splat(SHAPE_SIZE),
                edge_radius: CUBE_EDGE_RADIUS,
            },
            ui.clone(),
        )?;
        let ball = engine.create_model(
            MeshPrimitive::Sphere {
                diameter: SHAPE_SIZE,
            },
            ui.clone(),
        )?;
        let cylinder = engine.create_model(
            MeshPrimitive::Cylinder {
                diameter: SHAPE_SIZE,
                height: CYLINDER_HEIGHT,
            },
            ui,
        )?;
        let floor_model = engine.create_model(
            MeshPrimitive::Cube {
                dimensions: Vec3::ONE,
            },
            MaterialDesc::from_file("floor.hlsl", Transparency::Blend),
        )?;
        let gizmo_cube = engine.create_model(
            MeshPrimitive::Cube {
                dimensions: Vec3::ONE,
            },
            MaterialDesc::standard(),
        )?;

        Ok(Self {
            registry: SceneRegistry::new(ShapeSet::new(cube, ball, cylinder)),
            panel_pose: Pose::look_dir(PANEL_POSITION, PANEL_FACING),
            selected: ShapeKind::default(),
            floor_model,
            floor_transform: Mat4::from_scale_rotation_translation(
                FLOOR_SCALE,
                Quat::IDENTITY,
                FLOOR_POSITION,
            ),
            gizmo_cube,
        })
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    /// The shape kind the panel currently has selected.
    pub fn selected_kind(&self) -> ShapeKind {
        self.selected
    }

    pub fn panel_pose(&self) -> Pose {
        self.panel_pose
    }

    /// Where new entities are placed.
    pub fn spawn_pose() -> Pose {
        Pose::new(SPAWN_POSITION, Quat::IDENTITY)
    }

    /// Create an entity of `kind` at the spawn pose.
    pub fn spawn(&mut self, kind: ShapeKind) -> EntityId {
        self.registry.create(kind, Self::spawn_pose())
    }

    /// One frame of the demo, in fixed order: floor, creation panel, entity
    /// pass, controller overlays.
    pub fn frame(&mut self, ctx: &mut FrameCtx) {
        self.draw_floor(ctx);
        self.draw_panel(ctx);
        self.draw_entities(ctx);
        for hand in Handed::BOTH {
            overlay::controller_overlay(ctx, hand, self.gizmo_cube);
        }
    }

    /// Scene backdrop, skipped on passthrough displays where the real world
    /// provides the floor.
    fn draw_floor(&mut self, ctx: &mut FrameCtx) {
        if ctx.display_mode() == DisplayMode::Opaque {
            ctx.draw_model(self.floor_model, self.floor_transform, Color::WHITE);
        }
    }

    fn draw_panel(&mut self, ctx: &mut FrameCtx) {
        ctx.ui_window_begin("Objects", &mut self.panel_pose, PANEL_SIZE);
        ctx.ui_label("Object To Create:");
        for (i, kind) in ShapeKind::ALL.into_iter().enumerate() {
            if i > 0 {
                ctx.ui_same_line();
            }
            if ctx.ui_radio(kind.label(), self.selected == kind) {
                self.selected = kind;
            }
        }
        if ctx.ui_button("New") {
            let id = self.spawn(self.selected);
            tracing::info!(%id, kind = ?self.selected, "created a new object");
        }
        ctx.ui_window_end();
    }

    /// Every entity gets a grab handle keyed by its id, then its model drawn
    /// at its (possibly just dragged) pose.
    fn draw_entities(&mut self, ctx: &mut FrameCtx) {
        for entity in self.registry.iter_mut() {
            ctx.handle(&entity.name(), &mut entity.pose, entity.model.bounds);
            ctx.draw_model(entity.model, entity.pose.to_matrix(), entity.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeyard_engine::{EngineConfig, HeadlessEngine};

    fn headless() -> (HeadlessEngine, ShapesApp) {
        let mut engine = HeadlessEngine::init(EngineConfig::default()).expect("init");
        let app = ShapesApp::new(&mut engine).expect("app");
        (engine, app)
    }

    #[test]
    fn app_starts_empty_with_cube_selected() {
        let (_engine, app) = headless();
        assert!(app.registry().is_empty());
        assert_eq!(app.selected_kind(), ShapeKind::Cube);
    }

    #[test]
    fn new_builds_five_models() {
        let (engine, _app) = headless();
        // three shapes, the floor, and the overlay cube
        assert_eq!(engine.models().len(), 5);
    }

    #[test]
    fn spawn_uses_the_fixed_pose() {
        let (_engine, mut app) = headless();
        let id = app.spawn(ShapeKind::Ball);
        let entity = app.registry().get(id).expect("spawned");
        assert_eq!(entity.pose, ShapesApp::spawn_pose());
        assert_eq!(entity.pose.position, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn panel_radio_changes_selection() {
        let (mut engine, mut app) = headless();
        engine.select_radio("Cylinder");
        engine.step(&mut |ctx| app.frame(ctx)).expect("step");
        assert_eq!(app.selected_kind(), ShapeKind::Cylinder);
    }

    #[test]
    fn new_button_appends_selected_kind() {
        let (mut engine, mut app) = headless();
        engine.select_radio("Ball");
        engine.step(&mut |ctx| app.frame(ctx)).expect("step");
        engine.press_button("New");
        engine.step(&mut |ctx| app.frame(ctx)).expect("step");

        assert_eq!(app.registry().len(), 1);
        let kinds: Vec<ShapeKind> = app.registry().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Ball]);
    }
}
