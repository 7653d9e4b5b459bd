use glam::{Mat4, Quat, Vec3};
use shapeyard_common::{CM, Color, Model, quat_look_at};
use shapeyard_engine::FrameCtx;
use shapeyard_input::{Handed, TrackState};

/// Text scale for the status rows on the back plate.
const LABEL_SCALE: f32 = 0.25;

/// Draw the status gizmos for one controller: a body cube tinted by tracking
/// confidence, text readouts on a plate above it, the analog stick
/// deflection, trigger and grip blocks, and the aim pointer. Untracked
/// controllers draw nothing.
pub fn controller_overlay(ctx: &mut FrameCtx, hand: Handed, cube: Model) {
    let c = ctx.controller(hand);
    if !c.tracked {
        return;
    }

    ctx.push(c.pose.to_matrix());

    // body cube: green channel for positional, blue for rotational confidence
    let mut body_color = Color::BLACK;
    body_color.g = track_level(c.tracked_pos);
    body_color.b = track_level(c.tracked_rot);
    ctx.draw_model(cube, Mat4::from_scale(Vec3::new(3.0, 3.0, 8.0) * CM), body_color);

    // readout plate: raised slightly off the body and laid flat, facing up
    ctx.push(Mat4::from_rotation_translation(
        quat_look_at(Vec3::ZERO, Vec3::Y, Vec3::NEG_Z),
        Vec3::new(0.0, 1.6 * CM, 0.0),
    ));

    let row = |y: f32| {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(LABEL_SCALE),
            Quat::IDENTITY,
            Vec3::new(0.0, y, 0.0),
        )
    };

    let pos_text = match c.tracked_pos {
        TrackState::Known => "(pos)",
        TrackState::Inferred => "~pos~",
        TrackState::None => "pos",
    };
    let rot_text = match c.tracked_rot {
        TrackState::Known => "(rot)",
        TrackState::Inferred => "~rot~",
        TrackState::None => "rot",
    };
    ctx.draw_text(pos_text, row(-0.03));
    ctx.draw_text(rot_text, row(-0.02));
    ctx.draw_text(if c.menu { "(menu)" } else { "menu" }, row(-0.01));
    ctx.draw_text(if c.x1 { "(X1)" } else { "X1" }, row(0.0));
    ctx.draw_text(if c.x2 { "(X2)" } else { "X2" }, row(0.01));

    // analog stick: a short line off its resting point, O while clicked
    let stick_at = Vec3::new(0.0, 0.03, 0.0);
    let deflection = Vec3::new(c.stick.x, c.stick.y, 0.0) * 0.01;
    ctx.draw_line(stick_at, stick_at + deflection, Color::WHITE, 0.001);
    if c.stick_clicked {
        ctx.draw_text(
            "O",
            Mat4::from_scale_rotation_translation(
                Vec3::splat(LABEL_SCALE),
                Quat::IDENTITY,
                stick_at,
            ),
        );
    }

    // trigger block pivots around a point behind it as it is pulled
    let pivot = Mat4::from_rotation_translation(
        Quat::from_rotation_x((-45.0 + c.trigger * 40.0).to_radians()),
        Vec3::new(0.0, 0.02, 0.03),
    );
    let block = Mat4::from_scale_rotation_translation(
        Vec3::new(0.01, 0.04, 0.01),
        Quat::IDENTITY,
        Vec3::new(0.0, -0.015, -0.005),
    );
    ctx.draw_model(cube, pivot * block, Color::WHITE);

    // grip block thins as it is squeezed, mirrored onto the inner edge
    ctx.draw_model(
        cube,
        Mat4::from_scale_rotation_translation(
            Vec3::new(0.01 * (1.0 - c.grip), 0.04, 0.01),
            Quat::IDENTITY,
            Vec3::new(0.0149 * hand.sign(), 0.0, 0.015),
        ),
        Color::WHITE,
    );

    ctx.pop();
    ctx.pop();

    // aim pointer, in world space
    ctx.draw_model(
        cube,
        c.aim.to_matrix_scaled(Vec3::new(1.0, 1.0, 4.0) * CM),
        Color::hsv(0.0, 0.5, 0.8).to_linear(),
    );
}

fn track_level(state: TrackState) -> f32 {
    match state {
        TrackState::None => 0.0,
        TrackState::Inferred => 0.5,
        TrackState::Known => 1.0,
    }
}
