use glam::{Mat4, Vec3};

/// Movement requested for one frame, assembled from held keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraMoves {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fast: bool,
}

/// Fly camera for the desktop preview, in meters.
///
/// Starts just behind the origin looking down -Z, where the demo places its
/// panel and spawned shapes. Camera motion never feeds back into the scene.
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.25, 1.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -10.0_f32.to_radians(),
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 100.0,
            speed: 1.5,
            sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Integrate one frame of movement.
    pub fn apply_moves(&mut self, moves: CameraMoves, dt: f32) {
        let step = self.speed * dt * if moves.fast { 3.0 } else { 1.0 };
        let fwd = self.forward();
        let right = self.right();
        if moves.forward {
            self.position += fwd * step;
        }
        if moves.back {
            self.position -= fwd * step;
        }
        if moves.left {
            self.position -= right * step;
        }
        if moves.right {
            self.position += right * step;
        }
        if moves.up {
            self.position.y += step;
        }
        if moves.down {
            self.position.y -= step;
        }
    }

    /// Mouse-look, in raw device units.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
