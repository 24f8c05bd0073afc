use glam::{Mat4, Vec3};

/// Orbit camera around a fixed target, with damped rotation and zoom.
///
/// Pointer input accumulates into pending deltas; `update` applies a
/// `damping` fraction of them each frame so motion eases out after release.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub pitch_limit: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y_deg: f32, near: f32, far: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-3);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            target,
            yaw,
            pitch,
            distance,
            fov_y: fov_y_deg.to_radians(),
            near,
            far,
            damping: 1.0,
            min_distance: near.max(1e-3),
            max_distance: far,
            pitch_limit: std::f32::consts::FRAC_PI_2 - 0.01,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self
    }

    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit.abs();
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
        self
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Queue a rotation in radians. Positive pitch raises the eye.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.pending_yaw += d_yaw;
        self.pending_pitch += d_pitch;
    }

    /// Queue a zoom step in log-distance units; positive moves away.
    pub fn zoom(&mut self, d_log_distance: f32) {
        self.pending_zoom += d_log_distance;
    }

    /// True while queued rotation or zoom is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_yaw.abs() > 1e-5
            || self.pending_pitch.abs() > 1e-5
            || self.pending_zoom.abs() > 1e-5
    }

    /// Apply one frame of the queued motion.
    pub fn update(&mut self) {
        let k = self.damping;
        let dy = self.pending_yaw * k;
        let dp = self.pending_pitch * k;
        let dz = self.pending_zoom * k;
        self.pending_yaw -= dy;
        self.pending_pitch -= dp;
        self.pending_zoom -= dz;

        self.yaw += dy;
        self.pitch = (self.pitch + dp).clamp(-self.pitch_limit, self.pitch_limit);
        self.distance = (self.distance * dz.exp()).clamp(self.min_distance, self.max_distance);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn proj(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.proj(aspect) * self.view()
    }
}
