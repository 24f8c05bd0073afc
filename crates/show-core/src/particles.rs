//! Structure-of-arrays particle storage.
//!
//! All vectors have the same length, fixed at construction, and are indexed
//! by particle id. Vector buffers are `glam::Vec3`, which is a 12-byte `Pod`,
//! so each one can be handed to the GPU as a flat `f32` slice.

use glam::Vec3;

#[derive(Clone, Debug)]
pub struct ParticleStore {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) targets: Vec<Vec3>,
    pub(crate) base_colors: Vec<Vec3>,
    pub(crate) display_colors: Vec<Vec3>,
    pub(crate) speeds: Vec<f32>,
    pub(crate) trigger_delays_ms: Vec<u32>,
    pub(crate) switch_start_ms: Vec<f64>,
    pub(crate) flying: Vec<bool>,
    pub(crate) grounded: Vec<bool>,
}

impl ParticleStore {
    /// Lay `count` particles out on a square-ish grid on the ground plane,
    /// centred on the origin, each already at rest on its own target.
    pub fn on_ground_grid(count: usize, spacing: f32, color: Vec3) -> Self {
        let grid = (count as f64).sqrt();
        let positions: Vec<Vec3> = (0..count)
            .map(|i| {
                let i = i as f64;
                let row = (i / grid).floor();
                let col = i % grid;
                Vec3::new(
                    ((col - grid / 2.0) * spacing as f64) as f32,
                    0.0,
                    ((row - grid / 2.0) * spacing as f64) as f32,
                )
            })
            .collect();
        Self {
            targets: positions.clone(),
            positions,
            base_colors: vec![color; count],
            display_colors: vec![color; count],
            speeds: vec![0.0; count],
            trigger_delays_ms: vec![0; count],
            switch_start_ms: vec![0.0; count],
            flying: vec![false; count],
            grounded: vec![true; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn base_colors(&self) -> &[Vec3] {
        &self.base_colors
    }

    pub fn display_colors(&self) -> &[Vec3] {
        &self.display_colors
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    pub fn trigger_delays_ms(&self) -> &[u32] {
        &self.trigger_delays_ms
    }

    #[inline]
    pub fn is_flying(&self, index: usize) -> bool {
        self.flying[index]
    }

    #[inline]
    pub fn is_grounded(&self, index: usize) -> bool {
        self.grounded[index]
    }

    /// Time at which `index` is allowed to start moving.
    #[inline]
    pub fn release_time_ms(&self, index: usize) -> f64 {
        self.switch_start_ms[index] + self.trigger_delays_ms[index] as f64
    }

    /// Positions as `[x0, y0, z0, x1, ...]`, length `3 * len()`.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Display colors as `[r0, g0, b0, r1, ...]`, length `3 * len()`.
    pub fn display_colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.display_colors)
    }
}
