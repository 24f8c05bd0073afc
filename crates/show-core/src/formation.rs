//! Formation generator.
//!
//! Every formation is a closed-form mapping from a particle index (and the
//! fleet size) to a target position and base color. Nothing here reads the
//! particle's current position, so any formation can follow any other.
//!
//! A handful of formations (dragon, phoenix, lace) fold the wall clock into
//! their shape for a subtle breathing motion; for those the output is still a
//! pure function of `(index, count, now_ms)`.

use crate::constants::{FORMATION_SIZE, MIN_HEIGHT, WHITE};
use crate::cue::AudioCue;
use crate::error::ShowError;
use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Scale of the show in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub min_height: f32,
    pub formation_size: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            min_height: MIN_HEIGHT,
            formation_size: FORMATION_SIZE,
        }
    }
}

/// Target for a single particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationPoint {
    pub position: Vec3,
    pub color: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Formation {
    Takeoff,
    Landing,
    Flower,
    Heart,
    Dragon,
    Phoenix,
    Lace,
    Riverside,
    MonaLisa,
    Rocket,
    Year2025,
    Moon,
    Spaceship,
    Buildings,
    Nezha,
    Flame,
    Fireworks,
}

impl Formation {
    pub const ALL: [Formation; 17] = [
        Formation::Takeoff,
        Formation::Landing,
        Formation::Flower,
        Formation::Heart,
        Formation::Dragon,
        Formation::Phoenix,
        Formation::Lace,
        Formation::Riverside,
        Formation::MonaLisa,
        Formation::Rocket,
        Formation::Year2025,
        Formation::Moon,
        Formation::Spaceship,
        Formation::Buildings,
        Formation::Nezha,
        Formation::Flame,
        Formation::Fireworks,
    ];

    /// Stable identifier, also used as the DOM id of the matching button.
    pub fn as_str(self) -> &'static str {
        match self {
            Formation::Takeoff => "takeoff",
            Formation::Landing => "landing",
            Formation::Flower => "flower",
            Formation::Heart => "heart",
            Formation::Dragon => "dragon",
            Formation::Phoenix => "phoenix",
            Formation::Lace => "lace",
            Formation::Riverside => "riverside",
            Formation::MonaLisa => "monalisa",
            Formation::Rocket => "rocket",
            Formation::Year2025 => "year2025",
            Formation::Moon => "moon",
            Formation::Spaceship => "spaceship",
            Formation::Buildings => "buildings",
            Formation::Nezha => "nezha",
            Formation::Flame => "flame",
            Formation::Fireworks => "fireworks",
        }
    }

    /// Whether the formation rests on the ground plane.
    pub fn grounded(self) -> bool {
        matches!(self, Formation::Landing)
    }

    pub fn cue(self) -> AudioCue {
        match self {
            Formation::Takeoff => AudioCue::Takeoff,
            Formation::Landing => AudioCue::Landing,
            _ => AudioCue::Transform,
        }
    }

    /// Formations whose shape moves with the wall clock.
    pub fn is_time_varying(self) -> bool {
        matches!(self, Formation::Dragon | Formation::Phoenix | Formation::Lace)
    }

    /// Single color shared by every particle, or `None` for gradient formations.
    pub fn flat_color(self) -> Option<Vec3> {
        let rgb = match self {
            Formation::Takeoff | Formation::Landing => WHITE,
            Formation::Flower => [1.0, 0.3, 0.5],
            Formation::Heart => [1.0, 0.0, 0.0],
            Formation::Phoenix => [1.0, 0.2, 0.0],
            Formation::Lace => [0.6, 0.4, 1.0],
            Formation::Riverside => [0.8, 0.6, 0.4],
            Formation::MonaLisa => [0.7, 0.5, 0.3],
            Formation::Rocket => [1.0, 0.3, 0.0],
            Formation::Year2025 => [0.0, 1.0, 1.0],
            Formation::Moon => [1.0, 1.0, 0.5],
            Formation::Spaceship => [0.5, 0.8, 1.0],
            Formation::Buildings => [0.3, 0.6, 0.9],
            Formation::Nezha => [1.0, 0.4, 0.4],
            Formation::Fireworks => [1.0, 0.5, 0.0],
            Formation::Dragon | Formation::Flame => return None,
        };
        Some(Vec3::from_array(rgb))
    }

    /// Target for `index` at the default show scale.
    pub fn point(self, index: usize, count: usize, now_ms: f64) -> FormationPoint {
        generate(self, &Dimensions::default(), index, count, now_ms)
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formation {
    type Err = ShowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formation::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ShowError::UnknownFormation(s.to_string()))
    }
}

/// Per-call inputs shared by every shape function. Kept in f64 so that epoch
/// millisecond timestamps survive the trig.
struct Sample {
    i: f64,
    n: f64,
    /// index / count
    p: f64,
    /// p * 2π
    angle: f64,
    size: f64,
    floor: f64,
    /// wall clock in seconds
    t: f64,
}

impl Sample {
    /// Layer bucket for `layers` equal slices of the fleet.
    fn layer(&self, layers: f64) -> f64 {
        (self.p * layers).floor()
    }

    /// Angle of this particle within its slice when the fleet is split into
    /// `slices` equal runs.
    fn slice_angle(&self, slices: f64) -> f64 {
        let per = self.n / slices;
        ((self.i % per) / per) * TAU
    }
}

/// Compute the target position and base color of one particle.
pub fn generate(
    formation: Formation,
    dims: &Dimensions,
    index: usize,
    count: usize,
    now_ms: f64,
) -> FormationPoint {
    let n = count.max(1) as f64;
    let i = index as f64;
    let p = i / n;
    let s = Sample {
        i,
        n,
        p,
        angle: p * TAU,
        size: dims.formation_size as f64,
        floor: dims.min_height as f64,
        t: now_ms * 0.001,
    };
    let [x, y, z] = match formation {
        Formation::Takeoff => takeoff(&s),
        Formation::Landing => landing(&s),
        Formation::Flower => flower(&s),
        Formation::Heart => heart(&s, index),
        Formation::Dragon => dragon(&s),
        Formation::Phoenix => phoenix(&s),
        Formation::Lace => lace(&s),
        Formation::Riverside => riverside(&s),
        Formation::MonaLisa => monalisa(&s),
        Formation::Rocket => rocket(&s),
        Formation::Year2025 => year2025(&s),
        Formation::Moon => moon(&s),
        Formation::Spaceship => spaceship(&s),
        Formation::Buildings => buildings(&s),
        Formation::Nezha => nezha(&s),
        Formation::Flame => flame(&s),
        Formation::Fireworks => fireworks(&s),
    };
    let color = formation
        .flat_color()
        .unwrap_or_else(|| gradient_color(formation, &s));
    FormationPoint {
        position: Vec3::new(x as f32, y as f32, z as f32),
        color,
    }
}

fn gradient_color(formation: Formation, s: &Sample) -> Vec3 {
    match formation {
        // purple head fading to red tail
        Formation::Dragon => {
            let sp = s.layer(DRAGON_SEGMENTS) / DRAGON_SEGMENTS;
            Vec3::new(1.0, (0.2 * (1.0 - sp)) as f32, (0.8 * (1.0 - sp)) as f32)
        }
        // red tip, yellow-orange base
        Formation::Flame => {
            let lp = s.layer(FLAME_LAYERS) / FLAME_LAYERS;
            Vec3::new(1.0, (0.1 + 0.6 * lp) as f32, (0.1 * lp) as f32)
        }
        _ => Vec3::from_array(WHITE),
    }
}

const DRAGON_SEGMENTS: f64 = 15.0;
const FLAME_LAYERS: f64 = 10.0;
const GRID_COLUMNS: f64 = 100.0;

fn takeoff(s: &Sample) -> [f64; 3] {
    let radius = s.p * s.size * 0.5;
    [
        s.angle.cos() * radius,
        s.floor + (s.i / 100.0).sin() * 50.0,
        s.angle.sin() * radius,
    ]
}

fn landing(s: &Sample) -> [f64; 3] {
    let radius = s.p * s.size * 0.3;
    [s.angle.cos() * radius, 0.0, s.angle.sin() * radius]
}

fn flower(s: &Sample) -> [f64; 3] {
    const PETALS: f64 = 8.0;
    const LAYERS: f64 = 5.0;
    let layer = s.layer(LAYERS);
    let lo = layer / LAYERS;
    let petal = s.angle * PETALS;
    let radius = s.size * (0.2 + 0.8 * petal.sin().abs().sqrt());
    let shrink = 1.0 - lo * 0.3;
    [
        s.angle.cos() * radius * shrink,
        s.floor + layer * 100.0 + petal.sin() * 300.0 * (1.0 - lo),
        s.angle.sin() * radius * shrink,
    ]
}

/// Uniform value in `[0, 1)` that depends on the index alone.
fn index_jitter(index: usize) -> f64 {
    StdRng::seed_from_u64(index as u64).gen::<f64>()
}

fn heart(s: &Sample, index: usize) -> [f64; 3] {
    const LAYERS: f64 = 8.0;
    const SHELL_THICKNESS: f64 = 0.3;
    let layer = s.layer(LAYERS);
    let lp = layer / LAYERS;
    let t = s.slice_angle(LAYERS);

    let shell = 1.0 - index_jitter(index) * SHELL_THICKNESS;
    let x = 16.0 * t.sin().powi(3) * shell;
    let z = (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
        * shell;
    let y = s.floor + layer * 60.0 + (t * 3.0).sin() * 30.0;

    let scale = s.size / 16.0 * (1.0 - lp * 0.3);
    let rot = lp * PI * 0.3;
    [
        x * rot.cos() * scale,
        y,
        (z * rot.cos() + x * rot.sin()) * scale,
    ]
}

fn dragon(s: &Sample) -> [f64; 3] {
    let sp = s.layer(DRAGON_SEGMENTS) / DRAGON_SEGMENTS;
    let local = s.slice_angle(DRAGON_SEGMENTS);

    let spine_x = (sp * PI * 2.5).sin() * s.size * 1.2;
    let spine_y = s.floor + (sp * PI * 5.0).sin() * 300.0 + (s.t + sp * TAU).sin() * 50.0;
    let spine_z = sp * s.size * 2.5 - s.size;

    // thickest mid-body, tapering toward the tail
    let body = (sp * PI).sin() * 0.5 + 0.5;
    let radius = s.size * 0.3 * (body + 0.2) * (1.0 - sp * 0.3);

    let st = local + sp * PI * 4.0;
    let sx = st.cos() * radius * (1.0 + (st * 2.0).sin() * 0.2);
    let sy = st.sin() * radius * (1.0 + (st * 2.0).cos() * 0.2);

    let twist = sp * PI * 6.0 + s.t * (1.0 + (sp * PI).sin() * 0.5);
    let (tsin, tcos) = twist.sin_cos();
    [
        spine_x + sx * tcos - sy * tsin,
        spine_y + sx * tsin + sy * tcos,
        spine_z,
    ]
}

fn phoenix(s: &Sample) -> [f64; 3] {
    const WING_LAYERS: f64 = 6.0;
    let layer = s.layer(WING_LAYERS);
    let lp = layer / WING_LAYERS;
    let (sin_a, cos_a) = s.angle.sin_cos();

    let wing_span = s.size * (1.5 - lp * 0.5);
    let wing_curve = (s.angle * 2.0).sin().abs().sqrt();
    let body_radius = s.size * 0.3 * (1.0 - lp * 0.5);
    let blend = (s.angle * 2.0).sin().powi(2);

    let body = [cos_a * body_radius, sin_a * body_radius];
    let wing = [cos_a * wing_span * wing_curve, sin_a * wing_span * wing_curve];
    [
        body[0] * (1.0 - blend) + wing[0] * blend,
        s.floor + layer * 80.0 + (s.angle * 4.0 + s.t).sin() * 50.0,
        body[1] * (1.0 - blend) + wing[1] * blend,
    ]
}

fn lace(s: &Sample) -> [f64; 3] {
    const LAYERS: f64 = 10.0;
    const SPIRALS: f64 = 8.0;
    const WAVES: f64 = 6.0;
    let layer = s.layer(LAYERS);
    let lp = layer / LAYERS;

    let spiral = s.angle * SPIRALS + lp * PI;
    let spiral_radius = s.size * (0.3 + 0.7 * (1.0 - lp));
    let wave = (s.angle * WAVES + s.t).sin() * s.size * 0.15;
    let vertical = (spiral * 3.0).sin() * s.size * 0.1;
    let horizontal = (spiral * 2.0).cos() * s.size * 0.1;
    let radial = (s.angle * 8.0 + lp * TAU).sin() * s.size * 0.05;

    let (sin_s, cos_s) = spiral.sin_cos();
    [
        cos_s * (spiral_radius + wave) + horizontal + radial * cos_s,
        s.floor + layer * 40.0 + vertical,
        sin_s * (spiral_radius + wave) + horizontal + radial * sin_s,
    ]
}

/// Column and row fractions when the fleet is laid out 100 wide.
fn grid_uv(s: &Sample) -> (f64, f64) {
    let u = (s.i % GRID_COLUMNS) / GRID_COLUMNS;
    let v = (s.i / GRID_COLUMNS).floor() / (s.n / GRID_COLUMNS);
    (u, v)
}

fn riverside(s: &Sample) -> [f64; 3] {
    let (u, v) = grid_uv(s);
    let terrain = (u * PI * 4.0).sin() * 50.0 + (u * PI * 8.0).cos() * 30.0;
    let skyline = (u * PI * 6.0).sin() * 100.0 * v * v;
    [
        (u - 0.5) * s.size * 2.0,
        s.floor + terrain + skyline * v,
        (v - 0.5) * s.size,
    ]
}

fn monalisa(s: &Sample) -> [f64; 3] {
    let radius = s.size * 0.3 * (s.p * PI).sin().abs();
    [
        s.angle.cos() * radius,
        s.floor + (s.p - 0.5) * s.size * 1.5,
        s.angle.sin() * radius * 0.6,
    ]
}

fn rocket(s: &Sample) -> [f64; 3] {
    let body = s.size * 0.2 * (1.0 - s.p * s.p);
    let exhaust = (s.p * PI * 8.0).sin() * (1.0 - s.p) * s.size * 0.3;
    let r = body + exhaust;
    [
        s.angle.cos() * r,
        s.floor + s.p * s.size * 2.0,
        s.angle.sin() * r,
    ]
}

fn year2025(s: &Sample) -> [f64; 3] {
    const DIGITS: f64 = 4.0;
    let width = s.size * 2.0;
    let digit = s.layer(DIGITS);
    let local = s.slice_angle(DIGITS);
    [
        (digit - 1.5) * (width / DIGITS),
        s.floor + local.sin() * (s.size / 2.0),
        local.cos() * (width / 8.0),
    ]
}

fn moon(s: &Sample) -> [f64; 3] {
    let outer = s.size * 0.8;
    let inner = s.size * 0.6;
    let crescent = (s.angle * 2.0).sin() * s.size * 0.2;
    [
        s.angle.cos() * (outer - crescent),
        s.floor + s.angle.sin() * inner,
        s.angle.sin() * (outer - crescent),
    ]
}

fn spaceship(s: &Sample) -> [f64; 3] {
    let body = s.size * 0.5 * (1.0 - (s.p - 0.5).powi(2));
    let wings = (s.angle * 3.0).sin() * s.size * 0.3;
    [
        s.angle.cos() * (body + wings),
        s.floor + (s.p * TAU).sin() * s.size * 0.3,
        s.angle.sin() * (body + wings),
    ]
}

fn buildings(s: &Sample) -> [f64; 3] {
    let (u, v) = grid_uv(s);
    let max_height = s.size * 1.5;
    let height = ((u * PI * 8.0).sin() * (v * PI * 4.0).cos()).powi(2) * max_height;
    [
        (u - 0.5) * s.size * 2.0,
        s.floor + height,
        (v - 0.5) * s.size,
    ]
}

fn nezha(s: &Sample) -> [f64; 3] {
    let body = s.size * 0.3 * (s.p * PI).sin();
    let ribbon = (s.angle * 6.0).sin() * s.size * 0.2;
    [
        s.angle.cos() * (body + ribbon),
        s.floor + s.p * s.size * 1.5,
        s.angle.sin() * (body + ribbon),
    ]
}

fn flame(s: &Sample) -> [f64; 3] {
    let height = (1.0 - s.p).powi(2) * s.size * 2.0;
    let width = (s.p * PI).sin() * s.size * 0.5;
    [
        s.angle.cos() * width,
        s.floor + height,
        s.angle.sin() * width,
    ]
}

fn fireworks(s: &Sample) -> [f64; 3] {
    const SHELLS: f64 = 5.0;
    let per = s.n / SHELLS;
    let shell = (s.i / per).floor();
    let progress = (s.i % per) / per;
    let a = progress * TAU;
    let burst = s.size * 0.3;
    [
        (shell - 2.0) * s.size * 0.5 + a.cos() * burst,
        s.floor + (progress * PI).sin() * s.size,
        a.sin() * burst,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for f in Formation::ALL {
            assert_eq!(f.as_str().parse::<Formation>(), Ok(f));
            assert_eq!(f.to_string(), f.as_str());
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(
            "submarine".parse::<Formation>(),
            Err(ShowError::UnknownFormation("submarine".into()))
        );
        // ids are case sensitive
        assert!("Heart".parse::<Formation>().is_err());
    }

    #[test]
    fn landing_rests_on_the_ground() {
        for i in 0..64 {
            let pt = Formation::Landing.point(i, 64, 0.0);
            assert_eq!(pt.position.y, 0.0);
        }
        assert!(Formation::Landing.grounded());
        assert!(!Formation::Takeoff.grounded());
    }

    #[test]
    fn cues_follow_formation_kind() {
        assert_eq!(Formation::Takeoff.cue(), AudioCue::Takeoff);
        assert_eq!(Formation::Landing.cue(), AudioCue::Landing);
        assert_eq!(Formation::Moon.cue(), AudioCue::Transform);
    }

    #[test]
    fn index_jitter_stays_in_unit_interval() {
        for i in 0..10_000 {
            let h = index_jitter(i);
            assert!((0.0..1.0).contains(&h));
        }
        assert_eq!(index_jitter(17), index_jitter(17));
        assert_ne!(index_jitter(17), index_jitter(18));
    }

    #[test]
    fn zero_count_does_not_divide_by_zero() {
        for f in Formation::ALL {
            let pt = generate(f, &Dimensions::default(), 0, 0, 0.0);
            assert!(pt.position.is_finite(), "{f} produced {:?}", pt.position);
        }
    }
}
