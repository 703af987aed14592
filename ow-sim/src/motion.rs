//! This module handles per-frame particle motion and projection to screen space.
//!
//! Everything here is a pure function of the field, the simulation time, and the frame's
//! rotation sample. The projected points only live for one frame; the compositor consumes them
//! and they're rebuilt from scratch next tick.

use glam::{Vec2, Vec3};
use ow_field::ParticleField;

/// The speed of the automatic yaw rotation, in radians per simulated second.
const AUTO_YAW_SPEED: f32 = 0.7;

/// The speed of the slow pitch wobble.
const PITCH_WOBBLE_SPEED: f32 = 0.3;

/// The amplitude of the pitch wobble, in radians.
const PITCH_WOBBLE_AMPLITUDE: f32 = 0.4;

/// The constant base tilt added to the pitch.
const BASE_TILT: f32 = 0.3;

/// The speed of the small time-varying roll tilt.
const ROLL_SPEED: f32 = 0.2;

/// The amplitude of the roll tilt, in radians.
const ROLL_AMPLITUDE: f32 = 0.15;

/// The amplitude of the per-particle latitude breathing ripple, in radians.
const MORPH_AMPLITUDE: f32 = 0.18;

/// The speed of the per-particle radius oscillation.
const RADIUS_OSCILLATION_SPEED: f32 = 1.5;

/// The amplitude of the radius oscillation, in logical units.
const RADIUS_OSCILLATION_AMPLITUDE: f32 = 14.;

/// The alpha of a particle at the farthest depth.
const ALPHA_FLOOR: f32 = 0.15;

/// How much alpha a particle gains from back to front.
const ALPHA_RANGE: f32 = 0.6;

/// The disc radius of a particle at the farthest depth.
const SIZE_FLOOR: f32 = 1.0;

/// How much disc radius a particle gains from back to front.
const SIZE_RANGE: f32 = 2.5;

/// The global rotation applied to every particle this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSample {
    /// The yaw, baked into each particle's longitude advance rather than applied as a matrix.
    pub yaw: f32,

    /// The pitch, applied as a rotation about the X axis.
    pub pitch: f32,

    /// The roll, applied as a rotation about the Z axis after the pitch.
    pub roll: f32,
}

impl RotationSample {
    /// Compose the frame's rotation from simulation time and the pointer-driven offset.
    ///
    /// The offset is additive on top of the deterministic auto-rotation, so interaction
    /// perturbs the idle animation rather than replacing it.
    pub fn at(t: f32, offset: Vec2) -> Self {
        Self {
            yaw: t * AUTO_YAW_SPEED + offset.y,
            pitch: (t * PITCH_WOBBLE_SPEED).sin() * PITCH_WOBBLE_AMPLITUDE + BASE_TILT + offset.x,
            roll: (t * ROLL_SPEED).sin() * ROLL_AMPLITUDE,
        }
    }
}

/// One particle projected to screen space, valid for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// The position in canvas coordinates.
    pub pos: Vec2,

    /// The camera-relative z after rotation, used for painter's-algorithm ordering.
    pub z: f32,

    /// The rendering alpha derived from depth.
    pub alpha: f32,

    /// The disc radius derived from depth.
    pub size: f32,

    /// The band the source particle belongs to.
    pub band: usize,

    /// The source particle's position within its band.
    pub index_in_band: usize,
}

/// Map a normalised depth to rendering alpha. Monotonic; nearer points are more opaque.
pub fn depth_to_alpha(depth: f32) -> f32 {
    ALPHA_FLOOR + depth * ALPHA_RANGE
}

/// Map a normalised depth to a disc radius. Monotonic; nearer points are larger.
pub fn depth_to_size(depth: f32) -> f32 {
    SIZE_FLOOR + depth * SIZE_RANGE
}

/// Project every particle in the field to screen space for the frame at time `t`.
///
/// Per particle: perturb the latitude with its breathing ripple, advance the longitude by the
/// yaw scaled by its own speed (a subtle shear rather than rigid rotation), oscillate the
/// radius, convert to Cartesian, rotate about X by the pitch and then about Z by the roll, and
/// project orthographically with depth mapped to `[0, 1]` via `(z + radius) / (2·radius)`.
/// There is no true perspective division; depth only cues alpha and size.
pub fn project_field(
    field: &ParticleField,
    t: f32,
    rotation: RotationSample,
    radius: f32,
    centre: Vec2,
) -> Vec<ProjectedPoint> {
    field
        .particles()
        .iter()
        .map(|particle| {
            let morph = (t * particle.oscillation_speed + particle.oscillation_phase).sin()
                * MORPH_AMPLITUDE;
            let latitude = particle.base_latitude + particle.latitude_jitter + morph;
            let longitude = particle.base_longitude
                + particle.longitude_jitter
                + rotation.yaw * particle.oscillation_speed;

            let r = radius
                + particle.radius_jitter
                + (t * RADIUS_OSCILLATION_SPEED + particle.oscillation_phase).sin()
                    * RADIUS_OSCILLATION_AMPLITUDE;

            let mut point = Vec3::new(
                r * latitude.sin() * longitude.cos(),
                r * latitude.cos(),
                r * latitude.sin() * longitude.sin(),
            );

            // Rotate about X by the pitch, then about Z by the roll, in that fixed order
            let (sin_pitch, cos_pitch) = rotation.pitch.sin_cos();
            point = Vec3::new(
                point.x,
                point.y * cos_pitch - point.z * sin_pitch,
                point.y * sin_pitch + point.z * cos_pitch,
            );

            let (sin_roll, cos_roll) = rotation.roll.sin_cos();
            point = Vec3::new(
                point.x * cos_roll - point.y * sin_roll,
                point.x * sin_roll + point.y * cos_roll,
                point.z,
            );

            let depth = (point.z + radius) / (2. * radius);

            ProjectedPoint {
                pos: centre + Vec2::new(point.x, point.y),
                z: point.z,
                alpha: depth_to_alpha(depth),
                size: depth_to_size(depth),
                band: particle.band,
                index_in_band: particle.index_in_band,
            }
        })
        .collect()
}
