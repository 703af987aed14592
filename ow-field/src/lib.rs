//! This crate handles the static particle field on the sphere's latitude bands.
//!
//! The field is generated once when the simulation starts and never mutated afterwards: all
//! movement comes from the motion stage re-deriving positions from these fixed parameters every
//! frame.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use tracing::debug;

/// The full width of the uniform latitude and longitude jitter, in radians.
const ANGLE_JITTER_RANGE: f32 = 0.15;

/// The full width of the uniform radius jitter, in logical units.
const RADIUS_JITTER_RANGE: f32 = 20.;

/// The bounds of the uniform per-particle oscillation speed.
const OSCILLATION_SPEED_RANGE: std::ops::Range<f32> = 0.3..0.7;

/// One sample point on the sphere's surface.
///
/// Every field is assigned once at construction and never mutated; only the frame-local
/// projected position derived from them changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// The polar angle from the pole, in radians. Fixed per particle, derived from its band.
    pub base_latitude: f32,

    /// The azimuthal angle, in radians, evenly spaced within the band.
    pub base_longitude: f32,

    /// Which latitude ring this particle belongs to.
    pub band: usize,

    /// The position within the band, defining draw order around the ring.
    pub index_in_band: usize,

    /// A small fixed random latitude offset, breaking perfect ring symmetry.
    pub latitude_jitter: f32,

    /// A small fixed random longitude offset.
    pub longitude_jitter: f32,

    /// A fixed random radius offset, breaking perfect sphere symmetry.
    pub radius_jitter: f32,

    /// The speed of this particle's breathing oscillation.
    pub oscillation_speed: f32,

    /// The phase of this particle's breathing oscillation.
    pub oscillation_phase: f32,
}

/// The set of particles covering the sphere, grouped into latitude bands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleField {
    /// The particles themselves, in `(band, index_in_band)` order.
    particles: Vec<Particle>,

    /// The number of latitude bands.
    bands: usize,

    /// The number of particles on each band.
    points_per_band: usize,
}

impl ParticleField {
    /// Generate a field of `bands × points_per_band` particles.
    ///
    /// Bands sit at `latitude = π·(b+1)/(bands+1)`, which keeps every ring strictly between the
    /// poles so points never stack up there. Within a band the particles are evenly spaced
    /// around the ring, then each one gets its fixed jitter and oscillation parameters drawn
    /// from `rng`. Pure generation: no reseeding, nothing persisted.
    pub fn generate<R: Rng + ?Sized>(bands: usize, points_per_band: usize, rng: &mut R) -> Self {
        let mut particles = Vec::with_capacity(bands * points_per_band);

        for band in 0..bands {
            let base_latitude = PI * (band + 1) as f32 / (bands + 1) as f32;

            for index_in_band in 0..points_per_band {
                let base_longitude = TAU * index_in_band as f32 / points_per_band as f32;

                particles.push(Particle {
                    base_latitude,
                    base_longitude,
                    band,
                    index_in_band,
                    latitude_jitter: (rng.gen::<f32>() - 0.5) * ANGLE_JITTER_RANGE,
                    longitude_jitter: (rng.gen::<f32>() - 0.5) * ANGLE_JITTER_RANGE,
                    radius_jitter: (rng.gen::<f32>() - 0.5) * RADIUS_JITTER_RANGE,
                    oscillation_speed: rng.gen_range(OSCILLATION_SPEED_RANGE),
                    oscillation_phase: rng.gen_range(0.0..TAU),
                });
            }
        }

        debug!(bands, points_per_band, "Generated particle field");

        Self {
            particles,
            bands,
            points_per_band,
        }
    }

    /// The particles of the field, in `(band, index_in_band)` order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The number of latitude bands.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// The number of particles on each band.
    pub fn points_per_band(&self) -> usize {
        self.points_per_band
    }

    /// The total number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles at all.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    /// Generate a field with the standard test seed.
    fn test_field(bands: usize, points_per_band: usize) -> ParticleField {
        ParticleField::generate(bands, points_per_band, &mut StdRng::seed_from_u64(12345))
    }

    #[test]
    fn field_has_exactly_bands_times_points_particles() {
        for (bands, points_per_band) in [(1, 1), (3, 7), (12, 40)] {
            let field = test_field(bands, points_per_band);
            assert_eq!(field.len(), bands * points_per_band);
            assert_eq!(field.bands(), bands);
            assert_eq!(field.points_per_band(), points_per_band);
        }

        assert!(test_field(0, 40).is_empty());
    }

    #[test]
    fn band_latitudes_are_strictly_increasing_and_inside_the_poles() {
        let field = test_field(12, 40);

        let mut last_latitude = 0.;
        for band in 0..field.bands() {
            let latitude = field.particles()[band * field.points_per_band()].base_latitude;
            assert!(latitude > 0. && latitude < PI);
            assert!(latitude > last_latitude);
            last_latitude = latitude;
        }
    }

    #[test]
    fn longitudes_are_evenly_spaced_around_each_band() {
        let field = test_field(12, 40);

        // Band 0 with 40 points must give longitudes 0, 2π/40, 4π/40, ...
        for (p, particle) in field.particles()[..40].iter().enumerate() {
            let expected = TAU * p as f32 / 40.;
            assert!(approx_eq!(
                f32,
                particle.base_longitude,
                expected,
                epsilon = 1e-6
            ));
        }
    }

    #[test]
    fn jitter_stays_within_its_configured_ranges() {
        let field = test_field(12, 40);

        for particle in field.particles() {
            assert!(particle.latitude_jitter.abs() <= ANGLE_JITTER_RANGE / 2.);
            assert!(particle.longitude_jitter.abs() <= ANGLE_JITTER_RANGE / 2.);
            assert!(particle.radius_jitter.abs() <= RADIUS_JITTER_RANGE / 2.);
            assert!(OSCILLATION_SPEED_RANGE.contains(&particle.oscillation_speed));
            assert!((0.0..TAU).contains(&particle.oscillation_phase));
        }
    }

    #[test]
    fn band_and_index_cover_every_pair_once() {
        let field = test_field(5, 9);

        for (i, particle) in field.particles().iter().enumerate() {
            assert_eq!(particle.band, i / 9);
            assert_eq!(particle.index_in_band, i % 9);
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_given_seed() {
        assert_eq!(test_field(12, 40), test_field(12, 40));
    }
}
