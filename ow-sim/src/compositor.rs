//! This module composes the projected points and the arc text into a single 2D frame.
//!
//! Depth ordering is the painter's algorithm: everything is sorted back to front and painted in
//! order. There is no z-buffer; the scene is a hollow point and line cloud with no opaque
//! solids, so overdraw order is all that matters.

use crate::{arc_text::ArcTextEngine, motion::ProjectedPoint};
use glam::Vec2;
use ow_frame::{Frame2D, FrameObject, GradientStop, Object, RGBArray};

/// The stroke hue for even-index bands.
const EVEN_BAND_HUE: RGBArray = [180, 210, 230];

/// The stroke hue for odd-index bands.
const ODD_BAND_HUE: RGBArray = [140, 220, 200];

/// The fill colour shared by every band loop.
const BAND_FILL: RGBArray = [200, 230, 245];

/// The dot palette, keyed by band index mod 3.
const DOT_PALETTE: [RGBArray; 3] = [[180, 220, 240], [200, 235, 250], [160, 210, 230]];

/// The edge colour of the ambient glow.
const GLOW_EDGE: RGBArray = [180, 225, 240];

/// The accent colour shared by the glow's mid stop and the arc text.
pub(crate) const ACCENT: RGBArray = [52, 211, 153];

/// Compose one frame: band mesh loops, then particle dots, then the ambient glow, then the arc
/// text on top when it's enabled.
pub fn compose(
    mut projected: Vec<ProjectedPoint>,
    arc: Option<&ArcTextEngine>,
    t: f32,
    bands: usize,
    radius: f32,
    centre: Vec2,
) -> Frame2D {
    // Farthest first
    projected.sort_by(|a, b| a.z.total_cmp(&b.z));

    let mut frame = Frame2D::default();

    // One smoothed loop per band, with the band's average depth driving its boldness and the
    // band parity alternating the hue
    for band in 0..bands {
        let mut band_points: Vec<&ProjectedPoint> =
            projected.iter().filter(|point| point.band == band).collect();
        if band_points.len() <= 2 {
            continue;
        }
        band_points.sort_by_key(|point| point.index_in_band);

        let avg_z = band_points.iter().map(|point| point.z).sum::<f32>()
            / band_points.len() as f32;
        let band_depth = (avg_z + radius) / (2. * radius);

        frame.push(FrameObject {
            object: Object::BandLoop {
                points: band_points.iter().map(|point| point.pos).collect(),
                line_width: 1.0 + band_depth,
                fill: Some((BAND_FILL, 0.02 + band_depth * 0.1)),
            },
            colour: if band % 2 == 0 {
                EVEN_BAND_HUE
            } else {
                ODD_BAND_HUE
            },
            alpha: 0.08 + band_depth * 0.28,
        });
    }

    // Particle dots, already depth sorted
    for point in &projected {
        frame.push(FrameObject {
            object: Object::Dot {
                centre: point.pos,
                radius: point.size,
            },
            colour: DOT_PALETTE[point.band % 3],
            alpha: point.alpha,
        });
    }

    // The ambient glow overlay, independent of the particle data
    frame.push(FrameObject {
        object: Object::RadialGlow {
            centre,
            radius: radius * 0.7,
            stops: vec![
                GradientStop {
                    offset: 0.,
                    colour: GLOW_EDGE,
                    alpha: 0.1,
                },
                GradientStop {
                    offset: 0.5,
                    colour: ACCENT,
                    alpha: 0.04,
                },
                GradientStop {
                    offset: 1.,
                    colour: GLOW_EDGE,
                    alpha: 0.,
                },
            ],
        },
        colour: GLOW_EDGE,
        alpha: 1.,
    });

    if let Some(arc) = arc {
        arc.layout_into(&mut frame, t, centre, radius);
    }

    frame
}
