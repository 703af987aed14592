//! This module handles the objects that frames are made of.

mod splines;

pub use self::splines::smooth_closed_loop;

use crate::RGBArray;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single object in a frame: a shape together with its colour and opacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameObject {
    /// The object itself.
    pub object: Object,

    /// The colour of the object.
    pub colour: RGBArray,

    /// The opacity of the object, in `[0, 1]`.
    pub alpha: f32,
}

/// One colour stop of a radial gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// The distance of this stop from the centre, as a proportion of the gradient radius.
    pub offset: f32,

    /// The colour at this stop.
    pub colour: RGBArray,

    /// The alpha at this stop.
    pub alpha: f32,
}

/// A shape that a surface knows how to paint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Object {
    /// A closed loop through the projected points of one latitude band.
    ///
    /// The points are the raw projected positions; surfaces are expected to smooth them with
    /// [`smooth_closed_loop`] before stroking.
    BandLoop {
        /// The projected band points, in ring order.
        points: Vec<Vec2>,

        /// The stroke width, in logical units.
        line_width: f32,

        /// An optional fill with its own colour and alpha.
        fill: Option<(RGBArray, f32)>,
    },

    /// A filled disc for a single particle.
    Dot {
        /// The centre of the disc.
        centre: Vec2,

        /// The radius of the disc, in logical units.
        radius: f32,
    },

    /// A radial gradient overlay.
    ///
    /// The stops carry their own colours and alphas, which take precedence over the ones on the
    /// owning [`FrameObject`].
    RadialGlow {
        /// The centre of the gradient.
        centre: Vec2,

        /// The outer radius of the gradient.
        radius: f32,

        /// The colour stops, ordered by offset from centre to edge.
        stops: Vec<GradientStop>,
    },

    /// A single character placed on the text arc.
    Glyph {
        /// The character to draw.
        glyph: char,

        /// The centre of the character.
        centre: Vec2,

        /// The rotation of the character, keeping it tangent to the arc.
        angle: f32,

        /// The font size, in logical units.
        size: f32,
    },

    /// The typing cursor bar, rotated like a glyph.
    CursorBar {
        /// The centre of the bar.
        centre: Vec2,

        /// The rotation of the bar.
        angle: f32,

        /// The length of the bar's long axis.
        length: f32,

        /// The thickness of the bar.
        thickness: f32,
    },
}
