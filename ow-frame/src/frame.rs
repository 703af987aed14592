//! This module handles the implementations of the frames.

use crate::FrameObject;
use serde::{Deserialize, Serialize};

/// A type of frame data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FrameType {
    /// A frame indicating that the surface should be cleared.
    Clear,

    /// A full 2D frame, made of several objects.
    Frame2D(Frame2D),
}

/// A 2D frame, made of several objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame2D {
    /// The objects in the frame.
    ///
    /// Objects are painted in order, so an object later in the vec gets drawn on top of any
    /// earlier object. Depth ordering must already be resolved by whoever builds the frame.
    objects: Vec<FrameObject>,
}

impl Frame2D {
    /// Create a new frame from the given objects.
    pub fn new(objects: Vec<FrameObject>) -> Self {
        Self { objects }
    }

    /// The objects of this frame, in paint order.
    pub fn objects(&self) -> &[FrameObject] {
        &self.objects
    }

    /// Append an object on top of everything already in the frame.
    pub fn push(&mut self, object: FrameObject) {
        self.objects.push(object);
    }
}
