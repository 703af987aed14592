//! This module handles the revolving arc text: a small rotating queue of phrases typed out
//! character by character onto an arc around the sphere.
//!
//! The engine shares the simulation clock with the particle motion but is otherwise
//! independent of it. Each segment goes `typing → complete` exactly once; the queue rolls over
//! on a fixed interval, retiring the newest segment, evicting the oldest past the cap, and
//! starting the next phrase in the cyclic list.

use crate::compositor::ACCENT;
use glam::Vec2;
use ow_frame::{Frame2D, FrameObject, GradientStop, Object};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, f32::consts::FRAC_PI_2};
use tracing::trace;

/// The most segments that can coexist in the queue.
const MAX_SEGMENTS: usize = 3;

/// The angular spacing between consecutive characters, in radians.
const CHAR_SPACING: f32 = 0.058;

/// The angular gap between consecutive segments, in radians.
const GAP_SPACING: f32 = 0.15;

/// How far outside the sphere radius the text arc sits, in logical units.
const ARC_RADIUS_OFFSET: f32 = 36.;

/// The speed of the arc's own slow drift around the sphere.
const ARC_DRIFT_SPEED: f32 = 0.12;

/// The starting angle of the arc before the drift is added.
const ARC_BASE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// The opacity floor for segments pushed far back along the arc.
const OPACITY_FLOOR: f32 = 0.15;

/// How much opacity each step away from the newest segment costs.
const OPACITY_FALLOFF: f32 = 0.3;

/// The font size of the arc glyphs, in logical units.
const GLYPH_SIZE: f32 = 18.;

/// The pulse speed of the leading marker dot's glow.
const MARKER_PULSE_SPEED: f32 = 3.;

/// The blink speed of the typing cursor.
const CURSOR_BLINK_SPEED: f32 = 6.;

/// One phrase instance in the queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// The full phrase to type out.
    pub target: String,

    /// The prefix revealed so far. Grows one character at a time and never shrinks.
    pub text: String,

    /// Whether the segment has finished typing, or was forcibly retired by a rollover.
    /// Never goes back to false.
    pub complete: bool,

    /// The segment's opacity; decays as newer segments push it back along the arc.
    pub opacity: f32,
}

impl ArcSegment {
    /// Create a fresh, fully opaque segment with nothing revealed yet.
    fn new(target: String) -> Self {
        Self {
            target,
            text: String::new(),
            complete: false,
            opacity: 1.,
        }
    }
}

/// The rotating queue of typed phrases.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcTextEngine {
    /// The live segments, oldest first.
    segments: VecDeque<ArcSegment>,

    /// The index into the phrase list of the newest segment.
    phrase_index: usize,

    /// The simulation time of the last rollover.
    last_swap: f32,

    /// The simulation time at which the newest segment started typing.
    typing_since: f32,

    /// The cyclic phrase list.
    phrases: Vec<String>,

    /// Simulated seconds between rollovers.
    swap_interval: f32,

    /// Characters revealed per simulated second.
    chars_per_second: f32,
}

impl ArcTextEngine {
    /// Create an engine with one segment already typing the first phrase.
    ///
    /// An empty phrase list gives an engine with an empty queue that never does anything.
    pub fn new(phrases: Vec<String>, swap_interval: f32, chars_per_second: f32) -> Self {
        let segments = phrases
            .first()
            .map(|phrase| VecDeque::from([ArcSegment::new(phrase.clone())]))
            .unwrap_or_default();

        Self {
            segments,
            phrase_index: 0,
            last_swap: 0.,
            typing_since: 0.,
            phrases,
            swap_interval,
            chars_per_second,
        }
    }

    /// The live segments, oldest first.
    pub fn segments(&self) -> &VecDeque<ArcSegment> {
        &self.segments
    }

    /// Advance the engine to simulation time `t`: reveal characters of the newest segment, roll
    /// the queue over when the interval has elapsed, and recompute the trailing fade.
    pub fn step(&mut self, t: f32) {
        if self.phrases.is_empty() {
            return;
        }

        // Reveal characters at the configured rate until the typing budget is spent
        let typed_budget = ((t - self.typing_since) * self.chars_per_second).floor() as usize;
        if let Some(newest) = self.segments.back_mut() {
            if !newest.complete {
                let target_chars = newest.target.chars().count();
                let revealed = newest.text.chars().count();

                if revealed < typed_budget {
                    newest.text.extend(
                        newest
                            .target
                            .chars()
                            .skip(revealed)
                            .take(typed_budget - revealed),
                    );
                }

                if newest.text.chars().count() == target_chars {
                    newest.complete = true;
                }
            }
        }

        // Roll over: retire the newest, trim the queue, start the next phrase in the cycle
        if t - self.last_swap > self.swap_interval {
            self.last_swap = t;

            if let Some(newest) = self.segments.back_mut() {
                newest.complete = true;
            }
            while self.segments.len() >= MAX_SEGMENTS {
                self.segments.pop_front();
            }

            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            self.segments
                .push_back(ArcSegment::new(self.phrases[self.phrase_index].clone()));
            self.typing_since = t;

            trace!(phrase_index = self.phrase_index, "Arc text rollover");
        }

        // Every non-newest segment trails off toward the opacity floor
        let len = self.segments.len();
        for (i, segment) in self.segments.iter_mut().enumerate() {
            if i + 1 < len {
                segment.opacity =
                    (1.0 - (len - 1 - i) as f32 * OPACITY_FALLOFF).max(OPACITY_FLOOR);
            }
        }
    }

    /// Lay the arc text out into the frame: the glyphs along the arc, the glowing marker dot
    /// leading it, and the blinking cursor while the newest segment is still typing.
    pub fn layout_into(&self, frame: &mut Frame2D, t: f32, centre: Vec2, sphere_radius: f32) {
        let arc_radius = sphere_radius + ARC_RADIUS_OFFSET;
        let base_angle = ARC_BASE_ANGLE + t * ARC_DRIFT_SPEED;

        let mut run_angle = base_angle;
        let len = self.segments.len();

        for (i, segment) in self.segments.iter().enumerate() {
            let newest = i + 1 == len;
            let segment_alpha = if newest { 1.0 } else { segment.opacity };

            for (ci, glyph) in segment.text.chars().enumerate() {
                let angle = run_angle + ci as f32 * CHAR_SPACING;
                let pos = centre + Vec2::new(angle.cos(), angle.sin()) * arc_radius;

                // Characters on the near, bottom side of the arc read more strongly
                let pos_fade = angle.sin() * 0.5 + 0.5;
                let alpha = (pos_fade * 0.7 + 0.2).clamp(0.1, 0.9) * segment_alpha;

                frame.push(FrameObject {
                    object: Object::Glyph {
                        glyph,
                        centre: pos,
                        angle: angle + FRAC_PI_2,
                        size: GLYPH_SIZE,
                    },
                    colour: ACCENT,
                    alpha,
                });
            }

            run_angle += segment.text.chars().count() as f32 * CHAR_SPACING + GAP_SPACING;
        }

        // The glowing marker dot leading the arc
        let dot_angle = base_angle - CHAR_SPACING * 1.5;
        let dot_pos = centre + Vec2::new(dot_angle.cos(), dot_angle.sin()) * arc_radius;
        frame.push(FrameObject {
            object: Object::RadialGlow {
                centre: dot_pos,
                radius: 10.,
                stops: vec![
                    GradientStop {
                        offset: 0.,
                        colour: ACCENT,
                        alpha: 0.5 + (t * MARKER_PULSE_SPEED).sin() * 0.2,
                    },
                    GradientStop {
                        offset: 1.,
                        colour: ACCENT,
                        alpha: 0.,
                    },
                ],
            },
            colour: ACCENT,
            alpha: 1.,
        });
        frame.push(FrameObject {
            object: Object::Dot {
                centre: dot_pos,
                radius: 3.,
            },
            colour: ACCENT,
            alpha: 1.,
        });

        // The blinking cursor trailing the newest segment while it's still typing
        if let Some(newest) = self.segments.back() {
            if !newest.complete && (t * CURSOR_BLINK_SPEED).sin() > 0. {
                let cursor_angle = run_angle - GAP_SPACING;
                let pos = centre + Vec2::new(cursor_angle.cos(), cursor_angle.sin()) * arc_radius;

                frame.push(FrameObject {
                    object: Object::CursorBar {
                        centre: pos,
                        angle: cursor_angle + FRAC_PI_2,
                        length: 20.,
                        thickness: 2.,
                    },
                    colour: ACCENT,
                    alpha: 0.7,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FRAME_DT;

    /// Step the engine tick by tick from its current time up to `until`.
    fn run_until(engine: &mut ArcTextEngine, from: f32, until: f32) -> f32 {
        let mut t = from;
        while t < until {
            t += FRAME_DT;
            engine.step(t);
        }
        t
    }

    #[test]
    fn starts_with_one_empty_segment_targeting_the_first_phrase() {
        let engine = ArcTextEngine::new(vec!["A".to_owned(), "BB".to_owned()], 3.5, 33.);

        assert_eq!(engine.segments().len(), 1);
        let segment = &engine.segments()[0];
        assert_eq!(segment.target, "A");
        assert_eq!(segment.text, "");
        assert!(!segment.complete);
    }

    #[test]
    fn first_rollover_retires_the_first_phrase_and_starts_the_second() {
        let mut engine = ArcTextEngine::new(vec!["A".to_owned(), "BB".to_owned()], 3.5, 33.);
        run_until(&mut engine, 0., 3.6);

        assert_eq!(engine.segments().len(), 2);

        let first = &engine.segments()[0];
        assert!(first.complete);
        assert_eq!(first.text, "A");

        let second = &engine.segments()[1];
        assert_eq!(second.target, "BB");
        assert!(second.text.len() <= 2);
    }

    #[test]
    fn queue_never_exceeds_its_cap() {
        let phrases: Vec<String> = (0..5).map(|i| format!("phrase {i}")).collect();
        let mut engine = ArcTextEngine::new(phrases, 3.5, 33.);

        let mut t = 0.;
        for _ in 0..20 {
            t = run_until(&mut engine, t, t + 3.5 + FRAME_DT);
            assert!(engine.segments().len() <= MAX_SEGMENTS);
        }
    }

    #[test]
    fn rollovers_cycle_phrases_round_robin() {
        let phrases = vec!["aa".to_owned(), "bb".to_owned(), "cc".to_owned()];
        let mut engine = ArcTextEngine::new(phrases.clone(), 3.5, 33.);

        let mut t = 0.;
        for rollover in 1..=7 {
            t = run_until(&mut engine, t, t + 3.5 + FRAME_DT);
            let newest = engine.segments().back().unwrap();
            assert_eq!(newest.target, phrases[rollover % phrases.len()]);
        }
    }

    #[test]
    fn typing_is_monotonic_and_terminal() {
        let mut engine = ArcTextEngine::new(vec!["Hello, sphere".to_owned()], 1_000., 33.);

        let mut t = 0.;
        let mut last_len = 0;
        let mut completed_at = None;

        for _ in 0..200 {
            t += FRAME_DT;
            engine.step(t);

            let newest = engine.segments().back().unwrap();
            assert!(newest.text.len() >= last_len);
            assert!(newest.target.starts_with(&newest.text));
            last_len = newest.text.len();

            if newest.complete && completed_at.is_none() {
                completed_at = Some(t);
            }
            if completed_at.is_some() {
                assert!(newest.complete);
            }
        }

        // 13 characters at 33 chars/s finish well inside 200 ticks of 0.012s
        let completed_at = completed_at.expect("The phrase should finish typing");
        assert_eq!(engine.segments().back().unwrap().text, "Hello, sphere");
        assert!(completed_at < 1.);
    }

    #[test]
    fn a_large_time_jump_reveals_many_characters_at_once() {
        let mut engine = ArcTextEngine::new(vec!["Hello, sphere".to_owned()], 1_000., 33.);

        // A budget of 16 characters lands in a single step
        engine.step(0.5);

        let newest = engine.segments().back().unwrap();
        assert_eq!(newest.text, "Hello, sphere");
        assert!(newest.complete);
    }

    #[test]
    fn older_segments_fade_toward_the_floor() {
        let phrases: Vec<String> = (0..4).map(|i| format!("p{i}")).collect();
        let mut engine = ArcTextEngine::new(phrases, 3.5, 33.);

        let mut t = 0.;
        for _ in 0..3 {
            t = run_until(&mut engine, t, t + 3.5 + FRAME_DT);
        }

        let opacities: Vec<f32> = engine.segments().iter().map(|s| s.opacity).collect();
        assert_eq!(opacities.len(), MAX_SEGMENTS);
        assert_eq!(opacities[0], 1.0 - 2. * OPACITY_FALLOFF);
        assert_eq!(opacities[1], 1.0 - OPACITY_FALLOFF);
        assert_eq!(opacities[2], 1.0);

        for opacity in opacities {
            assert!(opacity >= OPACITY_FLOOR);
        }
    }

    #[test]
    fn rollover_sequence_snapshot() {
        let mut engine = ArcTextEngine::new(vec!["A".to_owned(), "BB".to_owned()], 3.5, 33.);

        let mut t = 0.;
        for _ in 0..2 {
            t = run_until(&mut engine, t, t + 3.5 + FRAME_DT);
        }

        let targets: Vec<&str> = engine.segments().iter().map(|s| s.target.as_str()).collect();
        insta::assert_debug_snapshot!(targets, @r###"
        [
            "A",
            "BB",
            "A",
        ]
        "###);
    }

    #[test]
    fn an_empty_phrase_list_stays_inert() {
        let mut engine = ArcTextEngine::new(vec![], 3.5, 33.);
        run_until(&mut engine, 0., 20.);
        assert!(engine.segments().is_empty());
    }

    #[test]
    fn layout_emits_marker_and_glyphs() {
        let mut engine = ArcTextEngine::new(vec!["Hi".to_owned()], 3.5, 33.);
        let t = run_until(&mut engine, 0., 1.);

        let mut frame = Frame2D::default();
        engine.layout_into(&mut frame, t, Vec2::new(280., 280.), 220.);

        let glyphs = frame
            .objects()
            .iter()
            .filter(|obj| matches!(obj.object, Object::Glyph { .. }))
            .count();
        assert_eq!(glyphs, 2);

        assert!(frame
            .objects()
            .iter()
            .any(|obj| matches!(obj.object, Object::RadialGlow { .. })));
    }
}
