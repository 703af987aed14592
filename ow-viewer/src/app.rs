//! This module handles the [`App`] type for the `eframe`-based GUI.

use egui::{
    epaint::{PathShape, TextShape},
    Color32, FontId, Pos2, Rect, Sense, Stroke,
};
use ow_frame::{smooth_closed_loop, FrameType, Object, RGBArray, CANVAS_HEIGHT, CANVAS_WIDTH};
use ow_sim::{PointerEvent, SphereConfig, SphereSim};
use ow_surface_trait::Surface;
use tracing::debug;

/// How many samples to take along each spline segment when smoothing a band loop.
const LOOP_STEPS: usize = 8;

/// How many concentric rings to draw when approximating a radial gradient.
const GLOW_RINGS: usize = 24;

/// A surface that keeps the most recent frame so the GUI can paint it.
struct CanvasSurface {
    /// The latest frame displayed on this surface.
    frame: FrameType,
}

impl Surface for CanvasSurface {
    fn init() -> Self {
        Self {
            frame: FrameType::Clear,
        }
    }

    fn display_frame(&mut self, frame: FrameType) {
        self.frame = frame;
    }
}

/// The app type itself.
pub struct App {
    /// The simulation being viewed.
    sim: SphereSim,

    /// The surface that the simulation's frames get displayed on.
    surface: CanvasSurface,

    /// Whether the pointer was over the canvas on the previous update.
    was_hovering: bool,
}

impl App {
    /// Create a new [`App`] running the given config.
    pub fn new(config: SphereConfig) -> Self {
        debug!(?config, "Creating app");
        Self {
            sim: SphereSim::from_config(config),
            surface: CanvasSurface::init(),
            was_hovering: false,
        }
    }

    /// Turn the hover state of the canvas into pointer events for the simulation.
    fn forward_pointer(&mut self, rect: Rect, hover_pos: Option<Pos2>) {
        match hover_pos {
            Some(pos) => {
                let x = ((pos.x - rect.center().x) / (rect.width() / 2.)).clamp(-1., 1.);
                let y = ((pos.y - rect.center().y) / (rect.height() / 2.)).clamp(-1., 1.);
                self.sim.push_pointer(PointerEvent::Moved { x, y });
                self.was_hovering = true;
            }
            None if self.was_hovering => {
                self.sim.push_pointer(PointerEvent::Left);
                self.was_hovering = false;
            }
            None => {}
        }
    }

    /// Paint the current frame of `self.surface` into the given rect.
    fn paint_frame(&self, painter: &egui::Painter, rect: Rect) {
        let FrameType::Frame2D(frame) = &self.surface.frame else {
            return;
        };

        let scale = f32::min(rect.width() / CANVAS_WIDTH, rect.height() / CANVAS_HEIGHT);
        let to_screen = |point: glam::Vec2| -> Pos2 {
            Pos2::new(
                rect.center().x + (point.x - CANVAS_WIDTH / 2.) * scale,
                rect.center().y + (point.y - CANVAS_HEIGHT / 2.) * scale,
            )
        };

        for frame_object in frame.objects() {
            let colour = colour32(frame_object.colour, frame_object.alpha);

            match &frame_object.object {
                Object::BandLoop {
                    points,
                    line_width,
                    fill,
                } => {
                    let screen_points: Vec<Pos2> = smooth_closed_loop(points, LOOP_STEPS)
                        .into_iter()
                        .map(to_screen)
                        .collect();

                    if let &Some((fill_colour, fill_alpha)) = fill {
                        painter.add(PathShape {
                            points: screen_points.clone(),
                            closed: true,
                            fill: colour32(fill_colour, fill_alpha),
                            stroke: Stroke::NONE,
                        });
                    }
                    painter.add(PathShape::closed_line(
                        screen_points,
                        Stroke::new(line_width * scale, colour),
                    ));
                }

                &Object::Dot { centre, radius } => {
                    painter.circle_filled(to_screen(centre), radius * scale, colour);
                }

                Object::RadialGlow {
                    centre,
                    radius,
                    stops,
                } => {
                    // Approximate the gradient with thin stroked rings, sampled inside out
                    let ring_width = (radius * scale / GLOW_RINGS as f32).max(1.);
                    for ring in 0..GLOW_RINGS {
                        let offset = (ring as f32 + 0.5) / GLOW_RINGS as f32;
                        let (ring_colour, ring_alpha) = sample_stops(stops, offset);
                        painter.circle_stroke(
                            to_screen(*centre),
                            radius * offset * scale,
                            Stroke::new(ring_width, colour32(ring_colour, ring_alpha)),
                        );
                    }
                }

                &Object::Glyph {
                    glyph,
                    centre,
                    angle,
                    size,
                } => {
                    let galley = painter.layout_no_wrap(
                        glyph.to_string(),
                        FontId::proportional(size * scale),
                        colour,
                    );
                    let half_size = egui::emath::Rot2::from_angle(angle) * (galley.size() / 2.);
                    let mut shape = TextShape::new(to_screen(centre) - half_size, galley);
                    shape.angle = angle;
                    painter.add(shape);
                }

                &Object::CursorBar {
                    centre,
                    angle,
                    length,
                    thickness,
                } => {
                    let offset = egui::Vec2::angled(angle) * (length * scale / 2.);
                    let centre = to_screen(centre);
                    painter.line_segment(
                        [centre - offset, centre + offset],
                        Stroke::new(thickness * scale, colour),
                    );
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let background = Color32::from_rgb(8, 12, 18);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(background))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::hover());
                let rect = response.rect;
                if rect.width() < 1. || rect.height() < 1. {
                    return;
                }

                self.forward_pointer(rect, response.hover_pos());

                let (frame, delay) = self.sim.next_frame();
                self.surface.display_frame(frame);
                self.paint_frame(&painter, rect);

                ctx.request_repaint_after(delay);
            });
    }
}

/// Convert a colour and an alpha in `0.0..=1.0` into an egui colour.
fn colour32([r, g, b]: RGBArray, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0., 1.) * 255.) as u8)
}

/// Sample an ordered list of gradient stops at the given offset, lerping both the colour and the
/// alpha between the two stops either side of it.
fn sample_stops(stops: &[ow_frame::GradientStop], offset: f32) -> (RGBArray, f32) {
    let Some(first) = stops.first() else {
        return ([0; 3], 0.);
    };
    if offset <= first.offset {
        return (first.colour, first.alpha);
    }

    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if offset <= b.offset {
            let t = if b.offset > a.offset {
                (offset - a.offset) / (b.offset - a.offset)
            } else {
                1.
            };
            let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
            let colour = [
                lerp(a.colour[0], b.colour[0]),
                lerp(a.colour[1], b.colour[1]),
                lerp(a.colour[2], b.colour[2]),
            ];
            return (colour, a.alpha + (b.alpha - a.alpha) * t);
        }
    }

    let last = stops.last().unwrap();
    (last.colour, last.alpha)
}
