use crate::config::{Color, RenderConfig};
use crate::indicator::Indicator;
use crate::simulation::Simulation;
use crate::viewport::Viewport;

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One primitive of a frame, in panel pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Text anchored at the left end of its baseline.
    Text {
        origin: Point,
        text: String,
        font_size: f32,
        color: Color,
    },
    Needle {
        indicator: Indicator,
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the needle command drawn for `indicator`, if any.
    pub fn needle(&self, indicator: Indicator) -> Option<&DrawCommand> {
        self.commands.iter().find(|command| {
            matches!(command, DrawCommand::Needle { indicator: i, .. } if *i == indicator)
        })
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// The viewport divided into 5 columns and 6 rows.
///
/// `x[i]` and `y[i]` are the grid lines; every dial position and size is a
/// fixed fraction of one cell, so the drawing scales with the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLayout {
    pub cell_width: f64,
    pub cell_height: f64,
    pub x: [f64; 6],
    pub y: [f64; 7],
    /// Radius of the main dial faces, half a cell width.
    pub radius: f64,
}

impl DialLayout {
    pub fn new(viewport: &Viewport) -> Self {
        let cell_width = viewport.width as f64 / 5.0;
        let cell_height = viewport.height as f64 / 6.0;
        let x = std::array::from_fn(|i| viewport.x as f64 + cell_width * i as f64);
        let y = std::array::from_fn(|i| viewport.y as f64 + cell_height * i as f64);
        Self {
            cell_width,
            cell_height,
            x,
            y,
            radius: cell_width / 2.0,
        }
    }

    /// Sub-dials sit a tenth of a row above their main dial's centre line.
    fn sub_dial_lift(&self) -> f64 {
        self.cell_height * 0.1
    }

    pub fn sub_dial_radius(&self) -> f64 {
        self.radius / 3.0
    }

    /// Centres of the three main dial faces: front, rear upper, rear lower.
    pub fn dial_centers(&self) -> [Point; 3] {
        [
            Point::new(self.x[1] + self.radius, self.y[3]),
            Point::new(self.x[3] + self.radius, self.y[2]),
            Point::new(self.x[3] + self.radius, self.y[4]),
        ]
    }

    /// Centres of the three sub-dials: Callippic, Olympiad, Exeligmos.
    pub fn sub_dial_centers(&self) -> [Point; 3] {
        let lift = self.sub_dial_lift();
        [
            Point::new(self.x[3] + self.cell_width / 4.0, self.y[2] - lift),
            Point::new(self.x[4] - self.cell_width / 4.0, self.y[2] - lift),
            Point::new(self.x[4] - self.cell_width / 4.0, self.y[4] - lift),
        ]
    }

    /// Pivot of an indicator's needle.
    pub fn needle_center(&self, indicator: Indicator) -> Point {
        let [front, rear_upper, rear_lower] = self.dial_centers();
        let [callippic, olympiad, exeligmos] = self.sub_dial_centers();
        match indicator {
            Indicator::Sun | Indicator::Moon => front,
            Indicator::Metonic => rear_upper,
            Indicator::Saros => rear_lower,
            Indicator::Callippic => callippic,
            Indicator::Olympiad => olympiad,
            Indicator::Exeligmos => exeligmos,
        }
    }

    pub fn needle_length(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Sun | Indicator::Metonic | Indicator::Saros => self.radius,
            Indicator::Moon => self.radius / 1.3,
            Indicator::Callippic | Indicator::Olympiad | Indicator::Exeligmos => {
                self.sub_dial_radius()
            }
        }
    }
}

/// End of a needle of length `radius` pivoting at `center`, at `degrees`
/// measured clockwise from the positive x axis (screen y grows downwards).
pub fn needle_endpoint(center: Point, radius: f64, degrees: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(
        center.x + radians.cos() * radius,
        center.y + radians.sin() * radius,
    )
}

// ============================================================================
// RENDERING
// ============================================================================

/// Builds the frame for `sim`. The panel outside `viewport` is cleared to
/// the background colour.
pub fn render(sim: &Simulation, viewport: &Viewport, config: &RenderConfig) -> Scene {
    let mut scene = Scene::new();
    let layout = DialLayout::new(viewport);

    add_backgrounds(&mut scene, viewport, config);
    add_labels(&mut scene, &layout, config);
    add_frames(&mut scene, &layout, config);
    add_dials(&mut scene, &layout, config);
    add_needles(&mut scene, &layout, sim, config);

    scene
}

fn add_backgrounds(scene: &mut Scene, viewport: &Viewport, config: &RenderConfig) {
    scene.add_command(DrawCommand::Clear(config.background_color));
    scene.add_command(DrawCommand::FillRect {
        x: viewport.x as f64,
        y: viewport.y as f64,
        width: viewport.width as f64,
        height: viewport.height as f64,
        color: config.viewport_color,
    });
}

fn add_labels(scene: &mut Scene, layout: &DialLayout, config: &RenderConfig) {
    let cw = layout.cell_width;
    let baseline = layout.y[0] + (layout.y[2] - layout.y[0]) / 3.0;
    // whole point sizes keep glyph metrics stable across window sizes
    let font_size = (cw * config.font_scale as f64).floor() as f32;

    for (text, x) in [
        (&config.front_label, layout.x[1] - cw * 0.07),
        (&config.rear_label, layout.x[3] - cw * 0.05),
    ] {
        scene.add_command(DrawCommand::Text {
            origin: Point::new(x, baseline),
            text: text.clone(),
            font_size,
            color: config.text_color,
        });
    }
}

/// Front and rear plates; they protrude 2% of a cell past the dial faces.
fn add_frames(scene: &mut Scene, layout: &DialLayout, config: &RenderConfig) {
    let cw = layout.cell_width;
    for left in [layout.x[1], layout.x[3]] {
        scene.add_command(DrawCommand::FillRect {
            x: left - cw * 0.02,
            y: layout.y[1],
            width: cw * 1.04,
            height: layout.cell_height * 4.0,
            color: config.frame_color,
        });
    }
}

fn add_dials(scene: &mut Scene, layout: &DialLayout, config: &RenderConfig) {
    for center in layout.dial_centers() {
        scene.add_command(DrawCommand::FillCircle {
            center,
            radius: layout.radius,
            color: config.dial_color,
        });
    }
    for center in layout.sub_dial_centers() {
        scene.add_command(DrawCommand::FillCircle {
            center,
            radius: layout.sub_dial_radius(),
            color: config.sub_dial_color,
        });
    }
}

fn add_needles(scene: &mut Scene, layout: &DialLayout, sim: &Simulation, config: &RenderConfig) {
    let fancy = sim.fancy_colors();
    let width = if fancy {
        config.fancy_stroke_width
    } else {
        config.plain_stroke_width
    };

    for indicator in Indicator::ALL {
        let from = layout.needle_center(indicator);
        let to = needle_endpoint(from, layout.needle_length(indicator), sim.angle(indicator));
        let color = if fancy {
            indicator.fancy_color()
        } else {
            config.plain_needle_color
        };
        scene.add_command(DrawCommand::Needle {
            indicator,
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::compute_viewport;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn frame(sim: &Simulation) -> Scene {
        let viewport = compute_viewport(500, 350);
        render(sim, &viewport, &RenderConfig::default())
    }

    #[test]
    fn endpoint_at_zero_and_ninety_degrees() {
        let c = Point::new(150.0, 175.0);
        assert!(close(needle_endpoint(c, 50.0, 0.0), Point::new(200.0, 175.0)));
        assert!(close(needle_endpoint(c, 50.0, 90.0), Point::new(150.0, 225.0)));
        assert!(close(needle_endpoint(c, 50.0, 180.0), Point::new(100.0, 175.0)));
        assert!(close(needle_endpoint(c, 50.0, 270.0), Point::new(150.0, 125.0)));
    }

    #[test]
    fn layout_for_reference_panel() {
        let layout = DialLayout::new(&compute_viewport(500, 350));
        assert_eq!(layout.cell_width, 100.0);
        assert!((layout.cell_height - 350.0 / 6.0).abs() < EPS);
        assert_eq!(layout.radius, 50.0);
        assert!(close(layout.needle_center(Indicator::Sun), Point::new(150.0, 175.0)));
        assert!(close(layout.needle_center(Indicator::Metonic), Point::new(350.0, 350.0 / 3.0)));
        assert!((layout.needle_length(Indicator::Moon) - 50.0 / 1.3).abs() < EPS);
        assert!((layout.needle_length(Indicator::Exeligmos) - 50.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn frame_contains_expected_primitives() {
        let scene = frame(&Simulation::new());
        let commands = scene.commands();
        assert!(matches!(commands[0], DrawCommand::Clear(Color::WHITE)));

        let count = |pred: fn(&DrawCommand) -> bool| commands.iter().filter(|c| pred(c)).count();
        assert_eq!(count(|c| matches!(c, DrawCommand::FillRect { .. })), 3);
        assert_eq!(count(|c| matches!(c, DrawCommand::Text { .. })), 2);
        assert_eq!(count(|c| matches!(c, DrawCommand::FillCircle { .. })), 6);
        assert_eq!(count(|c| matches!(c, DrawCommand::Needle { .. })), 7);
        assert_eq!(scene.len(), 1 + 3 + 2 + 6 + 7);
    }

    #[test]
    fn labels_sit_above_the_frames() {
        let scene = frame(&Simulation::new());
        let labels: Vec<_> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { origin, text, font_size, .. } => {
                    Some((origin.x, origin.y, text.as_str(), *font_size))
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels[0].2, "Front side");
        assert_eq!(labels[1].2, "Rear side");
        assert!((labels[0].0 - 93.0).abs() < EPS);
        assert!((labels[1].0 - 295.0).abs() < EPS);
        assert!(labels[0].1 < 350.0 / 6.0);
        assert_eq!(labels[0].3, 20.0);
    }

    #[test]
    fn label_size_is_a_whole_point_size() {
        // 640x480 letterboxes to 640x448: cw = 128, 128 × 0.2 = 25.6
        let viewport = compute_viewport(640, 480);
        let scene = render(&Simulation::new(), &viewport, &RenderConfig::default());
        let sizes: Vec<f32> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { font_size, .. } => Some(*font_size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, [25.0, 25.0]);
    }

    #[test]
    fn sun_needle_points_up_at_start() {
        let scene = frame(&Simulation::new());
        let Some(DrawCommand::Needle { from, to, .. }) = scene.needle(Indicator::Sun) else {
            panic!("sun needle missing");
        };
        assert!(close(*from, Point::new(150.0, 175.0)));
        assert!(close(*to, Point::new(150.0, 125.0)));
    }

    #[test]
    fn plain_mode_is_black_and_thin() {
        let scene = frame(&Simulation::new());
        for indicator in Indicator::ALL {
            let Some(DrawCommand::Needle { width, color, .. }) = scene.needle(indicator) else {
                panic!("{indicator} needle missing");
            };
            assert_eq!(*color, Color::BLACK);
            assert_eq!(*width, 1.8);
        }
    }

    #[test]
    fn fancy_mode_uses_indicator_palette() {
        let mut sim = Simulation::new();
        sim.toggle_fancy_colors();
        let scene = frame(&sim);
        for indicator in Indicator::ALL {
            let Some(DrawCommand::Needle { width, color, .. }) = scene.needle(indicator) else {
                panic!("{indicator} needle missing");
            };
            assert_eq!(*color, indicator.fancy_color());
            assert_eq!(*width, 2.5);
        }
    }

    #[test]
    fn double_toggle_restores_frame() {
        let mut sim = Simulation::new();
        let before = frame(&sim);
        sim.toggle_fancy_colors();
        assert_ne!(frame(&sim), before);
        sim.toggle_fancy_colors();
        assert_eq!(frame(&sim), before);
    }

    #[test]
    fn render_is_idempotent() {
        let mut sim = Simulation::new();
        for _ in 0..500 {
            sim.tick();
        }
        assert_eq!(frame(&sim), frame(&sim));
    }

    #[test]
    fn drawing_scales_with_viewport() {
        let sim = Simulation::new();
        let config = RenderConfig::default();
        let small = render(&sim, &compute_viewport(500, 350), &config);
        let large = render(&sim, &compute_viewport(1000, 700), &config);
        let (
            Some(DrawCommand::Needle { from: f1, to: t1, .. }),
            Some(DrawCommand::Needle { from: f2, to: t2, .. }),
        ) = (small.needle(Indicator::Saros), large.needle(Indicator::Saros))
        else {
            panic!("saros needle missing");
        };
        assert!(close(Point::new(f1.x * 2.0, f1.y * 2.0), *f2));
        assert!(close(Point::new(t1.x * 2.0, t1.y * 2.0), *t2));
    }

    #[test]
    fn empty_viewport_still_renders() {
        let sim = Simulation::new();
        let scene = render(&sim, &compute_viewport(0, 0), &RenderConfig::default());
        assert_eq!(scene.len(), 19);
    }
}
