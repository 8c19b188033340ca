use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use bon::Builder;
use log::{debug, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::{RenderConfig, WindowConfig};
use crate::error::Result;
use crate::font::resolve_font;
use crate::indicator::Indicator;
use crate::scene::render;
use crate::simulation::{Simulation, Speed};
use crate::timer::Ticker;
use crate::viewport::compute_viewport;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Operations the window shell can request from the mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    ToggleRunning,
    /// Restore the initial setting at Normal speed and keep running.
    Reset,
    /// Speed level 0 (slow), 1 (normal) or 2 (fast); other levels are ignored.
    SetSpeed(i32),
    ToggleFancyColors,
    /// Show each indicator in its own colour while the describe key is held
    /// (`true`) and restore the previous palette when it is let go.
    Describe(bool),
    Exit,
}

/// What the shell should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
    pub exit: bool,
}

#[derive(Debug, Clone, Builder)]
pub struct MechanismConfig {
    #[builder(default)]
    pub window: WindowConfig,
    #[builder(default)]
    pub render: RenderConfig,
    #[builder(default)]
    pub speed: Speed,
    #[builder(default = false)]
    pub start_paused: bool,
    #[builder(default = false)]
    pub fancy_colors: bool,
    pub font_path: Option<PathBuf>,
}

impl Default for MechanismConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The animated mechanism: simulation state, its tick timer and the
/// appearance used to paint it.
pub struct Mechanism {
    config: MechanismConfig,
    sim: Simulation,
    ticker: Ticker,
    font: Option<Font<'static>>,
    describing: bool,
}

impl Mechanism {
    pub fn new(config: MechanismConfig) -> Self {
        let mut sim = Simulation::new();
        sim.set_speed_preset(config.speed);
        sim.set_fancy_colors(config.fancy_colors);
        let ticker = Ticker::new(sim.interval());
        Self {
            config,
            sim,
            ticker,
            font: None,
            describing: false,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn set_font(&mut self, font: Option<Font<'static>>) {
        self.font = font;
    }

    /// Applies a shell request at time `now`.
    pub fn apply(&mut self, action: Action, now: Instant) -> Response {
        match action {
            Action::Start => {
                self.sim.start();
                self.ticker.start(now);
                info!("animation started");
            }
            Action::Pause => {
                self.sim.pause();
                self.ticker.pause();
                info!("animation paused");
            }
            Action::ToggleRunning => {
                let next = if self.sim.is_running() {
                    Action::Pause
                } else {
                    Action::Start
                };
                return self.apply(next, now);
            }
            Action::Reset => {
                self.ticker.pause();
                self.sim.reset();
                self.ticker.set_interval(self.sim.interval(), now);
                self.sim.start();
                self.ticker.start(now);
                info!("animation reset");
                return Response {
                    redraw: true,
                    exit: false,
                };
            }
            Action::SetSpeed(level) => {
                if self.sim.set_speed(level) {
                    self.ticker.set_interval(self.sim.interval(), now);
                    info!(
                        "speed set to {:?} ({} ms per tick)",
                        self.sim.speed(),
                        self.sim.speed().interval_ms()
                    );
                } else {
                    debug!("ignoring unknown speed level {level}");
                }
            }
            Action::ToggleFancyColors => {
                self.sim.toggle_fancy_colors();
                debug!("fancy colours {}", if self.sim.fancy_colors() { "on" } else { "off" });
                return Response {
                    redraw: true,
                    exit: false,
                };
            }
            Action::Describe(held) => {
                // a release without a matching press leaves the palette alone
                if held == self.describing {
                    return Response::default();
                }
                self.describing = held;
                self.sim.toggle_fancy_colors();
                if held {
                    for indicator in Indicator::ALL {
                        info!("{indicator}: {}", indicator.color_name());
                    }
                }
                return Response {
                    redraw: true,
                    exit: false,
                };
            }
            Action::Exit => {
                return Response {
                    redraw: false,
                    exit: true,
                };
            }
        }
        Response::default()
    }

    /// Advances the simulation if the tick deadline has passed. Returns
    /// whether a redraw is needed.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.sim.is_running() && self.ticker.poll(now) {
            self.sim.tick();
            true
        } else {
            false
        }
    }

    /// Paints the current state into an RGBA frame of the given size.
    pub fn paint(&self, frame: &mut [u8], width: u32, height: u32) {
        let viewport = compute_viewport(width, height);
        let scene = render(&self.sim, &viewport, &self.config.render);
        let mut canvas = Canvas::new(frame, width as usize, height as usize);
        scene.paint(&mut canvas, self.font.as_ref());
    }

    /// Opens the window and runs until it is closed.
    pub fn show(mut self) -> Result<()> {
        let font = resolve_font(self.config.font_path.as_deref())?;
        self.set_font(font);
        self.run_window()
    }

    fn run_window(mut self) -> Result<()> {
        let window_config = self.config.window.clone();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&window_config.title)
            .with_inner_size(LogicalSize::new(
                window_config.width as f64,
                window_config.height as f64,
            ))
            .with_resizable(true)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width;
        let mut fb_height = size.height;
        let (surface_width, surface_height) = surface_size(size);
        let surface_texture = SurfaceTexture::new(surface_width, surface_height, &window);
        let mut pixels = Pixels::new(surface_width, surface_height, surface_texture)?;
        info!(
            "window {}x{} created ({:?} speed)",
            fb_width,
            fb_height,
            self.sim.speed()
        );

        if !self.config.start_paused {
            self.apply(Action::Start, Instant::now());
        }

        event_loop.run(move |event, window_target| {
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width;
                        fb_height = new_size.height;
                        debug!("resized to {fb_width}x{fb_height}");
                        if fb_width > 0 && fb_height > 0 {
                            if let Err(err) = pixels.resize_buffer(fb_width, fb_height) {
                                warn!("failed to resize pixel buffer: {err}");
                            }
                            if let Err(err) = pixels.resize_surface(fb_width, fb_height) {
                                warn!("failed to resize surface: {err}");
                            }
                        }
                        window_clone.request_redraw();
                    }
                    WindowEvent::RedrawRequested => {
                        if fb_width == 0 || fb_height == 0 {
                            return;
                        }
                        self.paint(pixels.frame_mut(), fb_width, fb_height);
                        if let Err(err) = pixels.render() {
                            warn!("failed to present frame: {err}");
                        }
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button,
                        ..
                    } => {
                        if let Some(action) = action_for_mouse(button) {
                            let response = self.apply(action, Instant::now());
                            if response.redraw {
                                window_clone.request_redraw();
                            }
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let Some(action) =
                            action_for_key(&event.logical_key, event.state, event.repeat)
                        {
                            let response = self.apply(action, Instant::now());
                            if response.exit {
                                window_target.exit();
                            } else if response.redraw {
                                window_clone.request_redraw();
                            }
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if self.update(Instant::now()) {
                        window_clone.request_redraw();
                    }
                    match self.ticker.deadline() {
                        Some(deadline) => {
                            window_target.set_control_flow(ControlFlow::WaitUntil(deadline))
                        }
                        None => window_target.set_control_flow(ControlFlow::Wait),
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// A window created minimised may report a zero inner size, which `pixels`
/// refuses; the first `Resized` event brings the surface up to size.
fn surface_size(size: PhysicalSize<u32>) -> (u32, u32) {
    (size.width.max(1), size.height.max(1))
}

// ============================================================================
// INPUT MAPPING
// ============================================================================

/// Left or right click starts/pauses, middle click resets.
pub fn action_for_mouse(button: MouseButton) -> Option<Action> {
    match button {
        MouseButton::Left | MouseButton::Right => Some(Action::ToggleRunning),
        MouseButton::Middle => Some(Action::Reset),
        _ => None,
    }
}

/// Keyboard equivalents of the menu actions.
///
/// Holding `D` shows the descriptive colours for as long as the key is down.
pub fn action_for_key(key: &Key, state: ElementState, repeat: bool) -> Option<Action> {
    if repeat {
        return None;
    }
    if let Key::Character(c) = key {
        if c.eq_ignore_ascii_case("d") {
            return Some(Action::Describe(state == ElementState::Pressed));
        }
    }
    if state != ElementState::Pressed {
        return None;
    }
    match key {
        Key::Named(NamedKey::Space) => Some(Action::ToggleRunning),
        Key::Named(NamedKey::Escape) => Some(Action::Exit),
        Key::Character(c) => match c.to_ascii_lowercase().as_str() {
            "r" => Some(Action::Reset),
            "f" => Some(Action::ToggleFancyColors),
            "1" => Some(Action::SetSpeed(0)),
            "2" => Some(Action::SetSpeed(1)),
            "3" => Some(Action::SetSpeed(2)),
            "q" => Some(Action::Exit),
            _ => None,
        },
        _ => None,
    }
}
