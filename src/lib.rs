// ============================================================================
// CRATE CONFIGURATION & MODULES
// ============================================================================

//! Animated front and rear dials of the Antikythera Mechanism.
//!
//! [`Simulation`] advances seven indicators on every tick, [`render`] turns
//! the state into a [`Scene`] of draw commands fitted to the window, and
//! [`Mechanism`] drives both from a winit window backed by `pixels`.

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod indicator;
pub mod scene;
pub mod simulation;
pub mod timer;
pub mod viewport;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use app::{action_for_key, action_for_mouse, Action, Mechanism, MechanismConfig, Response};
pub use canvas::Canvas;
pub use config::{platform_font_scale, Color, RenderConfig, WindowConfig};
pub use error::{Error, Result};
pub use indicator::Indicator;
pub use scene::{needle_endpoint, render, DialLayout, DrawCommand, Point, Scene};
pub use simulation::{Simulation, Speed};
pub use timer::Ticker;
pub use viewport::{compute_viewport, Viewport};
