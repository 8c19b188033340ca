use bon::Builder;

/// RGB colour used by every draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const ORANGE: Color = Color::new(0xff, 0x80, 0x00);
    pub const GOLD: Color = Color::new(0xff, 0xb9, 0x0f);
    pub const GRAY: Color = Color::new(0x80, 0x80, 0x80);
    pub const MEDIUM_BLUE: Color = Color::new(0x00, 0x00, 0xcd);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const PURPLE: Color = Color::new(0x8b, 0x1c, 0x62);
    pub const DARK_GREEN: Color = Color::new(0x00, 0x64, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// RENDER CONFIGURATION
// ============================================================================

/// Fixed appearance of the mechanism drawing.
///
/// Geometry is not configurable here; it always derives from the viewport
/// grid. Only palette, stroke widths and label sizing are.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct RenderConfig {
    /// Label size as a fraction of one grid cell's width.
    #[builder(default = LINUX_FONT_SCALE)]
    pub font_scale: f32,
    #[builder(default = 1.8)]
    pub plain_stroke_width: f32,
    #[builder(default = 2.5)]
    pub fancy_stroke_width: f32,

    #[builder(default = Color::WHITE)]
    pub background_color: Color,
    #[builder(default = Color::WHITE)]
    pub viewport_color: Color,
    #[builder(default = Color::BLACK)]
    pub text_color: Color,
    #[builder(default = Color::BLACK)]
    pub frame_color: Color,
    #[builder(default = Color::WHITE)]
    pub dial_color: Color,
    #[builder(default = Color::ORANGE)]
    pub sub_dial_color: Color,
    #[builder(default = Color::BLACK)]
    pub plain_needle_color: Color,

    #[builder(default = "Front side".to_string())]
    pub front_label: String,
    #[builder(default = "Rear side".to_string())]
    pub rear_label: String,
}

/// Label scale that looks right with FreeType-style hinting (GTK desktops).
pub const LINUX_FONT_SCALE: f32 = 0.2;
/// Label scale for other desktops.
pub const DEFAULT_FONT_SCALE: f32 = 0.23;

/// Picks the label scale for the platform the binary was built for.
pub fn platform_font_scale() -> f32 {
    if cfg!(target_os = "linux") {
        LINUX_FONT_SCALE
    } else {
        DEFAULT_FONT_SCALE
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// WINDOW CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct WindowConfig {
    #[builder(default = "Antikythera Mechanism Simulation".to_string())]
    pub title: String,
    #[builder(default = 500)]
    pub width: u32,
    #[builder(default = 350)]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
