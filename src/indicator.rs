use crate::config::Color;

/// One rotating needle of the mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Sun,
    Moon,
    Metonic,
    Saros,
    Callippic,
    Olympiad,
    Exeligmos,
}

impl Indicator {
    /// All indicators, in the order they are stored and drawn.
    pub const ALL: [Indicator; 7] = [
        Indicator::Sun,
        Indicator::Moon,
        Indicator::Metonic,
        Indicator::Saros,
        Indicator::Callippic,
        Indicator::Olympiad,
        Indicator::Exeligmos,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Degrees advanced per tick, relative to the Sun's 1°/tick.
    pub const fn ratio(self) -> f64 {
        match self {
            Indicator::Sun => 1.0,
            Indicator::Moon => 13.368,
            Indicator::Metonic => 0.263,
            Indicator::Saros => 0.222,
            Indicator::Callippic => 0.0132,
            Indicator::Olympiad => 0.25,
            Indicator::Exeligmos => 0.018,
        }
    }

    /// Number of ticks in one full cycle of this indicator.
    pub const fn wrap_multiplier(self) -> u64 {
        match self {
            Indicator::Sun => 360,
            Indicator::Moon => 1156,
            Indicator::Metonic => 1367,
            Indicator::Saros => 119_998,
            Indicator::Callippic => 599_998,
            Indicator::Olympiad => 1439,
            Indicator::Exeligmos => 59_998,
        }
    }

    /// Angle at which the indicator wraps back to zero.
    pub fn wrap_threshold(self) -> f64 {
        self.ratio() * self.wrap_multiplier() as f64
    }

    /// Tick count the mechanism is set to on startup and reset.
    pub const fn initial_counter(self) -> u64 {
        match self {
            Indicator::Sun => 270,
            Indicator::Moon => 0,
            Indicator::Metonic => 684,
            Indicator::Saros => 0,
            Indicator::Callippic => 18_182,
            // 1080 × 0.25 = 270°
            Indicator::Olympiad => 1080,
            Indicator::Exeligmos => 1666,
        }
    }

    /// Needle colour when fancy colours are on.
    pub const fn fancy_color(self) -> Color {
        match self {
            Indicator::Sun => Color::GOLD,
            Indicator::Moon => Color::GRAY,
            Indicator::Metonic => Color::MEDIUM_BLUE,
            Indicator::Saros => Color::RED,
            Indicator::Callippic => Color::PURPLE,
            Indicator::Olympiad => Color::DARK_GREEN,
            Indicator::Exeligmos => Color::BLACK,
        }
    }

    /// Name of the fancy colour, for the colour legend.
    pub const fn color_name(self) -> &'static str {
        match self {
            Indicator::Sun => "gold",
            Indicator::Moon => "gray",
            Indicator::Metonic => "blue",
            Indicator::Saros => "red",
            Indicator::Callippic => "purple",
            Indicator::Olympiad => "dark green",
            Indicator::Exeligmos => "black",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Indicator::Sun => "Sun",
            Indicator::Moon => "Moon",
            Indicator::Metonic => "Metonic cycle",
            Indicator::Saros => "Saros",
            Indicator::Callippic => "Callippic cycle",
            Indicator::Olympiad => "Olympiad",
            Indicator::Exeligmos => "Exeligmos",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
