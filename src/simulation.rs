use std::time::Duration;

use crate::indicator::Indicator;

/// Tick interval presets. Values are milliseconds between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Maps a speed selector (0, 1, 2) to a preset.
    pub const fn from_level(level: i32) -> Option<Speed> {
        match level {
            0 => Some(Speed::Slow),
            1 => Some(Speed::Normal),
            2 => Some(Speed::Fast),
            _ => None,
        }
    }

    pub const fn interval_ms(self) -> u64 {
        match self {
            Speed::Slow => 9 * 5,
            Speed::Normal => 3 * 5,
            Speed::Fast => 5,
        }
    }

    pub const fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }
}

/// Animation state of the mechanism.
///
/// Each indicator keeps an integer tick counter that wraps modulo its
/// cycle length; angles are derived from it on demand so they never drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    counters: [u64; Indicator::COUNT],
    fancy_colors: bool,
    speed: Speed,
    running: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Creates a paused simulation at the initial mechanism setting.
    pub fn new() -> Self {
        Self {
            counters: Self::initial_counters(),
            fancy_colors: false,
            speed: Speed::Normal,
            running: false,
        }
    }

    fn initial_counters() -> [u64; Indicator::COUNT] {
        Indicator::ALL.map(Indicator::initial_counter)
    }

    // ------------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------------

    /// Advances every indicator by one step.
    pub fn tick(&mut self) {
        for indicator in Indicator::ALL {
            let counter = &mut self.counters[indicator.index()];
            *counter = (*counter + 1) % indicator.wrap_multiplier();
        }
    }

    /// Restores the initial setting and Normal speed.
    pub fn reset(&mut self) {
        self.counters = Self::initial_counters();
        self.speed = Speed::Normal;
    }

    /// Selects a speed preset by level. Returns `false` and changes nothing
    /// for levels outside 0..=2.
    pub fn set_speed(&mut self, level: i32) -> bool {
        match Speed::from_level(level) {
            Some(speed) => {
                self.speed = speed;
                true
            }
            None => false,
        }
    }

    pub fn set_speed_preset(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn toggle_fancy_colors(&mut self) {
        self.fancy_colors = !self.fancy_colors;
    }

    pub fn set_fancy_colors(&mut self, fancy: bool) {
        self.fancy_colors = fancy;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Flips between running and paused, returning the new running state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn counter(&self, indicator: Indicator) -> u64 {
        self.counters[indicator.index()]
    }

    /// Current angle of an indicator in degrees.
    pub fn angle(&self, indicator: Indicator) -> f64 {
        indicator.ratio() * self.counter(indicator) as f64
    }

    /// Sun angle in whole degrees, always in 0..360.
    pub fn sun_angle(&self) -> u16 {
        // counter < 360 by construction
        self.counter(Indicator::Sun) as u16
    }

    /// All angles in `Indicator::ALL` order.
    pub fn angles(&self) -> [f64; Indicator::COUNT] {
        Indicator::ALL.map(|indicator| self.angle(indicator))
    }

    pub fn fancy_colors(&self) -> bool {
        self.fancy_colors
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn interval(&self) -> Duration {
        self.speed.interval()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed() -> Simulation {
        let mut sim = Simulation::new();
        sim.counters = [0; Indicator::COUNT];
        sim
    }

    #[test]
    fn initial_angles_match_mechanism_setting() {
        let sim = Simulation::new();
        assert_eq!(sim.sun_angle(), 270);
        assert_eq!(sim.angle(Indicator::Sun), 270.0);
        assert_eq!(sim.angle(Indicator::Moon), 0.0);
        assert_eq!(sim.angle(Indicator::Metonic), 684.0 * 0.263);
        assert_eq!(sim.angle(Indicator::Saros), 0.0);
        assert_eq!(sim.angle(Indicator::Callippic), 18182.0 * 0.0132);
        assert_eq!(sim.angle(Indicator::Olympiad), 270.0);
        assert_eq!(sim.angle(Indicator::Exeligmos), 1666.0 * 0.018);
    }

    #[test]
    fn tick_advances_by_ratio() {
        let mut sim = zeroed();
        sim.tick();
        for indicator in Indicator::ALL {
            assert_eq!(sim.angle(indicator), indicator.ratio());
        }
    }

    #[test]
    fn sun_wraps_from_359_to_zero() {
        let mut sim = Simulation::new();
        for _ in 0..89 {
            sim.tick();
        }
        assert_eq!(sim.sun_angle(), 359);
        sim.tick();
        assert_eq!(sim.sun_angle(), 0);
    }

    #[test]
    fn short_cycles_return_to_zero() {
        for indicator in [
            Indicator::Sun,
            Indicator::Moon,
            Indicator::Metonic,
            Indicator::Olympiad,
        ] {
            let mut sim = zeroed();
            for step in 1..indicator.wrap_multiplier() {
                sim.tick();
                assert_eq!(sim.counter(indicator), step);
                assert!(sim.angle(indicator) < indicator.wrap_threshold());
            }
            sim.tick();
            assert_eq!(sim.angle(indicator), 0.0, "{indicator} did not wrap");
        }
    }

    #[test]
    fn reset_restores_angles_and_normal_speed() {
        let mut sim = Simulation::new();
        let initial = sim.angles();
        sim.set_speed(2);
        for _ in 0..1234 {
            sim.tick();
        }
        assert_ne!(sim.angles(), initial);

        sim.reset();
        assert_eq!(sim.angles(), initial);
        assert_eq!(sim.speed(), Speed::Normal);
    }

    #[test]
    fn reset_keeps_running_and_colour_flags() {
        let mut sim = Simulation::new();
        sim.start();
        sim.toggle_fancy_colors();
        sim.reset();
        assert!(sim.is_running());
        assert!(sim.fancy_colors());
    }

    #[test]
    fn speed_levels_map_to_intervals() {
        let mut sim = Simulation::new();
        assert!(sim.set_speed(0));
        assert_eq!(sim.interval(), Duration::from_millis(45));
        assert!(sim.set_speed(2));
        assert_eq!(sim.interval(), Duration::from_millis(5));
        assert!(sim.set_speed(1));
        assert_eq!(sim.interval(), Duration::from_millis(15));
    }

    #[test]
    fn unknown_speed_level_is_ignored() {
        let mut sim = Simulation::new();
        sim.set_speed(0);
        for level in [-1, 3, 42, i32::MIN, i32::MAX] {
            assert!(!sim.set_speed(level));
            assert_eq!(sim.speed(), Speed::Slow);
        }
    }

    #[test]
    fn toggles_flip_flags() {
        let mut sim = Simulation::new();
        assert!(!sim.is_running());
        assert!(sim.toggle_running());
        assert!(!sim.toggle_running());

        assert!(!sim.fancy_colors());
        sim.toggle_fancy_colors();
        assert!(sim.fancy_colors());
        sim.toggle_fancy_colors();
        assert!(!sim.fancy_colors());
    }

    #[test]
    fn tick_leaves_flags_alone() {
        let mut sim = Simulation::new();
        sim.set_speed(0);
        let before = (sim.speed(), sim.fancy_colors(), sim.is_running());
        sim.tick();
        assert_eq!((sim.speed(), sim.fancy_colors(), sim.is_running()), before);
    }
}
