//! Tick driver and input adapter.
//!
//! The grid has no notion of time or pausing. A [`TickDriver`] decides when
//! a generation is due, and a [`Session`] translates input events into grid
//! and driver calls.

use std::time::{Duration, Instant};

use super::{Grid, GridError};
use crate::schema::{ConfigError, SimulationConfig};

/// Fixed-interval driver that advances a grid while running.
///
/// Time is passed in explicitly so callers (and tests) control the clock.
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Duration,
    running: bool,
    last_tick: Option<Instant>,
    parallel: bool,
}

impl TickDriver {
    /// Create a stopped driver.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            last_tick: None,
            parallel: false,
        }
    }

    /// Create a driver from configuration, started at `now` unless configured paused.
    pub fn from_config(config: &SimulationConfig, now: Instant) -> Self {
        let mut driver = Self::new(config.tick_interval());
        driver.parallel = config.parallel;
        if !config.start_paused {
            driver.start(now);
        }
        driver
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume ticking. The first generation runs immediately on the next poll.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_tick = now.checked_sub(self.interval);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip between running and paused. Returns the new running state.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
        log::info!("{}", if self.running { "Resumed" } else { "Paused" });
        self.running
    }

    /// Advance `grid` one generation if running and a full interval has
    /// elapsed since the previous tick. Returns whether a generation ran.
    ///
    /// Missed intervals are not replayed; the next delay is measured from
    /// this tick.
    pub fn poll(&mut self, grid: &mut Grid, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let due = match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if !due {
            return false;
        }

        if self.parallel {
            grid.advance_parallel();
        } else {
            grid.advance();
        }
        self.last_tick = Some(now);
        true
    }

    /// Time left until the next generation is due, or `None` while paused.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        Some(match self.last_tick {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }
}

/// Raw input, already resolved to grid coordinates by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer held over a cell.
    Paint { x: i64, y: i64 },
    TogglePause,
    /// Stop ticking and kill every cell.
    Clear,
    Quit,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A grid together with the driver that ticks it.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    driver: TickDriver,
}

impl Session {
    /// Validate `config`, then build its grid and driver.
    pub fn new(config: &SimulationConfig, now: Instant) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::from_config(config)?,
            driver: TickDriver::from_config(config, now),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Result<Control, GridError> {
        match event {
            InputEvent::Paint { x, y } => self.grid.set_alive(x, y)?,
            InputEvent::TogglePause => {
                self.driver.toggle_pause(now);
            }
            InputEvent::Clear => {
                self.driver.stop();
                self.grid.reset();
            }
            InputEvent::Quit => return Ok(Control::Quit),
        }
        Ok(Control::Continue)
    }

    /// Poll the driver against the grid.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.driver.poll(&mut self.grid, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::CellState;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn blinker_grid() -> Grid {
        let mut grid = Grid::new(5, 5).unwrap();
        for x in 1..=3 {
            grid.set_alive(x, 2).unwrap();
        }
        grid
    }

    #[test]
    fn test_paused_driver_never_ticks() {
        let mut grid = blinker_grid();
        let mut driver = TickDriver::new(INTERVAL);
        let t0 = Instant::now();

        assert!(!driver.is_running());
        assert!(!driver.poll(&mut grid, t0 + INTERVAL * 10));
        assert_eq!(grid.generation(), 0);
        assert_eq!(driver.time_until_next(t0), None);
    }

    #[test]
    fn test_ticks_once_per_interval() {
        let mut grid = blinker_grid();
        let mut driver = TickDriver::new(INTERVAL);
        let t0 = Instant::now();
        driver.start(t0);

        // First generation is due as soon as the driver starts
        assert!(driver.poll(&mut grid, t0));
        assert!(!driver.poll(&mut grid, t0 + INTERVAL / 2));
        assert_eq!(driver.time_until_next(t0 + INTERVAL / 2), Some(INTERVAL / 2));
        assert!(driver.poll(&mut grid, t0 + INTERVAL));
        assert_eq!(grid.generation(), 2);

        // A long stall yields a single generation, not a burst
        assert!(driver.poll(&mut grid, t0 + INTERVAL * 10));
        assert!(!driver.poll(&mut grid, t0 + INTERVAL * 10));
        assert_eq!(grid.generation(), 3);
    }

    #[test]
    fn test_toggle_pause_leaves_grid_untouched() {
        let mut grid = blinker_grid();
        let before = grid.alive_mask();
        let mut driver = TickDriver::new(INTERVAL);
        let t0 = Instant::now();

        assert!(driver.toggle_pause(t0));
        assert!(!driver.toggle_pause(t0));
        assert_eq!(grid.alive_mask(), before);
        assert!(!driver.poll(&mut grid, t0 + INTERVAL));
    }

    #[test]
    fn test_parallel_driver() {
        let config = SimulationConfig {
            width: 5,
            height: 5,
            start_paused: false,
            parallel: true,
            ..Default::default()
        };
        let t0 = Instant::now();
        let mut driver = TickDriver::from_config(&config, t0);
        let mut grid = blinker_grid();
        let mut expected = grid.clone();
        expected.advance();

        assert!(driver.is_running());
        assert_eq!(driver.interval(), Duration::from_millis(100));
        assert!(driver.poll(&mut grid, t0));
        assert_eq!(grid.alive_mask(), expected.alive_mask());
    }

    #[test]
    fn test_session_events() {
        let config = SimulationConfig {
            width: 6,
            height: 6,
            ..Default::default()
        };
        let t0 = Instant::now();
        let mut session = Session::new(&config, t0).unwrap();
        assert!(!session.driver().is_running());

        for x in 1..=3 {
            let control = session.handle(InputEvent::Paint { x, y: 2 }, t0).unwrap();
            assert_eq!(control, Control::Continue);
        }
        assert_eq!(session.grid().get_cell(2, 2).unwrap().state, CellState::Alive);

        // Paused sessions do not tick
        assert!(!session.tick(t0));

        session.handle(InputEvent::TogglePause, t0).unwrap();
        assert!(session.tick(t0));
        assert_eq!(session.grid().alive_count(), 3);
        assert_eq!(session.grid().get_cell(2, 1).unwrap().state, CellState::Alive);

        session.handle(InputEvent::Clear, t0).unwrap();
        assert!(!session.driver().is_running());
        assert_eq!(session.grid().alive_count(), 0);
        assert!(!session.tick(t0 + INTERVAL));

        assert_eq!(session.handle(InputEvent::Quit, t0).unwrap(), Control::Quit);
    }

    #[test]
    fn test_session_paint_out_of_bounds() {
        let config = SimulationConfig {
            width: 4,
            height: 4,
            ..Default::default()
        };
        let t0 = Instant::now();
        let mut session = Session::new(&config, t0).unwrap();
        let err = session
            .handle(InputEvent::Paint { x: 4, y: 0 }, t0)
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { x: 4, y: 0, .. }));
    }

    #[test]
    fn test_session_rejects_zero_size() {
        let config = SimulationConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(&config, Instant::now()),
            Err(ConfigError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn test_session_rejects_zero_interval() {
        let config = SimulationConfig {
            width: 4,
            height: 4,
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(&config, Instant::now()),
            Err(ConfigError::InvalidTickInterval)
        ));
    }
}
