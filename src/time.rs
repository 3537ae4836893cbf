//! Game clock: fixed-timestep ticks plus a restartable repeating interval.
//!
//! `draw_web()` fires at roughly display refresh rate with a variable delta.
//! [`GameTime`] turns wall-clock timestamps into whole ticks so everything
//! downstream (auto-accrual, label expiry, flashes) is counted in ticks and
//! can be tested without a browser.

/// Game ticks per real-time second.
pub const TICKS_PER_SEC: u32 = 10;

/// Longest frame delta honoured, in milliseconds. A backgrounded tab comes
/// back with one short burst instead of minutes of catch-up.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds carried over that did not fill a whole tick.
    carry_ms: f64,
    last_ms: Option<f64>,
    /// Clamped wall-clock length of the last frame.
    frame_ms: f64,
    pub total_ticks: u64,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            carry_ms: 0.0,
            last_ms: None,
            frame_ms: 0.0,
            total_ticks: 0,
        }
    }

    /// Feed a frame timestamp (ms, e.g. `performance.now()`). Returns the
    /// number of whole ticks that elapsed since the previous frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = self
            .last_ms
            .map(|prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS))
            .unwrap_or(0.0);
        self.last_ms = Some(now_ms);
        self.frame_ms = delta;

        self.carry_ms += delta;
        let ticks = (self.carry_ms / self.ms_per_tick) as u32;
        self.carry_ms -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Real milliseconds since the previous frame, for effects that animate
    /// every frame rather than every tick.
    pub fn frame_ms(&self) -> u32 {
        self.frame_ms.round() as u32
    }
}

/// A repeating timer counted in ticks. Fires once per `period` while running.
#[derive(Clone, Debug)]
pub struct Interval {
    period: u32,
    elapsed: u32,
    running: bool,
}

impl Interval {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
            running: false,
        }
    }

    /// Start from a fresh period. No effect if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed = 0;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `delta_ticks`; returns how many times the interval fired.
    pub fn advance(&mut self, delta_ticks: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += delta_ticks;
        let fires = self.elapsed / self.period;
        self.elapsed %= self.period;
        fires
    }
}
