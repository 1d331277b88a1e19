//! Elapsed solving time.
//!
//! The timer does not read a clock. The host reports elapsed wall time with
//! [`Timer::advance`], which only counts while the timer runs. A locked timer
//! (set once the puzzle is complete) ignores every further change.

/// Accumulating, pausable timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    elapsed: u32,
    running: bool,
    locked: bool,
}

impl Timer {
    /// A stopped timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and run.
    pub fn start(&mut self) {
        if !self.locked {
            self.elapsed = 0;
            self.running = true;
        }
    }

    /// Stop counting, keeping the elapsed time.
    pub fn pause(&mut self) {
        if !self.locked {
            self.running = false;
        }
    }

    /// Continue counting from the current value.
    pub fn resume(&mut self) {
        if !self.locked {
            self.running = true;
        }
    }

    /// Stop and reset to zero.
    pub fn stop(&mut self) {
        if !self.locked {
            self.elapsed = 0;
            self.running = false;
        }
    }

    /// Overwrite the elapsed time.
    pub fn set(&mut self, seconds: u32) {
        if !self.locked {
            self.elapsed = seconds;
        }
    }

    /// Add wall time; ignored unless running.
    pub fn advance(&mut self, seconds: u32) {
        if self.running && !self.locked {
            self.elapsed = self.elapsed.saturating_add(seconds);
        }
    }

    /// Pause and freeze.
    pub fn lock(&mut self) {
        self.running = false;
        self.locked = true;
    }

    /// Elapsed seconds.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// True while counting.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True once frozen.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Elapsed time as `H:MM:SS`, hours right-aligned to two columns.
    pub fn format_hms(&self) -> String {
        let hours = self.elapsed / 3600;
        let minutes = self.elapsed % 3600 / 60;
        let seconds = self.elapsed % 60;
        format!("{:>2}:{:02}:{:02}", hours, minutes, seconds)
    }
}
