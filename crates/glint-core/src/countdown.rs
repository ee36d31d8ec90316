//! Countdown arithmetic and the running/expired state machine.

use tracing::info;

/// Milliseconds in one second.
pub const MS_PER_SECOND: i64 = 1000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the target, split into calendar-free units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    /// Whole days. Unbounded.
    pub days: i64,
    /// Hours within the day (0-23).
    pub hours: i64,
    /// Minutes within the hour (0-59).
    pub minutes: i64,
    /// Seconds within the minute (0-59).
    pub seconds: i64,
}

impl Remaining {
    /// Decompose a millisecond span. Negative spans decompose to zero.
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

/// The four text fields shown by the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownDisplay {
    /// All fields set to `"00"`.
    pub fn zeros() -> Self {
        Self::from(Remaining::default())
    }

    /// Fields in display order: days, hours, minutes, seconds.
    pub fn fields(&self) -> [&str; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }
}

impl From<Remaining> for CountdownDisplay {
    fn from(r: Remaining) -> Self {
        // Minimum width only; a three-digit day count stays three digits.
        Self {
            days: format!("{:02}", r.days),
            hours: format!("{:02}", r.hours),
            minutes: format!("{:02}", r.minutes),
            seconds: format!("{:02}", r.seconds),
        }
    }
}

/// Countdown lifecycle. `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

/// Outcome of a single [`CountdownTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Display refreshed with the new remaining time.
    Updated,
    /// The target was reached on this tick; display is all zeros.
    Expired,
    /// The timer had already stopped; nothing changed.
    Stopped,
}

/// Counts down to a fixed absolute timestamp, once per tick.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    target_ms: i64,
    state: CountdownState,
    display: CountdownDisplay,
}

impl CountdownTimer {
    /// Create a timer for `target_ms` and run the first tick immediately.
    pub fn start(target_ms: i64, now_ms: i64) -> Self {
        let mut timer = Self {
            target_ms,
            state: CountdownState::Running,
            display: CountdownDisplay::zeros(),
        };
        timer.tick(now_ms);
        timer
    }

    /// Recompute the display for `now_ms`.
    pub fn tick(&mut self, now_ms: i64) -> Tick {
        if self.state == CountdownState::Expired {
            return Tick::Stopped;
        }

        let distance = self.target_ms.saturating_sub(now_ms);
        if distance <= 0 {
            self.stop();
            self.display = CountdownDisplay::zeros();
            return Tick::Expired;
        }

        self.display = Remaining::from_millis(distance).into();
        Tick::Updated
    }

    /// Stop ticking. Returns `true` only on the call that performs the transition.
    pub fn stop(&mut self) -> bool {
        if self.state == CountdownState::Expired {
            return false;
        }
        self.state = CountdownState::Expired;
        info!(target_ms = self.target_ms, "countdown expired");
        true
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    pub fn display(&self) -> &CountdownDisplay {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_one_of_each() {
        let r = Remaining::from_millis(90_061_000);
        assert_eq!(
            r,
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        let display = CountdownDisplay::from(r);
        assert_eq!(display.fields(), ["01", "01", "01", "01"]);
    }

    #[test]
    fn test_decompose_drops_sub_second_remainder() {
        let r = Remaining::from_millis(59_999);
        assert_eq!(r.minutes, 0);
        assert_eq!(r.seconds, 59);
    }

    #[test]
    fn test_days_are_not_truncated() {
        let display = CountdownDisplay::from(Remaining::from_millis(123 * MS_PER_DAY));
        assert_eq!(display.days, "123");
        assert_eq!(display.hours, "00");
    }

    #[test]
    fn test_running_tick_updates_display() {
        let now = 1_700_000_000_000;
        let mut timer = CountdownTimer::start(now + 2 * MS_PER_DAY + 12 * MS_PER_HOUR, now);
        assert!(timer.is_running());
        assert_eq!(timer.display().fields(), ["02", "12", "00", "00"]);

        assert_eq!(timer.tick(now + MS_PER_SECOND), Tick::Updated);
        assert_eq!(timer.display().fields(), ["02", "11", "59", "59"]);
    }

    #[test]
    fn test_past_target_expires_and_stops() {
        let now = 1_700_000_000_000;
        let mut timer = CountdownTimer::start(now + 5 * MS_PER_SECOND, now);
        assert_eq!(timer.display().seconds, "05");

        // Jump past the target: zeros, then no further ticks.
        assert_eq!(timer.tick(now + 10 * MS_PER_SECOND), Tick::Expired);
        assert_eq!(timer.display().fields(), ["00", "00", "00", "00"]);
        assert_eq!(timer.state(), CountdownState::Expired);

        assert_eq!(timer.tick(now + 11 * MS_PER_SECOND), Tick::Stopped);
        assert_eq!(timer.tick(now - MS_PER_DAY), Tick::Stopped);
        assert_eq!(timer.display(), &CountdownDisplay::zeros());
    }

    #[test]
    fn test_target_already_past_on_start() {
        let now = 1_700_000_000_000;
        let mut timer = CountdownTimer::start(now - MS_PER_HOUR, now);
        assert!(!timer.is_running());
        assert_eq!(timer.display(), &CountdownDisplay::zeros());
        assert_eq!(timer.tick(now), Tick::Stopped);
    }

    #[test]
    fn test_reaching_target_exactly_expires() {
        let now = 1_700_000_000_000;
        let mut timer = CountdownTimer::start(now + MS_PER_SECOND, now);
        assert_eq!(timer.tick(now + MS_PER_SECOND), Tick::Expired);
    }

    #[test]
    fn test_extreme_stored_target_expires() {
        let timer = CountdownTimer::start(i64::MIN, 1_700_000_000_000);
        assert_eq!(timer.state(), CountdownState::Expired);
        assert_eq!(timer.display(), &CountdownDisplay::zeros());

        let mut timer = CountdownTimer::start(-10, -20);
        assert!(timer.is_running());
        assert_eq!(timer.tick(i64::MAX), Tick::Expired);
        assert_eq!(timer.display(), &CountdownDisplay::zeros());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = CountdownTimer::start(i64::MAX, 0);
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
    }
}
