use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActivityLevel {
    Active,
    Standby,
    Asleep,
}

#[derive(Debug, Clone)]
pub struct ActivityClock {
    pub standby_timeout: Duration,
    pub sleep_timeout: Duration,
    last_interaction: Duration,
    standby: bool,
    asleep: bool,
}

impl ActivityClock {
    pub fn new(now: Duration, standby_timeout: Duration, sleep_timeout: Duration) -> Self {
        Self {
            standby_timeout,
            sleep_timeout,
            last_interaction: now,
            standby: false,
            asleep: false,
        }
    }

    pub fn level(&self) -> ActivityLevel {
        if self.asleep {
            ActivityLevel::Asleep
        } else if self.standby {
            ActivityLevel::Standby
        } else {
            ActivityLevel::Active
        }
    }

    pub fn is_standby(&self) -> bool {
        self.standby
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    pub fn last_interaction(&self) -> Duration {
        self.last_interaction
    }

    // Records an interaction. Sleep is left alone: only `wake` leaves it.
    pub fn touch(&mut self, now: Duration) {
        self.last_interaction = now;
        if !self.asleep {
            self.standby = false;
        }
    }

    pub fn wake(&mut self) {
        self.standby = false;
        self.asleep = false;
    }

    pub fn should_enter_standby(&self, now: Duration) -> bool {
        !self.standby && self.idle_for(now) >= self.standby_timeout
    }

    pub fn should_enter_sleep(&self, now: Duration) -> bool {
        !self.asleep && self.idle_for(now) >= self.sleep_timeout
    }

    pub fn mark_standby(&mut self) {
        self.standby = true;
    }

    pub fn mark_asleep(&mut self) {
        self.standby = true;
        self.asleep = true;
    }

    #[inline]
    fn idle_for(&self, now: Duration) -> Duration {
        // A clock that went backwards counts as no idle time at all
        now.checked_sub(self.last_interaction)
            .unwrap_or_else(|| Duration::from_millis(0))
    }
}
