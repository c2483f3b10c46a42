use std::time::Duration;

use fieldconfig::SpawnConfig;

/// Decides when transient entities are added while a field runs.
///
/// Driven by the frame clock's elapsed time, so a paused or throttled host
/// does not queue up spawns. At most one periodic spawn is released per
/// frame even if several intervals passed since the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    initial: u32,
    stagger: Duration,
    interval: Duration,
    cap: Option<usize>,
    released_initial: u32,
    next_periodic: Duration,
}

impl Spawner {
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            initial: config.initial,
            stagger: config.stagger,
            interval: config.interval,
            cap: config.cap,
            released_initial: 0,
            next_periodic: config.interval,
        }
    }

    pub fn reset(&mut self) {
        self.released_initial = 0;
        self.next_periodic = self.interval;
    }

    /// Number of entities to add at `elapsed`, given `live` entities alive.
    pub fn due(&mut self, elapsed: Duration, live: usize) -> usize {
        let mut due = 0usize;

        let released = self.initial_released_by(elapsed);
        if released > self.released_initial {
            due += (released - self.released_initial) as usize;
            self.released_initial = released;
        }

        if !self.interval.is_zero() && self.next_periodic <= elapsed {
            self.skip_past(elapsed);
            due += 1;
        }

        match self.cap {
            Some(cap) => due.min(cap.saturating_sub(live)),
            None => due,
        }
    }

    /// Number of staggered initial spawns whose start time is at or before
    /// `elapsed`.
    fn initial_released_by(&self, elapsed: Duration) -> u32 {
        if self.stagger.is_zero() {
            return self.initial;
        }
        let slots = elapsed.as_nanos() / self.stagger.as_nanos() + 1;
        u32::try_from(slots).map_or(self.initial, |slots| slots.min(self.initial))
    }

    /// Moves the next periodic deadline to the first interval boundary
    /// after `elapsed`, however many boundaries were missed.
    fn skip_past(&mut self, elapsed: Duration) {
        let interval = self.interval.as_nanos();
        let behind = elapsed.saturating_sub(self.next_periodic).as_nanos();
        let advance = interval.saturating_mul(behind / interval + 1);
        let next = self.next_periodic.as_nanos().saturating_add(advance);
        self.next_periodic = u64::try_from(next)
            .map(Duration::from_nanos)
            .unwrap_or(Duration::MAX);
    }
}
