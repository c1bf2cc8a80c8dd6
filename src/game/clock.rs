//! Round scheduling: tournaments advance one round per fixed wall-clock
//! period, with all round boundaries snapped to a daily cutover so every
//! tournament ticks over at the same time of day.
//!
//! The clock never reads the system time; callers pass `now` in, keeping
//! every function deterministic.

use chrono::{DateTime, Utc};

use crate::config;

const DAY_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy)]
pub struct RoundClock {
    /// Seconds past UTC midnight that round boundaries snap to.
    pub cutover_secs: i64,
    /// Wall-clock length of one round.
    pub round_secs: i64,
    /// Reserved window before a round's end during which no fresh turn may
    /// open (a turn started there could never resolve before settlement).
    pub buffer_secs: i64,
}

impl RoundClock {
    pub fn from_settings() -> Self {
        let s = config::settings();
        RoundClock {
            cutover_secs: s.cutover_secs,
            round_secs: s.round_secs,
            buffer_secs: s.buffer_secs,
        }
    }

    /// Rounds a nominal start instant forward to the next daily cutover.
    /// An already-aligned instant is returned unchanged.
    pub fn tournament_start(&self, raw: DateTime<Utc>) -> DateTime<Utc> {
        let t = raw.timestamp();
        let delta = (self.cutover_secs - t).rem_euclid(DAY_SECS);
        ts(t + delta)
    }

    /// 0-indexed round at `now`, or -1 if the tournament has not started.
    /// The start instant is aligned before comparison, so a `now` between
    /// the nominal and aligned starts still reads as "not started".
    pub fn current_round(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
        let start = self.tournament_start(start).timestamp();
        let now = now.timestamp();
        if now < start {
            return -1;
        }
        ((now - start) / self.round_secs) as i32
    }

    /// Instant at which the given round ends. Defined for `round < 0` by
    /// clamping to round 0's end.
    pub fn round_end(&self, start: DateTime<Utc>, round: i32) -> DateTime<Utc> {
        let start = self.tournament_start(start).timestamp();
        let round = round.max(0) as i64;
        ts(start + (round + 1) * self.round_secs)
    }

    /// True while `now` sits inside the reserved window just before the
    /// round's end.
    pub fn in_buffer(&self, start: DateTime<Utc>, round: i32, now: DateTime<Utc>) -> bool {
        let end = self.round_end(start, round).timestamp();
        let now = now.timestamp();
        now >= end - self.buffer_secs && now < end
    }
}

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}
