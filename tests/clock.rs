//! Unit tests for round scheduling. All instants are fixed unix seconds, so
//! nothing here depends on the wall clock.

use chrono::{DateTime, Utc};
use roshambo_server::game::clock::RoundClock;

fn clock() -> RoundClock {
    RoundClock {
        cutover_secs: 18_000, // midnight US-Eastern
        round_secs: 86_400,
        buffer_secs: 3_600,
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

// 2024-02-10 00:00 Eastern
const START: i64 = 1_707_541_200;

#[test]
fn first_round() {
    // 06:30 the same day
    assert_eq!(clock().current_round(at(START), at(1_707_564_600)), 0);
}

#[test]
fn many_rounds() {
    // noon on day 12
    assert_eq!(clock().current_round(at(START), at(1_708_534_800)), 11);
}

#[test]
fn before_start() {
    // 23:30 the night before
    assert_eq!(clock().current_round(at(START), at(1_707_539_400)), -1);
}

#[test]
fn offset_start_aligns_forward() {
    // nominal start 18:00 Eastern the previous day snaps to midnight
    let raw = at(1_707_519_600);
    assert_eq!(clock().tournament_start(raw), at(START));
    assert_eq!(clock().current_round(raw, at(1_707_564_600)), 0);
    // 20:00 on day 1 is still round 0
    assert_eq!(clock().current_round(raw, at(1_707_613_200)), 0);
}

#[test]
fn offset_start_still_counts_as_not_started() {
    let raw = at(1_707_519_600);
    let curr = at(1_707_539_400);
    // curr is after the nominal start but before the aligned one
    assert!(raw < curr);
    assert_eq!(clock().current_round(raw, curr), -1);
}

#[test]
fn aligned_start_is_a_fixed_point() {
    let aligned = clock().tournament_start(at(START));
    assert_eq!(aligned, at(START));
    assert_eq!(clock().tournament_start(aligned), aligned);
}

#[test]
fn round_end_boundaries() {
    let c = clock();
    assert_eq!(c.round_end(at(START), 0), at(START + 86_400));
    assert_eq!(c.round_end(at(START), 3), at(START + 4 * 86_400));
    // negative rounds clamp to round 0's end
    assert_eq!(c.round_end(at(START), -1), at(START + 86_400));
}

#[test]
fn buffer_window_edges() {
    let c = clock();
    let end = START + 86_400;
    assert!(!c.in_buffer(at(START), 0, at(end - 3_601)));
    assert!(c.in_buffer(at(START), 0, at(end - 3_600)));
    assert!(c.in_buffer(at(START), 0, at(end - 1)));
    // the round's end belongs to the next round
    assert!(!c.in_buffer(at(START), 0, at(end)));
}
