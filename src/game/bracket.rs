//! Pure single-elimination bracket combinatorics.
//!
//! Entrant counts need not be a power of two: the field is padded up to the
//! smallest containing power-of-two bracket and the phantom opponents become
//! byes at round 0.

use crate::game::error::GameError;

/// Number of rounds in the smallest power-of-two bracket holding `total`
/// entrants, i.e. `ceil(log2(total))`.
pub fn total_rounds(total: i64) -> Result<u32, GameError> {
    if total < 2 {
        return Err(GameError::EntrantCount(total));
    }
    Ok((total as u64).next_power_of_two().trailing_zeros())
}

/// Bracket width at a round, floored to 1 once the bracket is exhausted.
pub fn round_size(total: i64, round: i32) -> Result<i64, GameError> {
    if round < 0 {
        return Err(GameError::Round(round));
    }
    let rounds = total_rounds(total)? as i32;
    if round >= rounds {
        return Ok(1);
    }
    Ok(1i64 << (rounds - round))
}

/// Bracket slot a participant occupies at a round (0-indexed).
///
/// Seeding folds the field so seed 1 meets seed N, seed 2 meets seed N-1,
/// and the same fold is re-applied over the halved bracket once per elapsed
/// round, propagating a participant's identity to its eventual slot.
pub fn match_slot(total: i64, round: i32, fid: i64) -> Result<i32, GameError> {
    if round < 0 {
        return Err(GameError::Round(round));
    }
    if fid < 1 || fid > total {
        return Err(GameError::Participant { fid, total });
    }
    let size = round_size(total, 0)?;
    let mut slot = (fid - 1).min(size - fid);
    for r in 1..=round {
        let size = round_size(total, r)?;
        slot = slot.min(size - 1 - slot);
    }
    Ok(slot as i32)
}

/// Round-0 pairing at a slot under the seeding fold: seed `slot + 1`
/// against its mirror in the padded bracket. A mirror beyond the real
/// field is the phantom id 0, a bye.
pub fn seed_users(total: i64, slot: i32) -> Result<(i64, i64), GameError> {
    let size = round_size(total, 0)?;
    if slot < 0 || (slot as i64) >= size / 2 {
        return Err(GameError::Slot { round: 0, slot });
    }
    let user0 = slot as i64 + 1;
    let opponent = size - slot as i64;
    let user1 = if opponent > total { 0 } else { opponent };
    Ok((user0, user1))
}

/// The two slots in the previous round whose winners feed `slot`.
pub fn parent_slots(total: i64, round: i32, slot: i32) -> Result<(i32, i32), GameError> {
    if round < 1 {
        return Err(GameError::Round(round));
    }
    let size = round_size(total, round)?;
    if slot < 0 || (slot as i64) >= size / 2 {
        return Err(GameError::Slot { round, slot });
    }
    Ok((slot, (size - 1 - slot as i64) as i32))
}

/// Players still alive at a round, given how many of its matches have
/// settled (each settled match eliminates exactly one player).
pub fn remaining_users(total: i64, round: i32, settled: i64) -> Result<i64, GameError> {
    Ok(round_size(total, round)?.min(total) - settled)
}
