//! Winner selection and the wheel's resting angle.
//!
//! Every participant, active or not, owns an equal slice of `360 / N`
//! degrees in list order. Slice `i` spans `[i * 360 / N, (i + 1) * 360 / N)`
//! measured from the pointer. The returned angle, taken modulo 360, is where
//! the pointer comes to rest, always strictly inside the winner's slice.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

use crate::error::{Result, WheelError};
use crate::wheel::{Participant, SpinResult};

pub const MIN_FULL_ROTATIONS: u32 = 5;
pub const MAX_FULL_ROTATIONS: u32 = 8;

/// Fraction of a slice kept clear on each side of the landing point.
const SLICE_MARGIN: f64 = 0.1;

/// Draw a winner with `OsRng`.
pub fn select_winner(participants: &[Participant]) -> Result<SpinResult> {
    select_winner_with(participants, &mut OsRng)
}

/// Draw uniformly among the active participants. Inactive entries are
/// never picked but still occupy their slice.
pub fn select_winner_with<R>(participants: &[Participant], rng: &mut R) -> Result<SpinResult>
where
    R: Rng + CryptoRng + ?Sized,
{
    let active: Vec<usize> = participants
        .iter()
        .enumerate()
        .filter(|(_, p)| p.active)
        .map(|(slot, _)| slot)
        .collect();

    if active.is_empty() {
        return Err(WheelError::NoActiveParticipants);
    }

    let slot = active[rng.gen_range(0..active.len())];
    let angle = resting_angle(slot, participants.len(), rng);

    Ok(SpinResult {
        participant: participants[slot].clone(),
        angle,
        slot,
    })
}

/// Angular bounds `(start, end)` of `slot` out of `total` slices.
pub fn slice_bounds(slot: usize, total: usize) -> (f64, f64) {
    let width = 360.0 / total as f64;
    (slot as f64 * width, (slot + 1) as f64 * width)
}

/// Final rotation for landing on `slot`: a random number of full turns plus
/// a random point well inside the slice.
pub fn resting_angle<R>(slot: usize, total: usize, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    let (start, end) = slice_bounds(slot, total);
    let width = end - start;

    let rotations = rng.gen_range(MIN_FULL_ROTATIONS..=MAX_FULL_ROTATIONS);
    let offset = rng.gen_range(SLICE_MARGIN..(1.0 - SLICE_MARGIN)) * width;

    f64::from(rotations) * 360.0 + start + offset
}
