use crate::events;
use crate::storage::*;
use crate::types::{CloseReason, Phase};
use soroban_sdk::{log, Env, Vec};

/// Outcome of walking the phase list from the stored cursor.
pub struct Resolution {
    /// First live phase, or the phase count when none is live.
    pub index: u32,
    /// Phases found expired but not yet marked closed, in order.
    pub expired: Vec<u32>,
}

impl Resolution {
    pub fn is_open(&self, env: &Env) -> bool {
        self.index < get_phase_count(env)
    }
}

/// Find the active phase as of `now` without writing anything.
pub fn resolve(env: &Env, now: u64) -> Resolution {
    let count = get_phase_count(env);
    let mut index = get_current_phase(env);
    let mut expired = Vec::new(env);

    while index < count {
        let phase = match get_phase(env, index) {
            Some(phase) => phase,
            None => break,
        };
        if phase.is_live(now) {
            break;
        }
        if !phase.closed && phase.is_expired(now) {
            expired.push_back(index);
        }
        index += 1;
    }

    Resolution { index, expired }
}

/// Persist a resolution: close expired phases and move the cursor forward.
///
/// Supply is never touched here, so applying the same resolution twice is a no-op.
pub fn apply(env: &Env, resolution: &Resolution) {
    for index in resolution.expired.iter() {
        if let Some(mut phase) = get_phase(env, index) {
            if phase.closed {
                continue;
            }
            phase.closed = true;
            set_phase(env, index, &phase);
            log!(env, "phase expired", index);
            events::emit_phase_closed(env, index, CloseReason::Expired);
        }
    }

    if resolution.index > get_current_phase(env) {
        set_current_phase(env, resolution.index);
    }
}

/// Index of the first phase after `from` that is still open with supply left.
pub fn next_with_supply(env: &Env, from: u32) -> u32 {
    let count = get_phase_count(env);
    let mut index = from + 1;
    while index < count {
        if let Some(phase) = get_phase(env, index) {
            if !phase.closed && phase.remaining > 0 {
                return index;
            }
        }
        index += 1;
    }
    count
}

/// Phase as observed at `now`: expiry shows up as `closed` even before it is persisted.
pub fn observed(phase: Phase, now: u64) -> Phase {
    let closed = phase.closed || phase.is_expired(now);
    Phase { closed, ..phase }
}
