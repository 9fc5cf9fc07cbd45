use crate::transcript::{Block, Transcript};
use log::{info, warn};
use serde::Serialize;

/// A scheduled restore. The host fires `restore(id)` after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestoreTicket {
    pub id: u32,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Normal,
    /// Input is disabled until the matching restore fires.
    Crashed { pending: Option<u32> },
}

/// Consecutive-failure tally and the crash/restore ritual it drives.
#[derive(Debug, Clone)]
pub struct Escalation {
    failures: u32,
    threshold: u32,
    phase: Phase,
    next_id: u32,
}

impl Escalation {
    pub fn new(threshold: u32) -> Self {
        Escalation {
            failures: 0,
            threshold: threshold.max(1),
            phase: Phase::Normal,
            next_id: 1,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Crashed { .. })
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// Counts one failure. True once the threshold is reached.
    pub fn fail(&mut self) -> bool {
        self.failures += 1;
        self.failures >= self.threshold
    }

    /// Enters the crashed phase and appends the crash notice. A trigger
    /// while a restore is already pending supersedes it: only the newest
    /// ticket will restore.
    pub fn trigger(&mut self, transcript: &mut Transcript, delay_ms: u32) -> RestoreTicket {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if let Phase::Crashed { pending: Some(old) } = self.phase {
            warn!("escalation re-triggered, superseding restore #{}", old);
        }
        self.phase = Phase::Crashed { pending: Some(id) };
        transcript.push(Block::Crash);
        warn!(
            "escalation after {} failures, restore #{} in {}ms",
            self.failures, id, delay_ms
        );
        RestoreTicket { id, delay_ms }
    }

    /// Second phase. Stale or cancelled tickets do nothing.
    pub fn restore(&mut self, id: u32, transcript: &mut Transcript) -> bool {
        match self.phase {
            Phase::Crashed { pending: Some(p) } if p == id => {
                transcript.replace(Block::Restored);
                self.failures = 0;
                self.phase = Phase::Normal;
                info!("session restored (#{})", id);
                true
            }
            _ => false,
        }
    }

    /// Drops the pending restore. Input stays locked.
    pub fn cancel(&mut self) -> Option<u32> {
        match self.phase {
            Phase::Crashed { pending } => {
                self.phase = Phase::Crashed { pending: None };
                pending
            }
            Phase::Normal => None,
        }
    }
}
