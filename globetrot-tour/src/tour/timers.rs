//! Timer bookkeeping for the tour engine.
//!
//! The engine owns at most one pending timer per [`TimerKind`]. Every arm
//! bumps a generation counter and the host hands the [`TimerTicket`] back when
//! the timer fires; a ticket that no longer matches its slot is stale and is
//! dropped instead of acting on outdated state.
use std::time::Duration;

use super::TourPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Drives phase-to-phase transitions, including auto-start.
    Cycle,
    /// Resumes the tour after the visitor stops interacting.
    Idle,
}

/// Proof of a scheduled timer, returned to the engine when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub kind: TimerKind,
    pub generation: u64,
    /// Phase the engine was in when the timer was armed.
    pub expected_phase: TourPhase,
}

/// Host-side timer facility: a browser `setTimeout`, a virtual clock, etc.
pub trait Scheduler {
    /// Deliver `ticket` back to the engine after `delay`.
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration);

    /// Drop any pending timer of `kind`.
    fn cancel(&mut self, kind: TimerKind);
}

#[derive(Debug, Default)]
pub(crate) struct TimerSlots {
    generation: u64,
    cycle: Option<TimerTicket>,
    idle: Option<TimerTicket>,
}

impl TimerSlots {
    const fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<TimerTicket> {
        match kind {
            TimerKind::Cycle => &mut self.cycle,
            TimerKind::Idle => &mut self.idle,
        }
    }

    /// Record a fresh ticket for `kind`, replacing any previous one.
    pub(crate) fn arm(&mut self, kind: TimerKind, expected_phase: TourPhase) -> TimerTicket {
        self.generation += 1;
        let ticket = TimerTicket {
            kind,
            generation: self.generation,
            expected_phase,
        };
        *self.slot_mut(kind) = Some(ticket);
        ticket
    }

    /// Forget the pending ticket of `kind`. Returns whether one was armed.
    pub(crate) fn disarm(&mut self, kind: TimerKind) -> bool {
        self.slot_mut(kind).take().is_some()
    }

    /// Consume the slot if `ticket` is the one currently armed.
    pub(crate) fn claim(&mut self, ticket: TimerTicket) -> bool {
        let slot = self.slot_mut(ticket.kind);
        if *slot == Some(ticket) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub(crate) const fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Cycle => self.cycle.is_some(),
            TimerKind::Idle => self.idle.is_some(),
        }
    }
}
