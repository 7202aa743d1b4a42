//! Legal candidate generation.
//!
//! Candidates are produced per slot from the current prompt and the tracked
//! positions. Every candidate is a command the rules engine will accept;
//! desirability is assigned later by [`crate::scoring`].

use roboko_types::{Choice, MoveOption, Request, RosterMember, Slot, TargetClass};
use tracing::warn;

use crate::tracker::Tracker;

/// What a candidate would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Use a move.
    Move {
        /// Our slot using the move.
        actor: Slot,
        /// 1-based move slot in the prompt.
        move_slot: usize,
        /// Move name as given in the prompt.
        move_name: String,
        /// Aimed slot, or `None` for untargeted use.
        target: Option<Slot>,
    },
    /// Switch a bench member in.
    Switch {
        /// Our slot being refilled or vacated.
        actor: Slot,
        /// 1-based roster position of the incoming member.
        roster_slot: usize,
    },
    /// Team order at preview.
    Team {
        /// 1-based roster positions in lead order.
        order: Vec<usize>,
    },
    /// Do nothing.
    Pass,
}

/// A legal action with its desirability.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The action.
    pub action: Action,
    /// Desirability assigned by the scoring engine.
    pub score: f64,
}

impl Candidate {
    /// Unscored candidate.
    pub const fn new(action: Action) -> Self {
        Self { action, score: 0.0 }
    }

    /// Wire command for this candidate.
    pub fn choice(&self) -> Choice {
        match &self.action {
            Action::Move { move_slot, target, .. } => Choice::Move {
                slot: *move_slot,
                target: *target,
            },
            Action::Switch { roster_slot, .. } => Choice::Switch { slot: *roster_slot },
            Action::Team { order } => Choice::Team { order: order.clone() },
            Action::Pass => Choice::Pass,
        }
    }

    /// Roster position claimed by this candidate, if it is a switch.
    pub const fn claimed_roster_slot(&self) -> Option<usize> {
        match &self.action {
            Action::Switch { roster_slot, .. } => Some(*roster_slot),
            _ => None,
        }
    }
}

/// Counters surfaced for diagnosing tracker drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Single-foe moves emitted untargeted because no opponent slot was
    /// known to be occupied.
    pub untargeted_fallbacks: u64,
}

/// Candidates for one legal move used from `actor`.
///
/// Single-foe moves expand to one candidate per occupied opponent slot. If
/// the tracker believes no opponent is on the field, a single untargeted
/// candidate is emitted instead so the move stays available.
pub fn move_candidates(
    tracker: &Tracker,
    actor: Slot,
    move_slot: usize,
    option: &MoveOption,
    diagnostics: &mut Diagnostics,
) -> Vec<Candidate> {
    let make = |target: Option<Slot>| {
        Candidate::new(Action::Move {
            actor,
            move_slot,
            move_name: option.name.clone(),
            target,
        })
    };

    match option.target.class() {
        TargetClass::FoeSingle => {
            let targeted: Vec<Candidate> = tracker.occupied_opponents().map(|s| make(Some(s))).collect();
            if targeted.is_empty() {
                diagnostics.untargeted_fallbacks = diagnostics.untargeted_fallbacks.saturating_add(1);
                warn!(
                    actor = %actor,
                    move_name = option.name,
                    "no opponent slot known occupied, using untargeted fallback"
                );
                vec![make(None)]
            } else {
                targeted
            }
        }
        TargetClass::Ally => vec![make(Some(actor.partner()))],
        TargetClass::AllyOrSelf => vec![make(Some(actor)), make(Some(actor.partner()))],
        TargetClass::Untargeted => vec![make(None)],
    }
}

/// Usable moves for an active slot, paired with their 1-based move slot.
///
/// Disabled moves are skipped. Ally-only moves are dropped when there is no
/// living partner, unless nothing else is left.
pub fn usable_moves(moves: &[MoveOption], has_ally: bool) -> Vec<(usize, &MoveOption)> {
    let enabled: Vec<(usize, &MoveOption)> = moves
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.disabled)
        .map(|(i, m)| (i.saturating_add(1), m))
        .collect();

    if has_ally {
        return enabled;
    }
    let filtered: Vec<(usize, &MoveOption)> = enabled
        .iter()
        .copied()
        .filter(|(_, m)| m.target.class() != TargetClass::Ally)
        .collect();
    if filtered.is_empty() { enabled } else { filtered }
}

/// Switch candidates during a move turn: bench members that are not on the
/// field, not fainted, and not already claimed this cycle.
pub fn switch_candidates(request: &Request, actor: Slot, claimed: &[usize]) -> Vec<Candidate> {
    bench(request, actor, claimed, |_, member| member.active)
}

/// Switch candidates for a forced replacement. The first `active_count`
/// roster positions are the field and never eligible.
pub fn forced_switch_candidates(
    request: &Request,
    actor: Slot,
    active_count: usize,
    claimed: &[usize],
) -> Vec<Candidate> {
    bench(request, actor, claimed, |position, _| position <= active_count)
}

/// The single roster-order candidate for team preview.
pub fn team_preview_candidate(request: &Request) -> Candidate {
    let size = match request.side.pokemon.len() {
        0 => 6,
        n => n,
    };
    Candidate::new(Action::Team { order: (1..=size).collect() })
}

fn bench(
    request: &Request,
    actor: Slot,
    claimed: &[usize],
    on_field: impl Fn(usize, &RosterMember) -> bool,
) -> Vec<Candidate> {
    request
        .side
        .pokemon
        .iter()
        .enumerate()
        .map(|(i, member)| (i.saturating_add(1), member))
        .filter(|&(position, member)| {
            !on_field(position, member) && !member.is_fainted() && !claimed.contains(&position)
        })
        .map(|(position, _)| {
            Candidate::new(Action::Switch {
                actor,
                roster_slot: position,
            })
        })
        .collect()
}
