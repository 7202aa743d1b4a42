//! Candidate desirability.
//!
//! Scores are relative weights, not damage numbers: the selector squares
//! them, so only their ratios matter. Missing reference data degrades to
//! neutral factors rather than failing.

use roboko_dex::{Dex, Species};
use roboko_types::{PokemonType, Position, Request, Slot};

use crate::candidate::{Action, Candidate};
use crate::config::ScoringConfig;
use crate::tracker::Tracker;

/// Scores candidates against one prompt and the current tracked state.
pub struct Scorer<'a, D: Dex> {
    dex: &'a D,
    tracker: &'a Tracker,
    request: &'a Request,
    config: &'a ScoringConfig,
}

impl<'a, D: Dex> Scorer<'a, D> {
    /// Bind a scorer to the inputs of one decision cycle.
    pub const fn new(
        dex: &'a D,
        tracker: &'a Tracker,
        request: &'a Request,
        config: &'a ScoringConfig,
    ) -> Self {
        Self { dex, tracker, request, config }
    }

    /// Score every candidate in place.
    pub fn score_all(&self, candidates: &mut [Candidate]) {
        for candidate in candidates {
            candidate.score = self.score(candidate);
        }
    }

    /// Desirability of one candidate.
    pub fn score(&self, candidate: &Candidate) -> f64 {
        match &candidate.action {
            Action::Move { actor, move_name, target, .. } => self.score_move(*actor, move_name, *target),
            Action::Switch { roster_slot, .. } => self.score_switch(*roster_slot),
            Action::Team { .. } | Action::Pass => 1.0,
        }
    }

    /// Best per-recipient damage estimate for a move. Recipients are the
    /// aimed slot, or every occupied opponent slot for untargeted moves.
    fn score_move(&self, actor: Slot, move_name: &str, target: Option<Slot>) -> f64 {
        let Some(data) = self.dex.move_data(move_name).filter(|m| m.is_damaging()) else {
            return self.config.status_move_score;
        };

        let base_power = match data.base_power {
            0 => self.config.fallback_base_power,
            bp => bp,
        };
        let attacker = self.species_for_slot(actor);
        let stab = match attacker {
            Some(species) if species.has_type(data.move_type) => self.config.stab_multiplier,
            _ => 1.0,
        };

        let recipients: Vec<Slot> = match target {
            Some(slot) => vec![slot],
            None => self.tracker.occupied_opponents().collect(),
        };

        let per_recipient = |defender: Option<&Species>| {
            let ratio = match (attacker, defender) {
                (Some(a), Some(d)) => {
                    let offense = a.base_stats.offense(data.category).unwrap_or(1);
                    let defense = d.base_stats.defense(data.defensive_category()).unwrap_or(1).max(1);
                    f64::from(offense) / f64::from(defense)
                }
                _ => 1.0,
            };
            let effectiveness = defender.map_or(1.0, |d| self.type_product(data.move_type, &d.types));
            f64::from(base_power) * ratio * stab * effectiveness / 100.0
        };

        if recipients.is_empty() {
            return per_recipient(None);
        }
        recipients
            .into_iter()
            .map(|slot| per_recipient(self.species_for_slot(slot)))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Matchup product over every opponent identity revealed so far with a
    /// known species, scaled down by the switch divisor.
    fn score_switch(&self, roster_slot: usize) -> f64 {
        let divisor = self.config.switch_divisor;
        let incoming = self
            .request
            .member(roster_slot.saturating_sub(1))
            .and_then(|m| self.dex.species(m.species()));
        let Some(incoming) = incoming else {
            return 1.0 / divisor;
        };

        let product: f64 = self
            .tracker
            .opponent_species()
            .filter_map(|name| self.dex.species(name))
            .map(|opponent| {
                let ours = self.best_type_against(&incoming.types, &opponent.types);
                let theirs = self.best_type_against(&opponent.types, &incoming.types);
                ours * theirs
            })
            .product();
        product / divisor
    }

    /// Species standing in `slot`: the tracked binding first, then (for our
    /// own slots) the roster entry at the same index.
    fn species_for_slot(&self, slot: Slot) -> Option<&'a Species> {
        let tracked = self.tracker.species_at(slot).and_then(|name| self.dex.species(name));
        if tracked.is_some() || !slot.is_mine() {
            return tracked;
        }
        let index = match slot.position() {
            Position::Front => 0,
            Position::Back => 1,
        };
        self.request
            .member(index)
            .and_then(|m| self.dex.species(m.species()))
    }

    fn type_product(&self, attacking: PokemonType, defending: &[PokemonType]) -> f64 {
        defending
            .iter()
            .map(|&d| self.dex.effectiveness(attacking, d).multiplier())
            .product()
    }

    /// Best effectiveness any single attacking type achieves against the
    /// full defending type list.
    fn best_type_against(&self, attacking: &[PokemonType], defending: &[PokemonType]) -> f64 {
        attacking
            .iter()
            .map(|&t| self.type_product(t, defending))
            .fold(0.0, f64::max)
    }
}
