//! Positional state tracker.
//!
//! Two tables are kept:
//!
//! - a fixed four-entry slot table (slot → identity), set by entry events
//!   and cleared only by faint events;
//! - a (side, identity) → species map that is created on first reveal, may
//!   be rebound by transform or forme changes, and is never deleted. Fainted
//!   identities keep their species so a later reappearance is still
//!   recognized. Nicknames are only unique per side, so the side is part of
//!   the key.

use std::collections::BTreeMap;

use roboko_types::{Identity, Position, Side, Slot};
use tracing::debug;

use crate::error::AgentError;
use crate::protocol::{BattleEvent, Subject};

/// Slot and species bindings for one agent's view of the battle.
#[derive(Debug, Clone)]
pub struct Tracker {
    side: Side,
    slots: [Option<Identity>; 4],
    species: BTreeMap<(Side, Identity), String>,
}

impl Tracker {
    /// Empty tracker for an agent playing `side`.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            slots: Default::default(),
            species: BTreeMap::new(),
        }
    }

    /// The agent's own side.
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Parse a side+position token (`p2a`, `p1b`, or a bare `p2`, which
    /// means front) into a slot relative to the agent's side. Positions
    /// other than `a` and `b` have no slot here.
    pub fn parse_slot(&self, place: &str) -> Option<Slot> {
        let side = Side::from_prefix(place)?;
        let position = match place.get(2..)? {
            "" | "a" => Position::Front,
            "b" => Position::Back,
            _ => return None,
        };
        Some(Slot::new(side == self.side, position))
    }

    /// Which player a slot belongs to.
    pub const fn side_of(&self, slot: Slot) -> Side {
        if slot.is_mine() { self.side } else { self.side.opponent() }
    }

    /// Apply one parsed event. Returns `true` if any binding changed.
    pub fn apply(&mut self, event: &BattleEvent<'_>) -> bool {
        match event {
            BattleEvent::Entry { subject, species } => {
                let Some(slot) = self.parse_slot(subject.place) else {
                    return false;
                };
                let identity = Identity::new(subject.identity);
                if !species.is_empty() {
                    self.bind_species(self.side_of(slot), &identity, species);
                }
                debug!(slot = %slot, identity = %identity, species, "entry");
                self.set_slot(slot, Some(identity));
                true
            }
            BattleEvent::DetailsChange { subject, species } if !species.is_empty() => {
                let Some(side) = Side::from_prefix(subject.place) else {
                    return false;
                };
                self.bind_species(side, &Identity::new(subject.identity), species);
                true
            }
            BattleEvent::Faint { subject } => {
                let Some(slot) = self.parse_slot(subject.place) else {
                    return false;
                };
                debug!(slot = %slot, identity = subject.identity, "faint");
                self.set_slot(slot, None);
                true
            }
            BattleEvent::Transform { subject, target } => self.apply_transform(subject, target),
            BattleEvent::Swap { subject, position } => self.apply_swap(subject, *position),
            _ => false,
        }
    }

    /// Identity currently in `slot`.
    pub fn identity_at(&self, slot: Slot) -> Option<&Identity> {
        self.slots.get(slot.index()).and_then(Option::as_ref)
    }

    /// Last-known species of `identity` on `side`.
    pub fn species_of(&self, side: Side, identity: &Identity) -> Option<&str> {
        self.species
            .get(&(side, identity.clone()))
            .map(String::as_str)
    }

    /// Species of whoever stands in `slot`.
    pub fn species_at(&self, slot: Slot) -> Option<&str> {
        self.identity_at(slot)
            .and_then(|id| self.species_of(self.side_of(slot), id))
    }

    /// Last-known species of every opponent identity revealed so far,
    /// whether on the field, benched, or fainted.
    pub fn opponent_species(&self) -> impl Iterator<Item = &str> + '_ {
        let opponent = self.side.opponent();
        self.species
            .iter()
            .filter(move |((side, _), _)| *side == opponent)
            .map(|(_, species)| species.as_str())
    }

    /// Whether `slot` has an occupant.
    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.identity_at(slot).is_some()
    }

    /// Reverse lookup: which of `side`'s slots holds `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownIdentity`] if no slot holds it, which
    /// means the tracker has fallen out of sync with the stream.
    pub fn slot_of(&self, side: Side, identity: &Identity) -> Result<Slot, AgentError> {
        Slot::ALL
            .into_iter()
            .filter(|&slot| self.side_of(slot) == side)
            .find(|&slot| self.identity_at(slot) == Some(identity))
            .ok_or_else(|| AgentError::UnknownIdentity { identity: identity.clone() })
    }

    /// Opponent slots that currently have an occupant, front first.
    pub fn occupied_opponents(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::OPPONENT.into_iter().filter(|&slot| self.is_occupied(slot))
    }

    fn set_slot(&mut self, slot: Slot, identity: Option<Identity>) {
        if let Some(entry) = self.slots.get_mut(slot.index()) {
            *entry = identity;
        }
    }

    fn bind_species(&mut self, side: Side, identity: &Identity, species: &str) {
        self.species.insert((side, identity.clone()), species.to_owned());
    }

    fn apply_transform(&mut self, subject: &Subject<'_>, target: &Subject<'_>) -> bool {
        let (Some(actor_side), Some(target_side)) =
            (Side::from_prefix(subject.place), Side::from_prefix(target.place))
        else {
            return false;
        };
        let target_id = Identity::new(target.identity);
        let Some(copied) = self.species_of(target_side, &target_id).map(str::to_owned) else {
            debug!(target = %target_id, "transform target has no known species");
            return false;
        };
        let actor = Identity::new(subject.identity);
        debug!(actor = %actor, species = %copied, "transform");
        self.bind_species(actor_side, &actor, &copied);
        true
    }

    fn apply_swap(&mut self, subject: &Subject<'_>, position: Position) -> bool {
        let Some(from) = self.parse_slot(subject.place) else {
            return false;
        };
        let to = Slot::new(from.is_mine(), position);
        if from == to {
            return false;
        }
        let moved = self.identity_at(from).cloned();
        let displaced = self.identity_at(to).cloned();
        self.set_slot(to, moved);
        self.set_slot(from, displaced);
        true
    }
}

impl core::fmt::Display for Tracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "side={} [", self.side)?;
        for (i, slot) in Slot::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.identity_at(slot) {
                Some(id) => write!(f, "{slot}={id}({})", self.species_at(slot).unwrap_or("?"))?,
                None => write!(f, "{slot}=empty")?,
            }
        }
        write!(f, "] known_species={}", self.species.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protocol::{Line, parse_line};

    fn feed(tracker: &mut Tracker, line: &str) -> bool {
        match parse_line(line) {
            Some(Line::Event(record)) => tracker.apply(&record.event()),
            _ => false,
        }
    }

    #[test]
    fn parse_slot_is_relative_to_own_side() {
        let p1 = Tracker::new(Side::P1);
        assert_eq!(p1.parse_slot("p1a"), Some(Slot::MineFront));
        assert_eq!(p1.parse_slot("p1b"), Some(Slot::MineBack));
        assert_eq!(p1.parse_slot("p2a"), Some(Slot::OppFront));
        assert_eq!(p1.parse_slot("p2b"), Some(Slot::OppBack));
        assert_eq!(p1.parse_slot("p2"), Some(Slot::OppFront));
        assert_eq!(p1.parse_slot("p1c"), None);
        assert_eq!(p1.parse_slot("p2ab"), None);

        let p2 = Tracker::new(Side::P2);
        assert_eq!(p2.parse_slot("p1a"), Some(Slot::OppFront));
        assert_eq!(p2.parse_slot("p2b"), Some(Slot::MineBack));
        assert_eq!(p2.parse_slot("xx"), None);
    }

    #[test]
    fn entry_binds_slot_and_species() {
        let mut t = Tracker::new(Side::P1);
        assert!(feed(&mut t, "|switch|p2a: Chomp|Garchomp, L50, M|100/100"));
        assert_eq!(t.species_at(Slot::OppFront), Some("Garchomp"));
        assert_eq!(t.identity_at(Slot::OppFront), Some(&Identity::from("Chomp")));

        // A replacement in the same slot overwrites the binding.
        assert!(feed(&mut t, "|drag|p2a: Wash|Rotom-Wash, L50|157/157"));
        assert_eq!(t.species_at(Slot::OppFront), Some("Rotom-Wash"));
    }

    #[test]
    fn faint_clears_only_that_slot() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: Gardevoir|Gardevoir, L50, F|48/48");
        feed(&mut t, "|switch|p1b: Ferro|Ferrothorn, L50, F|48/48");
        feed(&mut t, "|switch|p2a: Rotom|Rotom-Wash, L50|157/157");

        assert!(feed(&mut t, "|faint|p1a: Gardevoir"));
        assert!(!t.is_occupied(Slot::MineFront));
        assert!(t.is_occupied(Slot::MineBack));
        assert!(t.is_occupied(Slot::OppFront));
        assert_eq!(t.species_of(Side::P1, &Identity::from("Gardevoir")), Some("Gardevoir"));
        assert_eq!(t.species_at(Slot::MineFront), None);
    }

    #[test]
    fn transform_copies_target_species_without_touching_target() {
        let mut t = Tracker::new(Side::P2);
        feed(&mut t, "|switch|p2a: Smeargle|Smeargle, L50|100/100");
        feed(&mut t, "|switch|p1b: Arcanine|Arcanine, L50|100/100");
        assert!(feed(&mut t, "|-transform|p2a: Smeargle|p1b: Arcanine"));
        assert_eq!(t.species_of(Side::P2, &Identity::from("Smeargle")), Some("Arcanine"));
        assert_eq!(t.species_of(Side::P1, &Identity::from("Arcanine")), Some("Arcanine"));
        assert_eq!(t.species_of(Side::P1, &Identity::from("Smeargle")), None);
        assert_eq!(t.identity_at(Slot::MineFront), Some(&Identity::from("Smeargle")));
    }

    #[test]
    fn minor_events_do_not_move_slots() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p2a: Rotom|Rotom-Wash, L50|157/157");
        assert!(!feed(&mut t, "|-damage|p2b: Rotom|100/157"));
        assert!(!t.is_occupied(Slot::OppBack));
        assert!(!feed(&mut t, "|move|p2a: Rotom|Hydro Pump|p1a: X"));
    }

    #[test]
    fn disguise_reveal_rebinds_species() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p2a: Zoroark|Ferrothorn, L50, F|167/167");
        assert_eq!(t.species_at(Slot::OppFront), Some("Ferrothorn"));
        feed(&mut t, "|replace|p2a: Zoroark|Zoroark, L50, F");
        assert_eq!(t.species_at(Slot::OppFront), Some("Zoroark"));
    }

    #[test]
    fn swap_exchanges_positions() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: Gardevoir|Gardevoir, L50, F|48/48");
        feed(&mut t, "|switch|p1b: Ferro|Ferrothorn, L50, F|48/48");
        assert!(feed(&mut t, "|swap|p1a: Gardevoir|1|[from] move: Ally Switch"));
        assert_eq!(t.species_at(Slot::MineBack), Some("Gardevoir"));
        assert_eq!(t.species_at(Slot::MineFront), Some("Ferrothorn"));
    }

    #[test]
    fn reverse_lookup() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p2b: Araquanid|Araquanid, L84, M|100/100");
        assert_eq!(t.slot_of(Side::P2, &Identity::from("Araquanid")).unwrap(), Slot::OppBack);
        assert!(matches!(
            t.slot_of(Side::P1, &Identity::from("Araquanid")),
            Err(AgentError::UnknownIdentity { .. })
        ));
        assert!(matches!(
            t.slot_of(Side::P2, &Identity::from("Nobody")),
            Err(AgentError::UnknownIdentity { .. })
        ));
    }

    #[test]
    fn occupied_opponents_front_first() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p2b: B|Snorlax, L50|100/100");
        feed(&mut t, "|switch|p2a: A|Garchomp, L50|100/100");
        let occupied: Vec<Slot> = t.occupied_opponents().collect();
        assert_eq!(occupied, vec![Slot::OppFront, Slot::OppBack]);
    }

    #[test]
    fn same_nickname_on_both_sides_keeps_separate_species() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: Rotom|Rotom-Wash, L50|157/157");
        feed(&mut t, "|switch|p2a: Rotom|Rotom-Heat, L50|100/100");
        assert_eq!(t.species_at(Slot::MineFront), Some("Rotom-Wash"));
        assert_eq!(t.species_at(Slot::OppFront), Some("Rotom-Heat"));

        feed(&mut t, "|detailschange|p2a: Rotom|Rotom-Frost, L50");
        assert_eq!(t.species_at(Slot::MineFront), Some("Rotom-Wash"));
        assert_eq!(t.species_at(Slot::OppFront), Some("Rotom-Frost"));

        feed(&mut t, "|switch|p1b: Ditto|Ditto, L50|100/100");
        feed(&mut t, "|-transform|p1b: Ditto|p2a: Rotom");
        assert_eq!(t.species_at(Slot::MineBack), Some("Rotom-Frost"));
        assert_eq!(t.species_at(Slot::MineFront), Some("Rotom-Wash"));
        assert_eq!(t.slot_of(Side::P1, &Identity::from("Rotom")).unwrap(), Slot::MineFront);
        assert_eq!(t.slot_of(Side::P2, &Identity::from("Rotom")).unwrap(), Slot::OppFront);
    }

    #[test]
    fn unknown_position_letter_is_ignored() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: Gardevoir|Gardevoir, L50, F|48/48");
        assert!(!feed(&mut t, "|switch|p1c: Intruder|Snorlax, L50|100/100"));
        assert!(!feed(&mut t, "|faint|p1c: Intruder"));
        assert_eq!(t.species_at(Slot::MineFront), Some("Gardevoir"));
        assert!(!t.is_occupied(Slot::MineBack));
    }

    #[test]
    fn opponent_species_covers_benched_and_fainted() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: Chomp|Garchomp, L50|100/100");
        feed(&mut t, "|switch|p2a: G|Garchomp, L50|100/100");
        feed(&mut t, "|switch|p2a: S|Snorlax, L50|100/100");
        feed(&mut t, "|switch|p2b: V|Venusaur, L50|100/100");
        feed(&mut t, "|faint|p2b: V");
        let mut seen: Vec<&str> = t.opponent_species().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["Garchomp", "Snorlax", "Venusaur"]);
    }

    #[test]
    fn display_snapshot_names_every_slot() {
        let mut t = Tracker::new(Side::P1);
        feed(&mut t, "|switch|p1a: X|Garchomp, L50|100/100");
        let snapshot = t.to_string();
        assert!(snapshot.contains("mine-front=X(Garchomp)"));
        assert!(snapshot.contains("opp-back=empty"));
    }
}
