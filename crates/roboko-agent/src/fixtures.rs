//! Shared test fixtures: a small in-memory dex and request builders.

use roboko_dex::{BaseStats, DexData, MoveData, Species};
use roboko_types::{
    ActiveSlot, MoveCategory, MoveOption, MoveTarget, PokemonType, Request, RosterMember, Side,
};

use crate::protocol::{Line, parse_line};
use crate::tracker::Tracker;

const fn stats(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> BaseStats {
    BaseStats { hp, atk, def, spa, spd, spe }
}

/// Five species and ten moves, enough to exercise every scoring branch.
pub fn sample_dex() -> DexData {
    use MoveCategory::{Physical, Special, Status};
    use PokemonType as T;

    DexData::new()
        .with_species(Species::new("Garchomp", &[T::Dragon, T::Ground], stats(108, 130, 95, 80, 85, 102)))
        .with_species(Species::new("Rotom-Wash", &[T::Electric, T::Water], stats(50, 65, 107, 105, 107, 86)))
        .with_species(Species::new("Charizard", &[T::Fire, T::Flying], stats(78, 84, 78, 109, 85, 100)))
        .with_species(Species::new("Venusaur", &[T::Grass, T::Poison], stats(80, 82, 83, 100, 100, 80)))
        .with_species(Species::new("Snorlax", &[T::Normal], stats(160, 110, 65, 65, 110, 30)))
        .with_move(MoveData::new("Earthquake", Physical, T::Ground, 100, MoveTarget::AllAdjacent))
        .with_move(MoveData::new("Dragon Claw", Physical, T::Dragon, 80, MoveTarget::Normal))
        .with_move(MoveData::new("Hydro Pump", Special, T::Water, 110, MoveTarget::Normal))
        .with_move(MoveData::new("Thunderbolt", Special, T::Electric, 90, MoveTarget::Normal))
        .with_move(MoveData::new("Flamethrower", Special, T::Fire, 90, MoveTarget::Normal))
        .with_move(MoveData::new("Protect", Status, T::Normal, 0, MoveTarget::SelfTarget))
        .with_move(MoveData::new("Helping Hand", Status, T::Normal, 0, MoveTarget::AdjacentAlly))
        .with_move(MoveData::new("Acupressure", Status, T::Normal, 0, MoveTarget::AdjacentAllyOrSelf))
        .with_move(MoveData::new("Body Slam", Physical, T::Normal, 85, MoveTarget::Normal))
        .with_move(MoveData::new("Low Kick", Physical, T::Fighting, 0, MoveTarget::Normal))
}

pub fn move_option(name: &str, target: &str) -> MoveOption {
    MoveOption {
        name: name.to_owned(),
        id: roboko_dex::to_id(name),
        target: MoveTarget::from(target),
        ..MoveOption::default()
    }
}

pub fn member(ident: &str, species: &str, condition: &str, active: bool) -> RosterMember {
    RosterMember {
        ident: ident.to_owned(),
        details: format!("{species}, L50"),
        condition: condition.to_owned(),
        active,
    }
}

pub fn slate(moves: &[(&str, &str)]) -> ActiveSlot {
    ActiveSlot {
        moves: moves.iter().map(|(name, target)| move_option(name, target)).collect(),
        ..ActiveSlot::default()
    }
}

pub fn active_request(side: Side, active: Vec<ActiveSlot>, roster: Vec<RosterMember>) -> Request {
    let mut request = Request {
        active: Some(active),
        ..Request::default()
    };
    request.side.name = "Roboko".to_owned();
    request.side.id = Some(side);
    request.side.pokemon = roster;
    request
}

pub fn tracker_with(side: Side, lines: &[&str]) -> Tracker {
    let mut tracker = Tracker::new(side);
    for line in lines {
        if let Some(Line::Event(record)) = parse_line(line) {
            tracker.apply(&record.event());
        }
    }
    tracker
}
