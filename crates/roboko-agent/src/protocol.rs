//! Stateless line parser for the rules engine's event stream.
//!
//! Every line has the form `|tag|field|field...`: splitting on `|` yields an
//! empty field 0, the tag in field 1, and event-specific fields after it.
//! Two tags are not events at all: `request` carries a JSON prompt and
//! `error` carries a rejection message. Both are routed out-of-band.
//!
//! Nothing here ever fails. A line that cannot be understood becomes
//! `None` or [`BattleEvent::Other`] and is dropped by the tracker.

use roboko_types::{Position, Side};

/// Field delimiter.
pub const DELIMITER: char = '|';

/// Prefix of a recoverable rejection message.
pub const UNAVAILABLE_CHOICE: &str = "[Unavailable choice]";

/// One inbound line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `|request|{json}`: a structured prompt.
    Request(&'a str),
    /// `|error|message`: a rejection from the rules engine.
    Error(&'a str),
    /// Any other tagged line.
    Event(EventRecord<'a>),
}

/// A tagged event line split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord<'a> {
    /// Event tag (field 1). Minor events start with `-`.
    pub tag: &'a str,
    /// Fields after the tag.
    pub args: Vec<&'a str>,
}

/// A `p2a: Nickname` reference to one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject<'a> {
    /// Side plus position token, such as `p2a` or a bare `p2`.
    pub place: &'a str,
    /// Identity token after `": "`.
    pub identity: &'a str,
}

/// Structured event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent<'a> {
    /// `switch`, `drag`, or `replace`: a combatant enters a slot.
    Entry {
        /// Who entered and where.
        subject: Subject<'a>,
        /// Species named in the details field.
        species: &'a str,
    },
    /// `detailschange`: permanent forme change.
    DetailsChange {
        /// Who changed.
        subject: Subject<'a>,
        /// New species.
        species: &'a str,
    },
    /// `faint`: the slot empties.
    Faint {
        /// Who fainted.
        subject: Subject<'a>,
    },
    /// `-transform`: the actor copies the target's species.
    Transform {
        /// The copying combatant.
        subject: Subject<'a>,
        /// The combatant being copied.
        target: Subject<'a>,
    },
    /// `swap`: the subject moves to another position on its side.
    Swap {
        /// Who moved.
        subject: Subject<'a>,
        /// Destination position.
        position: Position,
    },
    /// `player`: a side's display name.
    Player {
        /// Which side.
        side: Side,
        /// Display name.
        name: &'a str,
    },
    /// `win`: the named player won.
    Win {
        /// Winner's display name.
        name: &'a str,
    },
    /// `tie`: nobody won.
    Tie,
    /// Anything else that names a combatant.
    Other {
        /// Event tag.
        tag: &'a str,
        /// The combatant, if the first field names one.
        subject: Option<Subject<'a>>,
    },
}

impl<'a> EventRecord<'a> {
    /// Whether this line carries enough fields to describe a change in
    /// battle state (at least three fields including the empty field 0).
    pub fn is_state_update(&self) -> bool {
        !self.args.is_empty()
    }

    /// Whether the tag marks a minor event.
    pub fn is_minor(&self) -> bool {
        self.tag.starts_with('-')
    }

    /// Interpret the record.
    pub fn event(&self) -> BattleEvent<'a> {
        let arg = |i: usize| self.args.get(i).copied();
        let subject = arg(0).and_then(parse_subject);

        match (self.tag, subject) {
            ("switch" | "drag" | "replace", Some(subject)) => BattleEvent::Entry {
                subject,
                species: arg(1).map(species_from_details).unwrap_or_default(),
            },
            ("detailschange", Some(subject)) => BattleEvent::DetailsChange {
                subject,
                species: arg(1).map(species_from_details).unwrap_or_default(),
            },
            ("faint", Some(subject)) => BattleEvent::Faint { subject },
            ("-transform", Some(subject)) => match arg(1).and_then(parse_subject) {
                Some(target) => BattleEvent::Transform { subject, target },
                None => BattleEvent::Other { tag: self.tag, subject: Some(subject) },
            },
            ("swap", Some(subject)) => match arg(1).and_then(|p| p.trim().parse::<u8>().ok()) {
                Some(0) => BattleEvent::Swap { subject, position: Position::Front },
                Some(1) => BattleEvent::Swap { subject, position: Position::Back },
                _ => BattleEvent::Other { tag: self.tag, subject: Some(subject) },
            },
            ("player", _) => match (arg(0).and_then(Side::from_prefix), arg(1)) {
                (Some(side), Some(name)) if !name.is_empty() => BattleEvent::Player { side, name },
                _ => BattleEvent::Other { tag: self.tag, subject: None },
            },
            ("win", _) => BattleEvent::Win { name: arg(0).unwrap_or_default() },
            ("tie", _) => BattleEvent::Tie,
            (tag, subject) => BattleEvent::Other { tag, subject },
        }
    }
}

/// Classify one raw line. Returns `None` for lines that do not start with
/// the delimiter or carry no tag.
pub fn parse_line(line: &str) -> Option<Line<'_>> {
    let body = line.strip_prefix(DELIMITER)?;
    let (tag, rest) = body.split_once(DELIMITER).unwrap_or((body, ""));
    match tag {
        "" => None,
        "request" => Some(Line::Request(rest)),
        "error" => Some(Line::Error(rest)),
        _ => {
            let args = if body.len() == tag.len() {
                Vec::new()
            } else {
                rest.split(DELIMITER).collect()
            };
            Some(Line::Event(EventRecord { tag, args }))
        }
    }
}

/// Parse a `p2a: Nickname` token. Returns `None` unless it starts with a
/// recognized side prefix.
pub fn parse_subject(token: &str) -> Option<Subject<'_>> {
    Side::from_prefix(token)?;
    let (place, identity) = match token.split_once(':') {
        Some((place, identity)) => (place.trim(), identity.trim_start()),
        None => (token.trim(), ""),
    };
    Some(Subject { place, identity })
}

/// Species name from a details field (`Garchomp, L50, M` becomes
/// `Garchomp`).
pub fn species_from_details(details: &str) -> &str {
    details.split(',').next().unwrap_or_default().trim()
}

/// Whether an error message is the recoverable "unavailable choice" kind.
pub fn is_unavailable_choice(message: &str) -> bool {
    message.trim_start().starts_with(UNAVAILABLE_CHOICE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn event(line: &str) -> BattleEvent<'_> {
        match parse_line(line) {
            Some(Line::Event(record)) => record.event(),
            other => panic!("expected event line, got {other:?}"),
        }
    }

    #[test]
    fn routes_requests_and_errors() {
        assert_eq!(parse_line("|request|{\"wait\":true}"), Some(Line::Request("{\"wait\":true}")));
        assert_eq!(
            parse_line("|error|[Unavailable choice] Can't switch"),
            Some(Line::Error("[Unavailable choice] Can't switch"))
        );
        assert_eq!(parse_line("update"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("||"), None);
    }

    #[test]
    fn short_lines_are_not_updates() {
        let Some(Line::Event(record)) = parse_line("|upkeep") else {
            panic!("expected event");
        };
        assert!(!record.is_state_update());
        let Some(Line::Event(record)) = parse_line("|turn|3") else {
            panic!("expected event");
        };
        assert!(record.is_state_update());
        assert!(!record.is_minor());
    }

    #[test]
    fn parses_entry_events() {
        let e = event("|switch|p2b: Araquanid|Araquanid, L84, M|100/100");
        assert_eq!(
            e,
            BattleEvent::Entry {
                subject: Subject { place: "p2b", identity: "Araquanid" },
                species: "Araquanid",
            }
        );
        let e = event("|replace|p1a: Zoroark|Zoroark, L50, F");
        assert!(matches!(e, BattleEvent::Entry { species: "Zoroark", .. }));
        let e = event("|drag|p1b: Rotom|Rotom-Wash, L50|157/157");
        assert!(matches!(e, BattleEvent::Entry { species: "Rotom-Wash", .. }));
    }

    #[test]
    fn parses_transform_and_faint() {
        let e = event("|-transform|p2a: Smeargle|p1b: Arcanine");
        assert_eq!(
            e,
            BattleEvent::Transform {
                subject: Subject { place: "p2a", identity: "Smeargle" },
                target: Subject { place: "p1b", identity: "Arcanine" },
            }
        );
        let e = event("|faint|p1a: Gardevoir");
        assert!(matches!(e, BattleEvent::Faint { subject: Subject { place: "p1a", .. } }));
    }

    #[test]
    fn parses_swap_player_and_end() {
        let e = event("|swap|p1a: Gardevoir|1|[from] move: Ally Switch");
        assert!(matches!(e, BattleEvent::Swap { position: Position::Back, .. }));
        let e = event("|player|p2|Roboko|120|");
        assert_eq!(e, BattleEvent::Player { side: Side::P2, name: "Roboko" });
        assert_eq!(event("|win|Roboko"), BattleEvent::Win { name: "Roboko" });
        assert_eq!(event("|tie"), BattleEvent::Tie);
    }

    #[test]
    fn unrecognized_subjects_are_dropped() {
        let e = event("|move|p3a: Ghost|Tackle|p1a: X");
        assert_eq!(e, BattleEvent::Other { tag: "move", subject: None });
        let e = event("|-weather|RainDance");
        assert_eq!(e, BattleEvent::Other { tag: "-weather", subject: None });
    }

    #[test]
    fn bare_side_subject_has_empty_identity() {
        assert_eq!(parse_subject("p2"), Some(Subject { place: "p2", identity: "" }));
        assert_eq!(parse_subject("Roboko"), None);
    }

    #[test]
    fn detects_unavailable_choice() {
        assert!(is_unavailable_choice("[Unavailable choice] Can't move"));
        assert!(!is_unavailable_choice("[Invalid choice] Can't move"));
    }
}
