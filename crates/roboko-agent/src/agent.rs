//! The per-side agent façade.
//!
//! [`BattleAgent`] owns everything one automated side needs: its tracker,
//! its session state, and its own seeded random generator. Two agents in
//! the same battle share nothing.
//!
//! Each call to [`BattleAgent::receive`] processes one chunk line by line,
//! in order, and only then checks whether a decision is due. At most one
//! command line is emitted per chunk.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use roboko_dex::Dex;
use roboko_types::{AgentId, Choice, ChoiceLine, Request, RequestKind, Side, Slot};
use serde::{Deserialize, Serialize};
use tracing::{Span, debug, info, info_span, warn};

use crate::candidate::{self, Candidate, Diagnostics};
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::protocol::{self, BattleEvent, Line};
use crate::scoring::Scorer;
use crate::selector;
use crate::session::{SessionInput, SessionState};
use crate::tracker::Tracker;

/// How the battle ended for this agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    /// This side won.
    Won,
    /// The other side won.
    Lost,
    /// Nobody won.
    Tie,
}

/// One emitted decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Agent that decided.
    pub agent_id: AgentId,
    /// Side the command is for.
    pub side: Side,
    /// Sequence number of the prompt being answered.
    pub rqid: Option<u64>,
    /// The command line.
    pub choice: ChoiceLine,
    /// Candidates considered across all slots.
    pub candidates: usize,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
}

/// Something the caller must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutput {
    /// Send this command upstream.
    Choice(DecisionRecord),
    /// The battle is over.
    Ended(BattleOutcome),
}

/// One automated side of one battle.
pub struct BattleAgent<D: Dex> {
    id: AgentId,
    side: Side,
    dex: D,
    config: AgentConfig,
    rng: StdRng,
    tracker: Tracker,
    session: SessionState,
    own_name: Option<String>,
    outcome: Option<BattleOutcome>,
    diagnostics: Diagnostics,
    span: Span,
}

impl<D: Dex> BattleAgent<D> {
    /// Create an agent for `side`. The random generator is seeded from the
    /// config, or from the OS when no seed is set.
    pub fn new(side: Side, dex: D, config: AgentConfig) -> Self {
        let id = AgentId::new();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let span = info_span!("agent", agent_id = %id, side = %side);
        span.in_scope(|| info!(seed = ?config.seed, "agent created"));
        Self {
            id,
            side,
            dex,
            config,
            rng,
            tracker: Tracker::new(side),
            session: SessionState::default(),
            own_name: None,
            outcome: None,
            diagnostics: Diagnostics::default(),
            span,
        }
    }

    /// This agent's identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The side this agent plays.
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Tracked positional state.
    pub const fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Current session state.
    pub const fn state(&self) -> &SessionState {
        &self.session
    }

    /// How the battle ended, once it has.
    pub const fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Number of single-foe moves offered untargeted because the tracker
    /// knew no occupied opponent slot. Nonzero values point at drift.
    pub const fn fallback_count(&self) -> u64 {
        self.diagnostics.untargeted_fallbacks
    }

    /// Process one inbound chunk.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Protocol`] for a rules-engine fault other than
    /// an unavailable choice, [`AgentError::Request`] for an unreadable
    /// prompt, and [`AgentError::NoLegalChoice`] when a slot that must act
    /// has nothing legal to do. All three end the session.
    pub fn receive(&mut self, chunk: &str) -> Result<Vec<AgentOutput>, AgentError> {
        let span = self.span.clone();
        let _entered = span.enter();

        let mut outputs = Vec::new();
        if self.outcome.is_some() {
            return Ok(outputs);
        }

        for line in chunk.lines() {
            if let Some(outcome) = self.process_line(line)? {
                info!(outcome = ?outcome, fallbacks = self.fallback_count(), "battle ended");
                self.outcome = Some(outcome);
                outputs.push(AgentOutput::Ended(outcome));
                return Ok(outputs);
            }
        }

        if let Some(record) = self.respond()? {
            outputs.push(AgentOutput::Choice(record));
        }
        Ok(outputs)
    }

    /// Build a command line for `request` from the current state, along
    /// with how many candidates were considered. Returns `None` for a wait
    /// prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoLegalChoice`] if an active slot that is not
    /// fainted has no usable move and no available switch.
    pub fn decide(&mut self, request: &Request) -> Result<Option<(ChoiceLine, usize)>, AgentError> {
        let mut chosen: Vec<Choice> = Vec::new();
        let mut claimed: Vec<usize> = Vec::new();
        let mut considered = 0usize;

        match request.kind() {
            RequestKind::Wait => return Ok(None),
            RequestKind::TeamPreview => {
                let order = candidate::team_preview_candidate(request);
                chosen.push(order.choice());
                considered = 1;
            }
            RequestKind::ForceSwitch(flags) => {
                for (index, &must_switch) in flags.iter().enumerate() {
                    let actor = match Slot::mine_at(index) {
                        Some(actor) if must_switch => actor,
                        _ => {
                            chosen.push(Choice::Pass);
                            continue;
                        }
                    };
                    let candidates = candidate::forced_switch_candidates(request, actor, flags.len(), &claimed);
                    considered = considered.saturating_add(candidates.len());
                    let pick = self.pick(request, candidates);
                    claim(&mut chosen, &mut claimed, pick);
                }
            }
            RequestKind::Active(slots) => {
                for (index, active) in slots.iter().enumerate() {
                    let Some(actor) = Slot::mine_at(index) else {
                        warn!(index, "active slot beyond the doubles field, passing");
                        chosen.push(Choice::Pass);
                        continue;
                    };
                    if request.member(index).is_some_and(|m| m.is_fainted()) {
                        chosen.push(Choice::Pass);
                        continue;
                    }

                    let has_ally = slots.len() > 1
                        && request
                            .member(actor.partner().index())
                            .is_some_and(|m| !m.is_fainted());
                    let mut candidates: Vec<Candidate> = candidate::usable_moves(&active.moves, has_ally)
                        .into_iter()
                        .flat_map(|(move_slot, option)| {
                            candidate::move_candidates(&self.tracker, actor, move_slot, option, &mut self.diagnostics)
                        })
                        .collect();
                    if !active.trapped {
                        candidates.extend(candidate::switch_candidates(request, actor, &claimed));
                    }

                    if candidates.is_empty() {
                        return Err(AgentError::NoLegalChoice {
                            slot: index,
                            request: Box::new(request.clone()),
                            state: self.tracker.to_string(),
                            chosen,
                        });
                    }
                    considered = considered.saturating_add(candidates.len());
                    let pick = self.pick(request, candidates);
                    claim(&mut chosen, &mut claimed, pick);
                }
            }
        }

        Ok(Some((ChoiceLine(chosen), considered)))
    }

    /// Returns the outcome if this line ended the battle.
    fn process_line(&mut self, line: &str) -> Result<Option<BattleOutcome>, AgentError> {
        let Some(parsed) = protocol::parse_line(line) else {
            return Ok(None);
        };

        match parsed {
            Line::Request(json) => {
                if json.trim().is_empty() {
                    return Ok(None);
                }
                let request: Request = serde_json::from_str(json)?;
                if self.own_name.is_none() && !request.side.name.is_empty() {
                    self.own_name = Some(request.side.name.clone());
                }
                debug!(rqid = ?request.rqid, state = self.session.name(), "prompt stored");
                self.advance(SessionInput::Prompt(Box::new(request)));
            }
            Line::Error(message) => {
                if protocol::is_unavailable_choice(message) {
                    warn!(message, "choice rejected, waiting for corrected prompt");
                    self.advance(SessionInput::Update);
                } else {
                    return Err(AgentError::Protocol(message.to_owned()));
                }
            }
            Line::Event(record) => {
                let event = record.event();
                if record.is_state_update() {
                    self.tracker.apply(&event);
                    self.advance(SessionInput::Update);
                }
                match event {
                    BattleEvent::Player { side, name } if side == self.side => {
                        self.own_name = Some(name.to_owned());
                    }
                    BattleEvent::Win { name } => {
                        let won = self.own_name.as_deref() == Some(name);
                        return Ok(Some(if won { BattleOutcome::Won } else { BattleOutcome::Lost }));
                    }
                    BattleEvent::Tie => return Ok(Some(BattleOutcome::Tie)),
                    _ => {}
                }
            }
        }
        Ok(None)
    }

    fn advance(&mut self, input: SessionInput) {
        self.session = std::mem::take(&mut self.session).transition(input);
    }

    fn respond(&mut self) -> Result<Option<DecisionRecord>, AgentError> {
        let Some(request) = self.session.ready().cloned() else {
            return Ok(None);
        };
        let decision = self.decide(&request);
        self.advance(SessionInput::Responded);

        let Some((choice, candidates)) = decision? else {
            debug!(rqid = ?request.rqid, "wait prompt, nothing to send");
            return Ok(None);
        };
        info!(rqid = ?request.rqid, choice = %choice, candidates, "decision");
        Ok(Some(DecisionRecord {
            agent_id: self.id,
            side: self.side,
            rqid: request.rqid,
            choice,
            candidates,
            decided_at: Utc::now(),
        }))
    }

    fn pick(&mut self, request: &Request, mut candidates: Vec<Candidate>) -> Option<Candidate> {
        Scorer::new(&self.dex, &self.tracker, request, &self.config.scoring).score_all(&mut candidates);
        for c in &candidates {
            debug!(choice = %c.choice(), score = c.score, "candidate");
        }
        selector::select(&candidates, &mut self.rng).cloned()
    }
}

/// Record a pick, or a pass when there was nothing to pick.
fn claim(chosen: &mut Vec<Choice>, claimed: &mut Vec<usize>, pick: Option<Candidate>) {
    match pick {
        Some(candidate) => {
            if let Some(slot) = candidate.claimed_roster_slot() {
                claimed.push(slot);
            }
            chosen.push(candidate.choice());
        }
        None => chosen.push(Choice::Pass),
    }
}

impl<D: Dex> core::fmt::Debug for BattleAgent<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleAgent")
            .field("id", &self.id)
            .field("side", &self.side)
            .field("session", &self.session.name())
            .field("tracker", &self.tracker.to_string())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
