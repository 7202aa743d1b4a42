//! Battle loop: chunks in, commands out.
//!
//! The only suspension point is waiting for the next chunk. Each chunk is
//! handed to the agent whole, and whatever it emits is written before the
//! next read.

use roboko_agent::{AgentOutput, BattleAgent, BattleOutcome};
use roboko_dex::Dex;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info, warn};

use crate::error::RunnerError;
use crate::stream::{ChunkReader, write_choice};

/// Drive `agent` until the battle ends or input runs out.
///
/// Returns the outcome, or `None` if the stream closed first.
pub async fn run_battle<D, R, W>(
    agent: &mut BattleAgent<D>,
    reader: R,
    writer: &mut W,
) -> Result<Option<BattleOutcome>, RunnerError>
where
    D: Dex,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunks = ChunkReader::new(reader);
    let mut decisions = 0u64;

    while let Some(chunk) = chunks.next_chunk().await? {
        debug!(bytes = chunk.len(), "chunk received");
        for output in agent.receive(&chunk)? {
            match output {
                AgentOutput::Choice(record) => {
                    write_choice(writer, record.side, &record.choice).await?;
                    decisions = decisions.saturating_add(1);
                }
                AgentOutput::Ended(outcome) => {
                    info!(outcome = ?outcome, decisions, fallbacks = agent.fallback_count(), "battle finished");
                    return Ok(Some(outcome));
                }
            }
        }
    }

    warn!(decisions, "input closed before the battle ended");
    Ok(None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roboko_agent::{AgentConfig, AgentError};
    use roboko_dex::{BaseStats, DexData, MoveData, Species};
    use roboko_types::{MoveCategory, MoveTarget, PokemonType, Side};

    use super::*;

    fn dex() -> DexData {
        DexData::new()
            .with_species(Species::new("Garchomp", &[PokemonType::Dragon, PokemonType::Ground], BaseStats {
                hp: 108,
                atk: 130,
                def: 95,
                spa: 80,
                spd: 85,
                spe: 102,
            }))
            .with_move(MoveData::new(
                "Dragon Claw",
                MoveCategory::Physical,
                PokemonType::Dragon,
                80,
                MoveTarget::Normal,
            ))
    }

    const REQUEST: &str = r#"|request|{"rqid":1,"active":[{"moves":[{"move":"Dragon Claw","target":"normal"}]}],"side":{"name":"Roboko","id":"p1","pokemon":[{"ident":"p1a: X","details":"Garchomp, L50","condition":"100/100","active":true}]}}"#;

    #[tokio::test]
    async fn answers_prompt_and_stops_at_win() {
        let input = format!(
            "|player|p1|Roboko|1|\n|switch|p1a: X|Garchomp, L50|100/100\n|switch|p2a: Y|Garchomp, L50|100/100\n{REQUEST}\n\n|faint|p2a: Y\n|win|Roboko\n\n|turn|99\n"
        );
        let mut agent = BattleAgent::new(Side::P1, dex(), AgentConfig::default().with_seed(1));
        let mut out: Vec<u8> = Vec::new();

        let outcome = run_battle(&mut agent, input.as_bytes(), &mut out).await.unwrap();
        assert_eq!(outcome, Some(BattleOutcome::Won));
        assert_eq!(String::from_utf8(out).unwrap(), ">p1 move 1 1\n");
    }

    #[tokio::test]
    async fn closed_input_yields_no_outcome() {
        let mut agent = BattleAgent::new(Side::P2, dex(), AgentConfig::default().with_seed(1));
        let mut out: Vec<u8> = Vec::new();
        let outcome = run_battle(&mut agent, &b"|turn|1\n"[..], &mut out).await.unwrap();
        assert_eq!(outcome, None);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn fatal_agent_error_propagates() {
        let mut agent = BattleAgent::new(Side::P1, dex(), AgentConfig::default().with_seed(1));
        let mut out: Vec<u8> = Vec::new();
        let err = run_battle(&mut agent, &b"|error|[Invalid choice] nope\n"[..], &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Agent(AgentError::Protocol(_))));
    }
}
