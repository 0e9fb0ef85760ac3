//! Dice battle: every player rolls their pool each round; the highest total wins.

use std::io::{self, BufRead, Write};

use dice_core::{
    derive_seed, BattleConfig, Chance, ConfigError, DiceError, Die, RollCoordinator, RollMode,
};
use dice_logging::{
    hash_config_bytes, now_ms, BattleRoundEventV1, NdjsonError, NdjsonWriter, RollEventV1,
    RunHeaderEventV1, EVENT_SCHEMA_VERSION,
};
use thiserror::Error;

pub const PROMPT: &str = "Battle? [yes/no, default=yes]: ";

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Dice(#[from] DiceError),
    #[error("{0}")]
    Log(#[from] NdjsonError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

struct Player {
    name: String,
    pool: String,
    roller: RollCoordinator,
}

struct RoundRoll {
    rolled: Vec<u32>,
    total: u32,
    shown: String,
}

pub fn mode_name(mode: RollMode) -> &'static str {
    match mode {
        RollMode::Normal => "normal",
        RollMode::Advantage => "advantage",
        RollMode::Disadvantage => "disadvantage",
    }
}

/// Roll once in the given mode and return the kept total.
pub fn roll_in_mode(roller: &mut RollCoordinator, mode: RollMode) -> Result<u32, DiceError> {
    match mode {
        RollMode::Normal => Ok(roller.roll()),
        RollMode::Advantage => roller.roll_with_advantage(),
        RollMode::Disadvantage => roller.roll_with_disadvantage(),
    }
}

/// `true` to play another round. EOF and "no" stop; empty input means yes.
fn wants_another_round(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    let answer = line.trim();
    let answer = if answer.is_empty() { "yes" } else { answer };
    Ok(answer != "no")
}

fn build_players(config: &BattleConfig) -> Result<Vec<Player>, BattleError> {
    config
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let spec = p.pool_spec()?;
            let chance = match config.seed {
                Some(seed) => Chance::seeded(derive_seed(seed, i as u64)),
                None => Chance::from_entropy(),
            };
            Ok(Player {
                name: p.name.clone(),
                pool: spec.to_string(),
                roller: RollCoordinator::new(spec.build(chance))?,
            })
        })
        .collect()
}

fn write_outcome(
    out: &mut impl Write,
    players: &[Player],
    rolls: &[RoundRoll],
    leaders: &[usize],
) -> io::Result<()> {
    let describe = |i: usize| format!("a total of {} ({})", rolls[i].total, rolls[i].shown);
    let others_of = |i: usize| {
        leaders
            .iter()
            .filter(|&&j| j != i)
            .map(|&j| players[j].name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    if leaders.len() == 1 {
        let w = leaders[0];
        writeln!(out, "{} wins with {}", players[w].name, describe(w))?;
    } else {
        for &i in leaders {
            writeln!(
                out,
                "{} ties with {} with {}",
                players[i].name,
                others_of(i),
                describe(i)
            )?;
        }
    }
    for i in (0..players.len()).filter(|i| !leaders.contains(i)) {
        writeln!(out, "{} loses with {}", players[i].name, describe(i))?;
    }
    Ok(())
}

/// Run the prompt loop until the player declines. Returns rounds played.
pub fn run_battle(
    config: &BattleConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<u64, BattleError> {
    config.validate()?;
    let mut players = build_players(config)?;
    let mode = mode_name(config.mode);

    let mut log = match &config.log_path {
        Some(path) => {
            let mut w = NdjsonWriter::open_append_with_flush(path, 1)?;
            let config_yaml = serde_yaml::to_string(config).map_err(ConfigError::from)?;
            w.write_event(&RunHeaderEventV1 {
                event: "run_header".to_string(),
                v: EVENT_SCHEMA_VERSION,
                ts_ms: now_ms(),
                tool_version: crate::VERSION.to_string(),
                seed: config.seed,
                mode: mode.to_string(),
                config_hash: hash_config_bytes(config_yaml.as_bytes()),
            })?;
            Some(w)
        }
        None => None,
    };

    let mut round = 0u64;
    while wants_another_round(input, out)? {
        round += 1;
        let mut rolls = Vec::with_capacity(players.len());
        for p in &mut players {
            let total = roll_in_mode(&mut p.roller, config.mode)?;
            let set = p.roller.dice_set();
            rolls.push(RoundRoll {
                rolled: set.current_roll().iter().map(Die::rolled).collect(),
                total,
                shown: set.pool_line(),
            });
        }

        let best = rolls.iter().map(|r| r.total).max().unwrap_or(0);
        let leaders: Vec<usize> = (0..rolls.len()).filter(|&i| rolls[i].total == best).collect();
        write_outcome(out, &players, &rolls, &leaders)?;

        if let Some(w) = log.as_mut() {
            for (p, r) in players.iter().zip(&rolls) {
                w.write_event(&RollEventV1 {
                    event: "roll".to_string(),
                    v: EVENT_SCHEMA_VERSION,
                    ts_ms: now_ms(),
                    player: p.name.clone(),
                    pool: p.pool.clone(),
                    mode: mode.to_string(),
                    rolled: r.rolled.clone(),
                    total: r.total,
                })?;
            }
            w.write_event(&BattleRoundEventV1 {
                event: "battle_round".to_string(),
                v: EVENT_SCHEMA_VERSION,
                ts_ms: now_ms(),
                round,
                totals: rolls.iter().map(|r| r.total).collect(),
                leaders: leaders.clone(),
            })?;
        }
    }

    if let Some(mut w) = log {
        w.flush()?;
    }
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::PlayerConfig;
    use std::io::Cursor;

    fn run(config: &BattleConfig, stdin: &str) -> (u64, String) {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let rounds = run_battle(config, &mut input, &mut out).unwrap();
        (rounds, String::from_utf8(out).unwrap())
    }

    fn seeded() -> BattleConfig {
        BattleConfig {
            seed: Some(7),
            ..BattleConfig::default()
        }
    }

    #[test]
    fn no_stops_immediately() {
        let (rounds, out) = run(&seeded(), "no\n");
        assert_eq!(rounds, 0);
        assert_eq!(out, PROMPT);
    }

    #[test]
    fn empty_answer_means_yes() {
        let (rounds, out) = run(&seeded(), "\n\nyes\nno\n");
        assert_eq!(rounds, 3);
        assert_eq!(out.matches(PROMPT).count(), 4);
    }

    #[test]
    fn eof_stops_the_loop() {
        let (rounds, _) = run(&seeded(), "yes\n");
        assert_eq!(rounds, 1);
    }

    #[test]
    fn every_round_reports_both_players() {
        let (_, out) = run(&seeded(), "\n\n\nno\n");
        let outcome_lines: Vec<&str> = out
            .split(PROMPT)
            .flat_map(str::lines)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(outcome_lines.len(), 6);
        for pair in outcome_lines.chunks(2) {
            let tie = pair[0].contains(" ties with ");
            if tie {
                assert!(pair[1].contains(" ties with "));
            } else {
                assert!(pair[0].contains(" wins with a total of "));
                assert!(pair[1].contains(" loses with a total of "));
            }
            assert!(pair.iter().all(|l| l.contains("(5d6, [")));
        }
    }

    #[test]
    fn same_seed_same_battle() {
        let (_, a) = run(&seeded(), "\n\n\nno\n");
        let (_, b) = run(&seeded(), "\n\n\nno\n");
        assert_eq!(a, b);
    }

    #[test]
    fn tie_lines_name_the_other_player() {
        // Empty pools always total 0, so every round is a tie.
        let config = BattleConfig {
            players: vec![
                PlayerConfig {
                    name: "A".to_string(),
                    pool: "0d6".to_string(),
                },
                PlayerConfig {
                    name: "B".to_string(),
                    pool: "0d6".to_string(),
                },
            ],
            ..seeded()
        };
        let (_, out) = run(&config, "\nno\n");
        assert!(out.contains("A ties with B with a total of 0 (0d6, [])\n"));
        assert!(out.contains("B ties with A with a total of 0 (0d6, [])\n"));
    }

    #[test]
    fn three_way_battle_lists_losers_after_winner() {
        let mut config = seeded();
        config.players.push(PlayerConfig {
            name: "Player 3".to_string(),
            pool: "0d6".to_string(),
        });
        let (_, out) = run(&config, "\nno\n");
        assert!(out.contains("Player 3 loses with a total of 0 (0d6, [])"));
    }

    #[test]
    fn advantage_mode_keeps_pool_size() {
        let config = BattleConfig {
            mode: RollMode::Advantage,
            ..seeded()
        };
        let (_, out) = run(&config, "\nno\n");
        // Only the kept dice are shown, and they add up to the total.
        for line in out.lines().filter(|l| l.contains("a total of ")) {
            let rest = line.split("a total of ").nth(1).unwrap();
            let (total, shown) = rest.split_once(" (").unwrap();
            let total: u32 = total.parse().unwrap();
            let listed = shown
                .strip_prefix("5d6, [")
                .and_then(|v| v.strip_suffix("])"))
                .unwrap_or_else(|| panic!("unexpected pool in {line:?}"));
            let values: Vec<u32> = listed.split(", ").map(|v| v.parse().unwrap()).collect();
            assert_eq!(values.len(), 5);
            assert_eq!(values.iter().sum::<u32>(), total);
        }
        assert!(!out.contains("6d6"));
    }

    #[test]
    fn log_file_records_header_rolls_and_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battle.ndjson");
        let config = BattleConfig {
            log_path: Some(path.to_string_lossy().into_owned()),
            ..seeded()
        };
        let (rounds, _) = run(&config, "\n\nno\n");
        assert_eq!(rounds, 2);

        let events = dice_logging::read_events_lenient(&path).unwrap();
        let kinds: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();
        assert_eq!(
            kinds,
            vec!["run_header", "roll", "roll", "battle_round", "roll", "roll", "battle_round"]
        );
        assert_eq!(events[0]["seed"], 7);
        assert_eq!(events[3]["round"], 1);
        assert_eq!(events[1]["rolled"].as_array().unwrap().len(), 5);
    }
}
