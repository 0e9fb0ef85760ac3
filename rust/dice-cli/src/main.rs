//! dice: CLI for dice pools.
//!
//! Subcommands:
//! - battle   interactive highest-total-wins loop
//! - roll     roll one pool once

mod battle;

use std::env;
use std::io;
use std::process;

use dice_core::{BattleConfig, Chance, PoolSpec, RollCoordinator, RollMode};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!(
        r#"dice {VERSION}

USAGE:
    dice <COMMAND> [OPTIONS]

COMMANDS:
    battle    Roll pools against each other until you answer "no"
    roll      Roll a pool once and print the total
    version   Print version

Run `dice <COMMAND> --help` for command options.
"#
    );
}

fn die_with(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

/// Value following a flag, or exit with a usage error.
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => die_with(format!("Missing value for {flag}")),
    }
}

fn parse_or_exit<T: std::str::FromStr>(raw: &str, flag: &str) -> T
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .unwrap_or_else(|e| die_with(format!("Invalid {flag} value {raw:?}: {e}")))
}

fn cmd_battle(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut pool: Option<PoolSpec> = None;
    let mut seed: Option<u64> = None;
    let mut mode: Option<RollMode> = None;
    let mut log_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"dice battle

USAGE:
    dice battle [--config PATH] [--pool NdK] [--seed S] [--mode M] [--log PATH]

OPTIONS:
    --config PATH   YAML battle config (default: two players with 5d6)
    --pool NdK      Override every player's pool, e.g. 3d8
    --seed S        Base RNG seed (default: OS entropy)
    --mode M        normal | advantage | disadvantage (default: normal)
    --log PATH      Append NDJSON roll events to PATH
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(flag_value(args, i, "--config").to_string());
                i += 2;
            }
            "--pool" => {
                pool = Some(parse_or_exit(flag_value(args, i, "--pool"), "--pool"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_or_exit(flag_value(args, i, "--seed"), "--seed"));
                i += 2;
            }
            "--mode" => {
                mode = Some(parse_or_exit(flag_value(args, i, "--mode"), "--mode"));
                i += 2;
            }
            "--log" => {
                log_path = Some(flag_value(args, i, "--log").to_string());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `dice battle`: {other}");
                die_with("Run `dice battle --help` for usage.");
            }
        }
    }

    let mut config = match &config_path {
        Some(p) => BattleConfig::load(p).unwrap_or_else(|e| die_with(e)),
        None => BattleConfig::default(),
    };
    if let Some(p) = &pool {
        config.set_all_pools(p);
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(m) = mode {
        config.mode = m;
    }
    if log_path.is_some() {
        config.log_path = log_path;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    if let Err(e) = battle::run_battle(&config, &mut input, &mut out) {
        die_with(e);
    }
}

fn cmd_roll(args: &[String]) {
    let mut pool: Option<PoolSpec> = None;
    let mut seed: Option<u64> = None;
    let mut mode = RollMode::Normal;
    let mut show_face = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"dice roll

USAGE:
    dice roll <NdK> [--advantage | --disadvantage] [--seed S] [--face]

OPTIONS:
    --advantage      Roll one extra die and drop the lowest
    --disadvantage   Roll one extra die and drop the highest
    --seed S         RNG seed (default: OS entropy)
    --face           Print pip art for each kept die (d6 only)
"#
                );
                return;
            }
            "--advantage" => {
                mode = RollMode::Advantage;
                i += 1;
            }
            "--disadvantage" => {
                mode = RollMode::Disadvantage;
                i += 1;
            }
            "--seed" => {
                seed = Some(parse_or_exit(flag_value(args, i, "--seed"), "--seed"));
                i += 2;
            }
            "--face" => {
                show_face = true;
                i += 1;
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option for `dice roll`: {other}");
                die_with("Run `dice roll --help` for usage.");
            }
            other => {
                if pool.is_some() {
                    die_with(format!("Unexpected argument: {other}"));
                }
                pool = Some(parse_or_exit(other, "pool"));
                i += 1;
            }
        }
    }

    let pool = pool.unwrap_or_else(|| die_with("Missing pool, e.g. `dice roll 3d6`"));
    let chance = match seed {
        Some(s) => Chance::seeded(s),
        None => Chance::from_entropy(),
    };
    let mut roller =
        RollCoordinator::new(pool.build(chance)).unwrap_or_else(|e| die_with(e));
    let total = battle::roll_in_mode(&mut roller, mode).unwrap_or_else(|e| die_with(e));

    println!("{}", roller.dice_set().pool_line());
    if mode != RollMode::Normal {
        println!("Mode: {}", battle::mode_name(mode));
    }
    if show_face {
        for die in roller.dice_set().iter() {
            match die.render_face() {
                Ok(face) => print!("{face}"),
                Err(e) => die_with(e),
            }
        }
    }
    println!("Total: {total}");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        process::exit(1);
    }
    match args[1].as_str() {
        "battle" => cmd_battle(&args[2..]),
        "roll" => cmd_roll(&args[2..]),
        "version" | "--version" | "-V" => println!("dice {VERSION}"),
        "--help" | "-h" | "help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(1);
        }
    }
}
