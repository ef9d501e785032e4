//! Wordsmith command-line front end.
//!
//! Paths default to the `WORDSMITH_DICTIONARY`, `WORDSMITH_CONFIG` and
//! `WORDSMITH_SAVE` environment variables (a `.env` file is honoured); the
//! matching flags override them.
mod report;
mod selector;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordsmith_content::{ConfigLoader, DictionaryLoader, SaveLoader};
use wordsmith_core::{
    DictionaryOracle, GameConfig, GameContext, Placement, Player, Side, Team, WordEntity,
    WordRoster,
};

#[derive(Parser, Debug)]
#[command(name = "wordsmith")]
#[command(about = "Turn words into fighters and make them battle")]
#[command(version)]
struct Args {
    /// Sorted, newline-delimited dictionary word list
    #[arg(long, env = "WORDSMITH_DICTIONARY", global = true)]
    dictionary: Option<PathBuf>,

    /// TOML file overriding battle tuning
    #[arg(long, env = "WORDSMITH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Player save file
    #[arg(long, env = "WORDSMITH_SAVE", global = true)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a word's rank, stats and techniques
    Inspect {
        word: String,
        #[arg(short, long, default_value_t = GameConfig::MAX_LEVEL)]
        level: u32,
    },

    /// Add a word to the saved player, creating the save if needed
    Recruit {
        word: String,
        #[arg(short, long, default_value_t = 5)]
        level: u32,
        /// Username for a new save
        #[arg(long, default_value = "wordsmith")]
        player: String,
    },

    /// List the saved player's words
    Roster,

    /// Battle two teams with the built-in selector choosing for both sides
    Duel {
        /// Words for the users' team; the saved team is used if omitted
        words: Vec<String>,
        /// Words for the enemies' team
        #[arg(long, num_args = 1.., required = true)]
        vs: Vec<String>,
        #[arg(short, long, default_value_t = 10)]
        level: u32,
        /// Give up after this many turns
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    setup_logging();

    let context = load_context(&args)?;
    match &args.command {
        Command::Inspect { word, level } => inspect(&context, word, *level),
        Command::Recruit {
            word,
            level,
            player,
        } => recruit(&context, save_path(&args)?, word, *level, player),
        Command::Roster => roster(save_path(&args)?),
        Command::Duel {
            words,
            vs,
            level,
            max_turns,
        } => duel(context, &args, words, vs, *level, *max_turns),
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides the
/// `info` default.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_context(args: &Args) -> Result<GameContext> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let mut context = GameContext::new(config);
    if let Some(path) = &args.dictionary {
        context.install_dictionary(DictionaryLoader::load(path)?)?;
    }
    Ok(context)
}

fn save_path(args: &Args) -> Result<&Path> {
    args.save
        .as_deref()
        .context("no save file given; pass --save or set WORDSMITH_SAVE")
}

fn generate(context: &GameContext, text: &str, level: u32) -> Result<WordEntity> {
    if !context.dictionary().is_loaded() {
        bail!("no dictionary given; pass --dictionary or set WORDSMITH_DICTIONARY");
    }
    context
        .generate_word(text, level)
        .with_context(|| format!("cannot make a word from {text:?}"))
}

fn inspect(context: &GameContext, text: &str, level: u32) -> Result<()> {
    let word = generate(context, text, level)?;
    let kind = if word.is_real() { "real word" } else { "made-up word" };
    println!("{} (level {}, {kind})", word.text(), word.level());
    println!("Rank: {} (base stat total {})", word.rank(), word.base_stat_total());
    for (stat, base) in word.base_stats().iter() {
        println!("  {:<7} base {base:>3}  at level {}", stat.to_string(), word.stat(stat));
    }
    let names: Vec<&str> = word.techniques().iter().map(|t| t.name()).collect();
    println!("Techniques: {}", names.join(", "));
    Ok(())
}

fn recruit(
    context: &GameContext,
    path: &Path,
    text: &str,
    level: u32,
    username: &str,
) -> Result<()> {
    let mut player = match SaveLoader::load(path)? {
        Some(player) => player,
        None => {
            tracing::info!(player = username, "starting a new save");
            Player::new(username)?
        }
    };
    let word = generate(context, text, level)?;
    let (handle, placement) = player.add_word(word)?;
    SaveLoader::save(path, &player)?;

    let where_to = match placement {
        Placement::Team => "team",
        Placement::Storage => "storage",
    };
    let text = player.word(handle).map_or(text, |word| word.text());
    println!("{text} joins {}'s {where_to}", player.username());
    Ok(())
}

fn roster(path: &Path) -> Result<()> {
    let player =
        SaveLoader::load(path)?.ok_or_else(|| anyhow!("no save at {}", path.display()))?;
    println!("{} owns {} word(s)", player.username(), player.word_count());
    for (title, handles) in [("Team", player.team_members()), ("Storage", player.storage())] {
        println!("{title}:");
        for word in handles.iter().filter_map(|handle| player.word(*handle)) {
            println!(
                "  {:<16} lv {:>3}  rank {}  HP {}/{}",
                word.text(),
                word.level(),
                word.rank(),
                word.current_hp(),
                word.max_hp()
            );
        }
    }
    Ok(())
}

fn build_team(context: &GameContext, words: &[String], level: u32) -> Result<(WordRoster, Team)> {
    let mut roster = WordRoster::new();
    let mut handles = Vec::with_capacity(words.len());
    for text in words {
        handles.push(roster.insert(generate(context, text, level)?)?);
    }
    Ok((roster, Team::new(handles)?))
}

fn duel(
    mut context: GameContext,
    args: &Args,
    words: &[String],
    vs: &[String],
    level: u32,
    max_turns: u32,
) -> Result<()> {
    let (mut users, user_team) = if words.is_empty() {
        let path = save_path(args)?;
        let player =
            SaveLoader::load(path)?.ok_or_else(|| anyhow!("no save at {}", path.display()))?;
        (player.roster().clone(), player.team()?)
    } else {
        build_team(&context, words, level)?
    };
    let (mut enemies, enemy_team) = build_team(&context, vs, level)?;

    context.start_battle(user_team, enemy_team, &users, &enemies)?;
    let mut engine = context.engine(&mut users, &mut enemies)?;

    while !engine.battle().is_over() {
        if engine.battle().turn() > max_turns {
            tracing::warn!(max_turns, "turn limit reached, stopping");
            break;
        }
        for side in Side::BOTH {
            if engine.battle().is_over() || !engine.needs_replacement(side) {
                continue;
            }
            let index = engine
                .battle()
                .team(side)
                .first_living_bench(engine.roster(side))
                .ok_or_else(|| anyhow!("{side} have no word left to send in"))?;
            let replaced = engine.replace_fainted(side, index)?;
            for event in &replaced.events {
                println!("{}", report::describe(&engine, event));
            }
        }
        if engine.battle().is_over() {
            break;
        }

        let user_action = selector::choose(&engine, Side::Users);
        let enemy_action = selector::choose(&engine, Side::Enemies);
        let turn = engine.resolve_turn(user_action, enemy_action)?;
        println!("-- turn {} --", turn.turn);
        for event in &turn.events {
            println!("{}", report::describe(&engine, event));
        }
    }

    let outcome = engine.battle().outcome();
    println!("Result: {}", report::verdict(outcome));
    Ok(())
}
