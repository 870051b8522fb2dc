//! Coin Arena Server
//!
//! Runs a seeded demo match with bot commands and checks that a replay of
//! the same commands reproduces the final state hash.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coin_arena::{
    VERSION, TICK_RATE,
    core::rng::DeterministicRng,
    game::{
        command::{Action, CommandBatch},
        config::ArenaConfig,
        events::GameEventData,
        state::{GameState, PlayerId},
        tick::{tick, replay},
    },
};

/// Ticks the demo runs for (two minutes of play).
const DEMO_TICKS: u32 = 120 * TICK_RATE;

/// Bot count in the demo arena.
const DEMO_BOTS: u8 = 8;

/// One in this many bot commands is an attack.
const ATTACK_ODDS: u32 = 400;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Coin Arena Server v{}", VERSION);

    let config = match std::env::var("COIN_ARENA_CONFIG") {
        Ok(path) => ArenaConfig::load(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => ArenaConfig::default(),
    };
    let seed = match std::env::var("COIN_ARENA_SEED") {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("COIN_ARENA_SEED is not a u64: {:?}", raw))?,
        Err(_) => 12345,
    };

    demo_match(seed, &config)
}

/// Demo function to exercise the simulation.
fn demo_match(seed: u64, config: &ArenaConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Match ===");
    info!("RNG Seed: {}", seed);
    info!("Coin target: {}", config.coin_target);

    let mut state = GameState::new(seed);
    let player_ids: Vec<PlayerId> = (0..DEMO_BOTS)
        .map(|i| PlayerId::new(format!("bot-{}", i)))
        .collect();

    for id in &player_ids {
        let pos = state.spawn_player(id.clone())?;
        info!("Added player {} at {}", id, pos);
    }
    let initial = state.clone();

    // Bots draw from their own RNG so arena randomness stays untouched.
    let mut bot_rng = DeterministicRng::new(seed ^ 0xB075);
    let frames: Vec<CommandBatch> = (0..DEMO_TICKS)
        .map(|_| bot_commands(&mut bot_rng, &player_ids))
        .collect();

    info!("Running {} ticks...", DEMO_TICKS);
    let mut total_events = 0;

    for (t, commands) in frames.iter().enumerate() {
        let result = tick(&mut state, commands, config);
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::PlayerAbsorbed { winner_id, loser_id, new_score, .. } => {
                    info!("Tick {}: {} absorbed {} (score {:.2})", t, winner_id, loser_id, new_score);
                }
                GameEventData::PlayerEliminated { victim_id, eliminated_by, .. }
                    if victim_id == eliminated_by =>
                {
                    info!("Tick {}: {} self-destructed", t, victim_id);
                }
                _ => {}
            }
        }

        if t as u32 % (10 * TICK_RATE) == 0 {
            info!(
                "Tick {}: {} alive, {} coins, {} events so far",
                t,
                state.players.len(),
                state.coins.len(),
                total_events
            );
        }

        if state.players.len() <= 1 {
            info!("Arena settled at tick {}", t);
            break;
        }
    }

    info!("=== Match Results ===");
    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    let mut standings = state.players.clone();
    standings.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (place, player) in standings.iter().enumerate() {
        info!("#{}: {} - Score: {:.2}", place + 1, player.id, player.score);
    }
    for (victim, by) in &state.eliminated_players {
        info!("Eliminated: {} by {}", victim, by);
    }
    info!("Total events: {}", total_events);

    info!("=== Verifying Determinism ===");
    let played = state.tick as usize;
    let (replayed, _) = replay(initial, &frames[..played], config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}

/// One random action per bot.
fn bot_commands(rng: &mut DeterministicRng, player_ids: &[PlayerId]) -> CommandBatch {
    const MOVES: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    player_ids
        .iter()
        .map(|id| {
            let action = if rng.next_int(ATTACK_ODDS) == 0 {
                Action::Space
            } else {
                rng.choose(&MOVES).copied().unwrap_or(Action::Up)
            };
            (id.clone(), action)
        })
        .collect()
}
