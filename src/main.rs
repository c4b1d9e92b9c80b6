//! Skill Arcade entry point
//!
//! The browser build is driven from JavaScript through `skill_arcade::web`.
//! Natively this runs a headless demo of either game with a file-backed
//! profile, which is handy for balancing and for checking saves.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use skill_arcade::consts::SIM_DT;
    use skill_arcade::hud::{StabilityLabel, format_score};
    use skill_arcade::platform::storage::{FileStore, KeyValueStore, MemoryStore};
    use skill_arcade::platform::time::clock_seed;
    use skill_arcade::sim::{Game, GameEvent, GamePhase, RunnerGame, StackerGame};
    use skill_arcade::{GameKind, Session};

    /// Frames between automatic drops in the tower demo
    const DROP_INTERVAL: u32 = 30;
    /// How far a demo drop may miss the block below, per axis
    const DROP_JITTER: f32 = 0.6;

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Mode {
        Runner,
        Stacker,
    }

    #[derive(Parser)]
    #[command(name = "skill-arcade")]
    #[command(about = "Headless demo of the Skill Runner and Skill Tower games")]
    struct Cli {
        /// Which game to play
        #[arg(value_enum, default_value_t = Mode::Runner)]
        game: Mode,
        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds before giving up
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
        /// JSON file holding high scores, leaderboard and settings
        #[arg(long)]
        save: Option<PathBuf>,
        /// Name recorded on the leaderboard
        #[arg(long, default_value = "Player")]
        name: String,
    }

    pub fn run() {
        let cli = Cli::parse();
        let seed = cli.seed.unwrap_or_else(clock_seed);
        log::info!("Skill Arcade demo: {:?}, seed {}", cli.game, seed);

        match &cli.save {
            Some(path) => match FileStore::open(path) {
                Ok(store) => play(&cli, seed, store),
                Err(e) => {
                    log::warn!("Could not open {}: {e}; scores kept in memory", path.display());
                    play(&cli, seed, MemoryStore::new());
                }
            },
            None => play(&cli, seed, MemoryStore::new()),
        }
    }

    fn play<S: KeyValueStore>(cli: &Cli, seed: u64, store: S) {
        let frames = (cli.seconds.max(0.0) / SIM_DT) as u32;
        match cli.game {
            Mode::Runner => {
                let mut session = Session::new(GameKind::Runner, RunnerGame::new(seed), store);
                session.set_player_name(cli.name.as_str());
                session.input_mut().idle_mode = true;
                session.start();
                drive(&mut session, frames, |_, _| {});
                report(&session, None);
            }
            Mode::Stacker => {
                let mut session = Session::new(GameKind::Tower, StackerGame::new(seed), store);
                session.set_player_name(cli.name.as_str());
                session.start();
                let mut hand = Pcg32::seed_from_u64(seed.wrapping_add(1));
                drive(&mut session, frames, |session, frame| {
                    if !frame.is_multiple_of(DROP_INTERVAL) {
                        return;
                    }
                    let target = session
                        .game()
                        .tower()
                        .last()
                        .map(|block| Vec2::new(block.position.x, block.position.z))
                        .unwrap_or(Vec2::ZERO);
                    let jitter = Vec2::new(
                        hand.random_range(-DROP_JITTER..DROP_JITTER),
                        hand.random_range(-DROP_JITTER..DROP_JITTER),
                    );
                    session.input_mut().place = Some(target + jitter);
                });
                let label = StabilityLabel::for_height(session.game().tower().len());
                report(&session, Some(label.as_str()));
            }
        }
    }

    /// Feed fixed frames until the run ends or time is up
    fn drive<G, S, F>(session: &mut Session<G, S>, frames: u32, mut before_frame: F)
    where
        G: Game,
        S: KeyValueStore,
        F: FnMut(&mut Session<G, S>, u32),
    {
        for frame in 1..=frames {
            before_frame(session, frame);
            session.update(SIM_DT);
            for event in session.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Level {level}"),
                    GameEvent::NewHighScore { score } => log::debug!("New high score {score}"),
                    GameEvent::AchievementUnlocked(a) => log::info!("{}", a.message()),
                    other => log::trace!("{other:?}"),
                }
            }
            for cue in session.drain_cues() {
                log::trace!("Sound {}", cue.asset());
            }
            if session.phase() == GamePhase::GameOver {
                log::info!("Game over after {:.1}s", frame as f32 * SIM_DT);
                break;
            }
        }
    }

    fn report<G: Game, S: KeyValueStore>(session: &Session<G, S>, stability: Option<&str>) {
        let snapshot = session.snapshot();
        println!(
            "score {}  level {}  best {}",
            format_score(snapshot.score),
            snapshot.level,
            format_score(snapshot.high_score)
        );
        if let Some(label) = stability {
            println!("tower {} blocks ({label})", snapshot.entities.len());
        }
        for (rank, entry) in session.profile().leaderboard.entries.iter().enumerate() {
            println!("{:>2}. {:<12} {}", rank + 1, entry.name, entry.score);
        }
        if !session.profile().is_persistent() {
            log::warn!("Profile was not saved");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in skill_arcade::web
}
