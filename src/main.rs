//! Arena5 entry point
//!
//! Native builds run the simulation headless with a scripted pilot, which is
//! handy for soak runs and for eyeballing the log. The browser build embeds
//! the library and drives `Arena` from its own frame callback.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use arena5::platform::Key;
    use arena5::renderer::NullSurface;
    use arena5::{Arena, Settings, highscores::FileStore};

    /// Frames simulated when `ARENA5_FRAMES` is not set
    const DEFAULT_FRAMES: u64 = 4_000;
    /// Frames between pilot decisions
    const PILOT_PERIOD: u64 = 60;

    const MOVES: [Key; 4] = [Key::W, Key::D, Key::S, Key::A];
    const AIMS: [Key; 4] = [Key::Right, Key::Down, Key::Left, Key::Up];

    /// Circles the arena while sweeping fire, and presses Space whenever the
    /// title screen is up
    struct Pilot {
        held: Vec<Key>,
    }

    impl Pilot {
        fn steer(&mut self, arena: &mut Arena) {
            let frame = arena.frame();
            if arena.game_scene().is_none() {
                if frame % PILOT_PERIOD == 0 {
                    arena.key_down(Key::Space);
                    arena.key_up(Key::Space);
                }
                return;
            }
            if frame % PILOT_PERIOD != 0 {
                return;
            }
            for key in self.held.drain(..) {
                arena.key_up(key);
            }
            let step = (frame / PILOT_PERIOD) as usize;
            self.held = vec![MOVES[step % MOVES.len()], AIMS[(step / 2) % AIMS.len()]];
            for &key in &self.held {
                arena.key_down(key);
            }
        }
    }

    pub fn run() {
        arena5::init_logging();
        let settings = Settings::load();
        let frame_ms = settings.frame_ms();

        let frames = std::env::var("ARENA5_FRAMES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let scores =
            std::env::var("ARENA5_SCORES").unwrap_or_else(|_| "arena5-scores.json".to_string());

        let (width, height) = (settings.render_width, settings.render_height);
        let mut arena = Arena::new(settings, Box::new(FileStore::new(scores)));
        let mut surface = NullSurface::new(width, height);
        let mut pilot = Pilot { held: Vec::new() };

        log::info!("Running {frames} frames headless ({frame_ms:.1} ms per frame)");
        let mut clock = 0.0;
        for _ in 0..frames {
            pilot.steer(&mut arena);
            clock += frame_ms;
            arena.tick(clock, &mut surface);

            if arena.frame() % 400 == 0 {
                let game = arena.game();
                match arena.game_scene() {
                    Some(scene) => log::info!(
                        "frame {}: wave {} score {} x{} lives {} enemies {} effects {}",
                        arena.frame(),
                        scene.waves.index() + 1,
                        game.score,
                        game.score_multiplier,
                        game.lives,
                        scene.pools.enemies.len(),
                        scene.pools.effects.len()
                    ),
                    None => log::info!("frame {}: {} scene", arena.frame(), arena.scene().name()),
                }
            }
        }

        let game = arena.game();
        log::info!(
            "Finished after {} frames: last score {}, high score {}",
            arena.frame(),
            game.lastscore,
            game.highscore
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `arena5::Arena` directly
}
