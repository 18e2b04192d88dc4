//! Hand Dodge entry point
//!
//! Headless native runner: drives the engine from a simulated 60 Hz display
//! clock, with a scripted hand that tries to dodge the nearest obstacle.
//!
//! Usage: `hand-dodge [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use hand_dodge::input::{Gesture, GestureFeed, InputError};
    use hand_dodge::{Engine, GameConfig, Snapshot};

    /// Simulated display refresh interval (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Pick a hand pose that steers away from the most threatening obstacle
    fn autopilot(snapshot: &Snapshot) -> Gesture {
        let actor = &snapshot.actor;
        let center = actor.pos.x + actor.size.x / 2.0;
        let threat = snapshot
            .obstacles
            .iter()
            .filter(|o| o.pos.y + o.size.y > actor.pos.y - 150.0 && o.pos.y < actor.pos.y + actor.size.y)
            .filter(|o| o.pos.x < actor.pos.x + actor.size.x + 20.0 && o.pos.x + o.size.x > actor.pos.x - 20.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match threat {
            // Tilt away from the obstacle's center
            Some(o) if o.pos.x + o.size.x / 2.0 >= center => Gesture::from_hand(0.5, 0.2),
            Some(_) => Gesture::from_hand(0.5, 0.8),
            None => Gesture::from_hand(0.5, 0.5),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => GameConfig::load_or_default(path),
            None => GameConfig::default(),
        };
        let seed = match args.next() {
            Some(seed) => seed.parse::<u64>()?,
            None => 0x5EED,
        };

        let mut engine = Engine::new(config, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        let mut now = 0.0;
        let mut request = engine.start_game(now).ok_or("engine was not idle")?;

        // The hand tracker reads the latest frame the renderer saw
        let latest = std::rc::Rc::new(std::cell::RefCell::new(engine.snapshot()));
        let source = {
            let latest = latest.clone();
            move || -> Result<Gesture, InputError> { Ok(autopilot(&latest.borrow())) }
        };
        let mut feed = GestureFeed::new(source, engine.controls());

        for frame in 0..MAX_FRAMES {
            now += FRAME_MS;
            // Tracker runs at half the display rate
            if frame % 2 == 0 {
                feed.pump();
            }
            if engine.on_frame(request, now).is_none() {
                break;
            }
            *latest.borrow_mut() = engine.snapshot();
            match engine.pending_frame() {
                Some(next) => request = next,
                None => break,
            }
            if frame % 600 == 0 {
                let snapshot = latest.borrow();
                let life = &snapshot.lifecycle;
                log::info!(
                    "score {} level {} lives {} ({})",
                    life.score,
                    life.level,
                    life.lives,
                    life.survival_clock()
                );
            }
        }

        let snapshot = engine.snapshot();
        log::info!(
            "Run finished: score {}, level {}, survived {}",
            snapshot.lifecycle.score,
            snapshot.lifecycle.level,
            snapshot.lifecycle.survival_clock()
        );
        println!("{}", snapshot.to_json()?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hand Dodge (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds embed the library directly
}
