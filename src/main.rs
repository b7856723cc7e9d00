//! Star Catcher headless runner
//!
//! Plays a scripted run against the simulation core and prints the final
//! frame as JSON. Usage: `star-catcher [config.json] [seconds] [strict|lenient]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Catcher (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use star_catcher::session::LogUi;
    use star_catcher::{FixedStepper, GameConfig, GameState, Session, TickPolicy};

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::classic(),
    };
    let seconds: f32 = match args.next() {
        Some(s) => s.parse()?,
        None => 20.0,
    };
    if let Some(s) = args.next() {
        config.tick_policy =
            TickPolicy::from_str(&s).ok_or_else(|| format!("Unknown tick policy: {s}"))?;
    }

    let mut session = Session::new(config, LogUi)?;
    let mut stepper = FixedStepper::default();

    // Simulated 60 Hz display driving the fixed-step core
    let frame_dt = 1.0 / 60.0;
    let frames = (seconds / frame_dt) as u32;
    let mut last = session.simulation().snapshot();

    'frames: for frame in 0..frames {
        let intent = scripted_intent(frame, last.player.pos.x);
        for _ in 0..stepper.advance(frame_dt) {
            last = session.update(stepper.step(), intent)?;
            if last.state == GameState::GameOver {
                break 'frames;
            }
        }
    }

    log::info!(
        "Run finished: score {}, {} respawn waves, state {:?}",
        last.score,
        last.respawn_waves,
        last.state
    );
    println!("{}", serde_json::to_string_pretty(&last)?);
    Ok(())
}

/// Sweep back and forth across the floor, hopping every second
#[cfg(not(target_arch = "wasm32"))]
fn scripted_intent(frame: u32, player_x: f32) -> star_catcher::InputIntent {
    use star_catcher::InputIntent;

    let heading_right = (frame / 240) % 2 == 0;
    let intent = if heading_right && player_x < 690.0 {
        InputIntent::right()
    } else if !heading_right && player_x > 30.0 {
        InputIntent::left()
    } else {
        InputIntent::IDLE
    };
    if frame % 60 == 0 { intent.with_jump() } else { intent }
}
