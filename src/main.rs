//! Duo Pong entry point
//!
//! Native builds run a headless autopilot match and print the final frame as
//! JSON. The browser build drives the session through `duo_pong::web`.
//!
//! Usage: `duo-pong [TUNING_JSON] [SEED]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duo_pong::consts::FRAME_DT;
    use duo_pong::sim::{SessionState, autopilot, tick};
    use duo_pong::{Session, Tuning};

    /// Simulated seconds before the demo gives up
    const DEMO_SECONDS: f32 = 600.0;

    env_logger::init();
    log::info!("Duo Pong (native demo) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Using default tuning, {} rejected: {}", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    log::info!("Session seed: {}", seed);

    let mut session = Session::new(tuning, seed);
    session.start();

    let max_frames = (DEMO_SECONDS / FRAME_DT) as u64;
    let mut frame = 0;
    let mut snapshot = session.snapshot();
    while frame < max_frames {
        let input = autopilot::drive(&snapshot);
        snapshot = tick(&mut session, &input, FRAME_DT);
        frame += 1;

        match snapshot.state {
            // Stand-in for the player closing the congrats overlay
            SessionState::RoundWon => {
                session.acknowledge_level_up();
                snapshot = session.snapshot();
            }
            SessionState::GameOver | SessionState::Victory => break,
            _ => {}
        }
    }

    log::info!(
        "Demo ended after {:.1}s: {:?}, level {}, round {}",
        frame as f32 * FRAME_DT,
        snapshot.state,
        snapshot.level,
        snapshot.round_label
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry is `duo_pong::web::start`
}
