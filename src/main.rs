//! Pocketball entry point
//!
//! On the web the library's `web` module is the entry point. Natively this
//! binary plays a seeded demo session headlessly and keeps the high score in
//! a JSON file.
//!
//! Usage: `pocketball [seed] [tuning.json]`
//! Set `POCKETBALL_DATA` to choose where the high score file lives.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pocketball::sim::{GameEvent, GamePhase, GameState, Gesture, TickInput, plan_shot, tick};
    use pocketball::{FileStore, HighScoreRecord, Tuning, load_high_score, save_high_score};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Hard cap so a pathological tuning can't spin forever
    const MAX_TICKS: u64 = 2_000_000;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("invalid seed {:?}, using 1", s);
            1
        }),
        None => 1,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    let data_dir = std::env::var("POCKETBALL_DATA").unwrap_or_else(|_| ".".to_string());
    let mut store = FileStore::in_dir(data_dir);
    let high_score = load_high_score(&store);

    log::info!("Pocketball (native demo) starting with seed {}", seed);
    let mut state = GameState::new(tuning, seed, high_score);
    // Separate stream so aim error doesn't perturb pocket placement
    let mut aim_rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut shots = 0u32;
    let mut cushions = 0u32;

    while state.phase != GamePhase::GameOver && state.time_ticks < MAX_TICKS {
        let mut input = TickInput::default();
        if state.phase == GamePhase::Idle {
            // Aim gets sloppier as the pocket shrinks
            let jitter = 0.02 + 0.004 * state.round as f32;
            if let Some(shot) = plan_shot(&state, &mut aim_rng, jitter) {
                input.gestures = vec![Gesture::Start(shot.start), Gesture::Move(shot.end), Gesture::End];
                shots += 1;
            }
        }

        for event in tick(&mut state, &input) {
            match event {
                GameEvent::Cushion => cushions += 1,
                GameEvent::PassOver { speed } => log::debug!("rolled over the pocket at {:.2}", speed),
                GameEvent::GameOver {
                    score,
                    new_high_score: true,
                } => {
                    let record = HighScoreRecord {
                        score,
                        round: state.round,
                    };
                    if let Err(e) = save_high_score(&mut store, record) {
                        log::warn!("{}", e);
                    }
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Session over after {} ticks: score {}, round {}, {} shots, {} cushions, high score {}",
        state.time_ticks,
        state.score,
        state.round,
        shots,
        cushions,
        state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `pocketball::web::wasm_main`
}
