//! Browser bindings
//!
//! The page owns the canvas/SVG and the animation frame loop; it forwards
//! pointer events here, calls `tick` once per frame, and draws the JSON
//! frame snapshot.

use wasm_bindgen::prelude::*;

use crate::highscores::{HighScoreRecord, LocalStorageStore, load_high_score, save_high_score};
use crate::sim::{GameEvent, GamePhase, GameState, Gesture, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Ignore double-init when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pocketball starting...");
}

/// Game instance driven by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    store: LocalStorageStore,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// New game; `tuning_json` may override any subset of the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json.as_deref() {
            Some(json) => Tuning::from_json(json).unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let store = LocalStorageStore;
        let high_score = load_high_score(&store);
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::new(tuning, seed, high_score),
            store,
            input: TickInput::default(),
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.gestures.push(Gesture::Start(glam::Vec2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.gestures.push(Gesture::Move(glam::Vec2::new(x, y)));
    }

    pub fn pointer_up(&mut self) {
        self.input.gestures.push(Gesture::End);
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    /// Run one simulation tick; call once per animation frame
    pub fn tick(&mut self) {
        let input = std::mem::take(&mut self.input);
        for event in tick(&mut self.state, &input) {
            if let GameEvent::GameOver {
                score,
                new_high_score: true,
            } = event
            {
                let record = HighScoreRecord {
                    score,
                    round: self.state.round,
                };
                if let Err(e) = save_high_score(&mut self.store, record) {
                    log::warn!("{}", e);
                }
            }
        }
    }

    /// Whether the page should keep scheduling frames at full rate
    pub fn is_animating(&self) -> bool {
        !matches!(self.state.phase, GamePhase::Idle | GamePhase::GameOver)
    }

    /// Current frame as JSON for the renderer
    pub fn frame_json(&self) -> String {
        serde_json::to_string(&self.state.frame()).unwrap_or_else(|e| {
            log::error!("frame serialization failed: {}", e);
            String::from("null")
        })
    }
}
