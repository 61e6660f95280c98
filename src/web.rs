//! Browser binding
//!
//! The page's script owns the canvas, overlays and key/touch listeners. It
//! sets actions on a [`WebSession`] as events arrive, calls `tick` from
//! `requestAnimationFrame`, and draws the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::sim::{InputState, Session, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Duo Pong starting...");
}

/// A session plus the input the page has reported since the last frame
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    input: InputState,
}

#[wasm_bindgen]
impl WebSession {
    /// Session with default tuning and a random seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        Self::from_session(Session::with_seed(rand::random()))
    }

    /// Session with a fixed seed
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> WebSession {
        Self::from_session(Session::with_seed(seed))
    }

    /// Session with tuning from a JSON document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(json: &str) -> Result<WebSession, JsError> {
        let tuning = Tuning::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::from_session(Session::new(tuning, rand::random())))
    }

    fn from_session(session: Session) -> WebSession {
        log::info!("Session created with seed: {}", session.seed());
        WebSession {
            session,
            input: InputState::default(),
        }
    }

    /// Record a held/released action by its logical name. Unknown names are
    /// ignored.
    #[wasm_bindgen(js_name = setAction)]
    pub fn set_action(&mut self, action: &str, pressed: bool) {
        match action {
            "moveLeftPaddleUp" => self.input.move_left_paddle_up = pressed,
            "moveLeftPaddleDown" => self.input.move_left_paddle_down = pressed,
            "moveRightPaddleUp" => self.input.move_right_paddle_up = pressed,
            "moveRightPaddleDown" => self.input.move_right_paddle_down = pressed,
            "togglePause" => self.input.toggle_pause = pressed,
            _ => log::debug!("Unknown action {}", action),
        }
    }

    /// Accumulate a touch drag (logical pixels) for one paddle
    pub fn drag(&mut self, left: bool, delta_y: f32) {
        if left {
            self.input.left_drag += delta_y;
        } else {
            self.input.right_drag += delta_y;
        }
    }

    /// Advance one frame; returns the snapshot as JSON
    pub fn tick(&mut self, dt: f32) -> Result<String, JsError> {
        let snapshot = tick(&mut self.session, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.toggle_pause = false;
        self.input.left_drag = 0.0;
        self.input.right_drag = 0.0;

        serde_json::to_string(&snapshot).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Current snapshot as JSON without advancing
    pub fn snapshot(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = start)]
    pub fn start_session(&mut self) {
        self.session.start();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.input = InputState::default();
    }

    #[wasm_bindgen(js_name = acknowledgeLevelUp)]
    pub fn acknowledge_level_up(&mut self) {
        self.session.acknowledge_level_up();
    }

    /// Desktop start/restart button
    #[wasm_bindgen(js_name = pressPrimary)]
    pub fn press_primary(&mut self) {
        self.session.press_primary();
    }

    /// Mobile pause button
    #[wasm_bindgen(js_name = pressPauseButton)]
    pub fn press_pause_button(&mut self) {
        self.session.press_pause_button();
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
