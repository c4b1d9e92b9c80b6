//! Browser bindings
//!
//! The page owns the canvas, the render loop and audio playback. It forwards
//! key, touch and click events here, calls `frame()` from
//! `requestAnimationFrame`, and renders the returned JSON snapshot.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::SoundEffect;
use crate::hud::{StabilityLabel, format_score, level_progress, points_to_next_level};
use crate::persistence::GameKind;
use crate::platform::input::{SwipeTracker, canvas_to_ground, direction_for_key};
use crate::platform::storage::LocalStore;
use crate::platform::time::clock_seed;
use crate::session::Session;
use crate::sim::{Game, GameEvent, RunnerGame, Snapshot, StackerGame};

/// Install the panic hook and console logger once per page
fn init_logging() {
    console_error_panic_hook::set_once();
    // A second game on the same page hits an already-set logger
    let _ = console_log::init_with_level(log::Level::Info);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Cue {
    asset: &'static str,
    volume: f32,
}

impl From<SoundEffect> for Cue {
    fn from(effect: SoundEffect) -> Self {
        Self {
            asset: effect.asset(),
            volume: effect.volume(),
        }
    }
}

/// Everything the page needs after one frame
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Frame {
    snapshot: Snapshot,
    score_text: String,
    next_level_in: u64,
    level_progress: f32,
    events: Vec<GameEvent>,
    sounds: Vec<Cue>,
    sound_enabled: bool,
    music_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stability: Option<&'static str>,
}

fn to_js<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn frame_json<G: Game>(
    session: &mut Session<G, LocalStore>,
    level_divisor: u64,
    stability: Option<&'static str>,
) -> Result<String, JsValue> {
    let snapshot = session.snapshot();
    let settings = session.profile().settings;
    let frame = Frame {
        score_text: format_score(snapshot.score),
        next_level_in: points_to_next_level(snapshot.score, level_divisor),
        level_progress: level_progress(snapshot.score, level_divisor),
        snapshot,
        events: session.drain_events(),
        sounds: session.drain_cues().into_iter().map(Cue::from).collect(),
        sound_enabled: settings.sound_enabled,
        music_enabled: settings.music_enabled,
        stability,
    };
    to_js(&frame)
}

#[wasm_bindgen]
pub struct WebRunner {
    session: Session<RunnerGame, LocalStore>,
    swipe: SwipeTracker,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRunner {
        init_logging();
        let game = RunnerGame::new(clock_seed());
        WebRunner {
            session: Session::new(GameKind::Runner, game, LocalStore),
            swipe: SwipeTracker::default(),
        }
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    /// Returns true when the key was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        if key == " " || key.eq_ignore_ascii_case("space") {
            self.session.input_mut().collect = true;
            return true;
        }
        match direction_for_key(key) {
            Some(direction) => {
                self.session.input_mut().moves.push(direction);
                true
            }
            None => false,
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.swipe.touch_start(x, y);
    }

    pub fn touch_end(&mut self, x: f32, y: f32) {
        if let Some(direction) = self.swipe.touch_end(x, y) {
            self.session.input_mut().moves.push(direction);
        }
    }

    pub fn click(&mut self) {
        self.session.input_mut().collect = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.session.input_mut().idle_mode = idle;
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.session.set_player_name(name);
    }

    pub fn toggle_sound(&mut self) {
        self.session.toggle_sound();
    }

    pub fn toggle_music(&mut self) {
        self.session.toggle_music();
    }

    pub fn leaderboard(&self) -> Result<String, JsValue> {
        to_js(&self.session.profile().leaderboard)
    }

    /// Advance by `dt` seconds and return the frame as JSON
    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        self.session.update(dt);
        let divisor = self.session.game().tuning.level_divisor;
        frame_json(&mut self.session, divisor, None)
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
    }
}

impl Default for WebRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct WebTower {
    session: Session<StackerGame, LocalStore>,
}

#[wasm_bindgen]
impl WebTower {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebTower {
        init_logging();
        let game = StackerGame::new(clock_seed());
        WebTower {
            session: Session::new(GameKind::Tower, game, LocalStore),
        }
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    /// Click/tap on the canvas, in CSS pixels
    pub fn click(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let extent = self.session.game().tuning.placement_extent;
        let point = canvas_to_ground(x, y, width, height, extent);
        self.session.input_mut().place = Some(point);
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.session.set_player_name(name);
    }

    pub fn toggle_sound(&mut self) {
        self.session.toggle_sound();
    }

    pub fn toggle_music(&mut self) {
        self.session.toggle_music();
    }

    pub fn leaderboard(&self) -> Result<String, JsValue> {
        to_js(&self.session.profile().leaderboard)
    }

    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        self.session.update(dt);
        let height = self.session.game().tower().len();
        let label = StabilityLabel::for_height(height).as_str();
        let divisor = self.session.game().tuning.level_divisor;
        frame_json(&mut self.session, divisor, Some(label))
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
    }
}

impl Default for WebTower {
    fn default() -> Self {
        Self::new()
    }
}
