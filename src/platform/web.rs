//! Browser bindings
//!
//! JSON in, JSON out: the page owns presence and rendering, the swarm owns
//! the breath and the motion.

use wasm_bindgen::prelude::*;

use crate::config::SwarmConfig;
use crate::swarm::{Participant, Swarm};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the existing logger
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
    log::info!("Breath swarm starting...");
}

#[wasm_bindgen]
pub struct SwarmHandle {
    swarm: Swarm,
}

#[wasm_bindgen]
impl SwarmHandle {
    /// `config_json` may be omitted for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, local_user: Option<String>) -> Result<SwarmHandle, JsValue> {
        let config = match config_json {
            Some(json) => SwarmConfig::from_json(&json).map_err(to_js)?,
            None => SwarmConfig::default(),
        };
        let mut swarm = Swarm::new(config).map_err(to_js)?;
        swarm.set_local_user(local_user.map(Into::into));
        Ok(Self { swarm })
    }

    /// Advance one frame. `participants_json` is `[{"id", "category"}]`;
    /// returns the frame as JSON.
    pub fn frame(&mut self, participants_json: &str, now_ms: f64, dt: f32) -> Result<String, JsValue> {
        let participants: Vec<Participant> = serde_json::from_str(participants_json).map_err(to_js)?;
        let frame = self.swarm.frame(&participants, now_ms / 1000.0, dt);
        serde_json::to_string(&frame).map_err(to_js)
    }

    /// Breath state alone, for UI that doesn't draw the swarm
    pub fn breath(&self, now_ms: f64) -> Result<String, JsValue> {
        serde_json::to_string(&self.swarm.breath_state(now_ms / 1000.0)).map_err(to_js)
    }

    pub fn reconfigure(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = SwarmConfig::from_json(config_json).map_err(to_js)?;
        self.swarm.reconfigure(config).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setLocalUser)]
    pub fn set_local_user(&mut self, id: Option<String>) {
        self.swarm.set_local_user(id.map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.swarm.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.swarm.is_empty()
    }
}
