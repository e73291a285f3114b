//! Browser host
//!
//! Thin wasm-bindgen wrapper so any JS renderer can drive the prompt. The
//! renderer forwards input, schedules sweeps from `next_sweep_in_ms`, and
//! redraws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{InputEvent, InteractionMachine, Measurement, Size};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

#[wasm_bindgen]
pub struct ValentineWidget {
    machine: InteractionMachine,
}

#[wasm_bindgen]
impl ValentineWidget {
    /// Create a widget with settings from LocalStorage and a time-based seed
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self {
            machine: InteractionMachine::new(seed, Settings::load()),
        }
    }

    pub fn accept(&mut self) -> bool {
        self.machine.dispatch(InputEvent::Accept, js_sys::Date::now())
    }

    /// Decline. Pass the area size when it is mounted; the control size is
    /// optional and falls back to the configured default.
    pub fn decline(
        &mut self,
        area_width: Option<f32>,
        area_height: Option<f32>,
        control_width: Option<f32>,
        control_height: Option<f32>,
    ) -> bool {
        let fallback = self.machine.settings().decline_control;
        let measurement = match (area_width, area_height) {
            (Some(w), Some(h)) => Some(Measurement::new(
                Size::new(w, h),
                Size::new(
                    control_width.unwrap_or(fallback.width),
                    control_height.unwrap_or(fallback.height),
                ),
            )),
            _ => None,
        };
        self.machine
            .dispatch(InputEvent::Decline { measurement }, js_sys::Date::now())
    }

    pub fn reset(&mut self) -> bool {
        self.machine.dispatch(InputEvent::Reset, js_sys::Date::now())
    }

    pub fn sweep(&mut self) -> bool {
        self.machine.dispatch(InputEvent::Sweep, js_sys::Date::now())
    }

    /// Milliseconds until the next sweep is due, or `None` when idle
    pub fn next_sweep_in_ms(&self) -> Option<f64> {
        self.machine
            .next_sweep_at()
            .map(|at| (at - js_sys::Date::now()).max(0.0))
    }

    pub fn revision(&self) -> f64 {
        self.machine.revision() as f64
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.machine
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for ValentineWidget {
    fn default() -> Self {
        Self::new()
    }
}
