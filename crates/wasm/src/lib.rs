mod monitor;
mod scene;

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;
use resonador_core::Realm;
use resonador_core::dialogue;
use wasm_bindgen::prelude::*;

pub use monitor::{PerfMonitor, PerfProfiler};
pub use scene::JsScene;

thread_local! {
    // Seeded from `Math.random`; the OS entropy source is not available on
    // wasm32-unknown-unknown without extra configuration.
    static HINT_RNG: RefCell<StdRng> =
        RefCell::new(StdRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64));
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Intro lines for a realm as a JSON array of strings. Unknown realms get
/// the generic greeting.
#[wasm_bindgen(js_name = getGuardianIntro)]
pub fn guardian_intro(realm_id: &str) -> Result<String, JsError> {
    serde_json::to_string(dialogue::guardian_intro(realm_id))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// A random hint for a realm, or `undefined`.
#[wasm_bindgen(js_name = getGuardianHint)]
pub fn guardian_hint(realm_id: &str) -> Option<String> {
    HINT_RNG
        .with_borrow_mut(|rng| dialogue::guardian_hint(realm_id, rng))
        .map(str::to_string)
}

/// Full guardian record as JSON.
#[wasm_bindgen(js_name = getGuardian)]
pub fn guardian(realm_id: &str) -> Result<String, JsError> {
    let realm: Realm = realm_id.parse()?;
    serde_json::to_string(dialogue::guardian(realm)).map_err(|e| JsError::new(&e.to_string()))
}

/// Ids of every realm with an authored guardian, as a JSON array.
#[wasm_bindgen(js_name = listRealms)]
pub fn list_realms() -> Result<String, JsError> {
    serde_json::to_string(&Realm::ALL).map_err(|e| JsError::new(&e.to_string()))
}
