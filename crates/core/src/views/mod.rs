//! Render-command builders for the dialogue UI. Hosts draw the output with
//! their own renderer.

mod dialogue_box;
mod realm_tabs;

pub use dialogue_box::{DIALOGUE_BOX_HEIGHT, HINT_PREFIX, render_dialogue_box, wrap_text};
pub use realm_tabs::{REALM_TAB_HEIGHT, realm_tab_at, render_realm_tabs};

/// Draw order of the dialogue layers. The performance overlay sits far above.
pub const DIALOGUE_DEPTH: i32 = 100;
