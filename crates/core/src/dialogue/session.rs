use resonador_protocol::{RenderCommand, Viewport};

use super::{DialogueCursor, GuardianRecord, Realm, RealmVisits, guardian};
use crate::views::{render_dialogue_box, render_realm_tabs};

/// Shown once the intro for the current realm is over.
pub const IDLE_LINE: &str = "...";

/// The player's place in the dialogue: current realm, intro progress and
/// the last hint drawn. Hosts feed it input and draw [`commands`].
///
/// [`commands`]: DialogueSession::commands
#[derive(Debug, Clone)]
pub struct DialogueSession {
    realm: Realm,
    visits: RealmVisits,
    cursor: Option<DialogueCursor>,
    hint: Option<&'static str>,
}

impl DialogueSession {
    pub fn new(realm: Realm) -> Self {
        let mut session = Self {
            realm,
            visits: RealmVisits::new(),
            cursor: None,
            hint: None,
        };
        session.enter(realm);
        session
    }

    pub fn realm(&self) -> Realm {
        self.realm
    }

    pub fn guardian(&self) -> &'static GuardianRecord {
        guardian(self.realm)
    }

    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    pub fn in_intro(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn current_line(&self) -> &'static str {
        self.cursor
            .as_ref()
            .and_then(DialogueCursor::current)
            .unwrap_or(IDLE_LINE)
    }

    /// Switch realm. The intro starts over only on the first visit; any
    /// shown hint is cleared.
    pub fn enter(&mut self, realm: Realm) {
        self.realm = realm;
        self.cursor = self.visits.enter(realm);
        self.hint = None;
        tracing::debug!(%realm, intro = self.cursor.is_some(), "entered realm");
    }

    /// Step `offset` places through `Realm::ALL`, wrapping at both ends.
    pub fn cycle(&mut self, offset: isize) {
        self.enter(self.realm.offset(offset));
    }

    /// Next intro line. Past the last one the box falls back to
    /// [`IDLE_LINE`].
    pub fn advance(&mut self) {
        if let Some(cursor) = self.cursor.as_mut()
            && cursor.advance().is_none()
        {
            self.cursor = None;
        }
    }

    pub fn show_hint(&mut self, hint: Option<&'static str>) {
        self.hint = hint;
    }

    /// Realm tabs and the dialogue box, back to front.
    pub fn commands(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = render_realm_tabs(self.realm, viewport);
        commands.extend(render_dialogue_box(
            self.guardian(),
            self.current_line(),
            self.hint,
            viewport,
        ));
        commands
    }
}
