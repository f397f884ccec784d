use std::collections::HashSet;

use super::{Realm, guardian_intro};

/// Pages through a realm's intro dialogue one line at a time.
#[derive(Debug, Clone)]
pub struct DialogueCursor {
    lines: &'static [&'static str],
    index: usize,
}

impl DialogueCursor {
    pub fn for_realm(realm_id: &str) -> Self {
        Self {
            lines: guardian_intro(realm_id),
            index: 0,
        }
    }

    /// Line being shown, `None` once the dialogue is over.
    pub fn current(&self) -> Option<&'static str> {
        self.lines.get(self.index).copied()
    }

    /// Move to the next line and return it.
    pub fn advance(&mut self) -> Option<&'static str> {
        if self.index < self.lines.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.lines.len()
    }

    /// One-based line number and line count, for "2/4" style counters.
    pub fn progress(&self) -> (usize, usize) {
        let len = self.lines.len();
        ((self.index + 1).min(len), len)
    }
}

/// Remembers which realms the player has entered so the intro plays only on
/// the first visit.
#[derive(Debug, Clone, Default)]
pub struct RealmVisits {
    seen: HashSet<Realm>,
}

impl RealmVisits {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh intro cursor on first entry, `None` on later ones.
    pub fn enter(&mut self, realm: Realm) -> Option<DialogueCursor> {
        self.seen
            .insert(realm)
            .then(|| DialogueCursor::for_realm(realm.id()))
    }

    pub fn has_visited(&self, realm: Realm) -> bool {
        self.seen.contains(&realm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_intro_in_order() {
        let mut cursor = DialogueCursor::for_realm("bios");
        let intro = guardian_intro("bios");
        let mut shown = Vec::new();
        while let Some(line) = cursor.current() {
            shown.push(line);
            cursor.advance();
        }
        assert_eq!(shown, intro);
        assert!(cursor.is_finished());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.progress(), (intro.len(), intro.len()));
    }

    #[test]
    fn unknown_realm_pages_fallback() {
        let mut cursor = DialogueCursor::for_realm("nowhere");
        assert_eq!(cursor.current(), Some("..."));
        assert_eq!(cursor.advance(), Some("Bienvenido, Resonador."));
        assert_eq!(cursor.progress(), (2, 3));
    }

    #[test]
    fn intro_only_on_first_visit() {
        let mut visits = RealmVisits::new();
        assert!(!visits.has_visited(Realm::Terra));
        assert!(visits.enter(Realm::Terra).is_some());
        assert!(visits.has_visited(Realm::Terra));
        assert!(visits.enter(Realm::Terra).is_none());
        assert!(visits.enter(Realm::Logos).is_some());
    }
}
