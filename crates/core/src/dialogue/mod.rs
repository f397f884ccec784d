//! Guardian personas for each realm: intro dialogue and random hints.

mod cursor;
mod session;
mod table;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cursor::{DialogueCursor, RealmVisits};
pub use session::{DialogueSession, IDLE_LINE};
pub use table::FALLBACK_INTRO;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Cosmos,
    Chaos,
    Logos,
    Atomos,
    Terra,
    Machina,
    Alchemy,
    Bios,
    Psyche,
}

impl Realm {
    pub const ALL: [Realm; 9] = [
        Realm::Cosmos,
        Realm::Chaos,
        Realm::Logos,
        Realm::Atomos,
        Realm::Terra,
        Realm::Machina,
        Realm::Alchemy,
        Realm::Bios,
        Realm::Psyche,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Realm::Cosmos => "cosmos",
            Realm::Chaos => "chaos",
            Realm::Logos => "logos",
            Realm::Atomos => "atomos",
            Realm::Terra => "terra",
            Realm::Machina => "machina",
            Realm::Alchemy => "alchemy",
            Realm::Bios => "bios",
            Realm::Psyche => "psyche",
        }
    }

    /// The realm `by` places along [`Realm::ALL`], wrapping at both ends.
    pub fn offset(self, by: isize) -> Realm {
        let len = Realm::ALL.len() as isize;
        Realm::ALL[(self as isize + by).rem_euclid(len) as usize]
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown realm: {0:?}")]
pub struct UnknownRealm(pub String);

impl FromStr for Realm {
    type Err = UnknownRealm;

    /// Exact, case-sensitive match on the realm id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Realm::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| UnknownRealm(s.to_string()))
    }
}

/// A realm's guardian persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardianRecord {
    pub name: &'static str,
    pub title: &'static str,
    /// Authoring notes; not read by the game.
    pub personality: &'static str,
    /// Lines shown in order on first entry to the realm.
    pub intro_dialogue: &'static [&'static str],
    pub hints: &'static [&'static str],
}

impl GuardianRecord {
    /// Uniform pick from the hint set; `None` when it is empty.
    pub fn hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        self.hints.choose(rng).copied()
    }
}

pub fn guardian(realm: Realm) -> &'static GuardianRecord {
    // The table holds one entry per variant in `Realm::ALL` order.
    &table::GUARDIANS[realm as usize].1
}

fn lookup(realm_id: &str) -> Option<&'static GuardianRecord> {
    realm_id.parse().ok().map(guardian)
}

/// Intro dialogue for `realm_id`, or [`FALLBACK_INTRO`] for unknown realms.
pub fn guardian_intro(realm_id: &str) -> &'static [&'static str] {
    lookup(realm_id).map_or(FALLBACK_INTRO, |g| g.intro_dialogue)
}

/// A random hint for `realm_id`. Each call draws independently, so repeats
/// are possible.
pub fn guardian_hint<R: Rng + ?Sized>(realm_id: &str, rng: &mut R) -> Option<&'static str> {
    lookup(realm_id).and_then(|g| g.hint(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn table_is_indexed_by_variant() {
        for realm in Realm::ALL {
            assert_eq!(table::GUARDIANS[realm as usize].0, realm);
        }
    }

    #[test]
    fn offset_wraps_both_ways() {
        assert_eq!(Realm::Cosmos.offset(-1), Realm::Psyche);
        assert_eq!(Realm::Psyche.offset(1), Realm::Cosmos);
        assert_eq!(Realm::Logos.offset(0), Realm::Logos);
        assert_eq!(Realm::Cosmos.offset(10), Realm::Chaos);
        assert_eq!(Realm::Chaos.offset(-19), Realm::Psyche);
    }

    #[test]
    fn realm_ids_roundtrip() {
        for realm in Realm::ALL {
            assert_eq!(realm.id().parse::<Realm>(), Ok(realm));
            assert_eq!(realm.to_string(), realm.id());
        }
        assert_eq!(
            "Cosmos".parse::<Realm>(),
            Err(UnknownRealm("Cosmos".to_string()))
        );
    }

    #[test]
    fn known_realm_returns_authored_intro() {
        let intro = guardian_intro("machina");
        assert_eq!(intro, guardian(Realm::Machina).intro_dialogue);
        assert_eq!(intro[0], "...");
    }

    #[test]
    fn unknown_realm_falls_back() {
        assert_eq!(
            guardian_intro("void"),
            [
                "...",
                "Bienvenido, Resonador.",
                "Explora este reino y encuentra su Eigenvalor."
            ]
        );
        assert_eq!(guardian_intro(""), FALLBACK_INTRO);
    }

    #[test]
    fn unknown_realm_has_no_hint() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(guardian_hint("void", &mut rng), None);
        }
    }

    #[test]
    fn empty_hint_set_yields_none() {
        let silent = GuardianRecord {
            name: "Nadie",
            title: "",
            personality: "",
            intro_dialogue: &["..."],
            hints: &[],
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(silent.hint(&mut rng), None);
    }

    #[test]
    fn realm_serializes_lowercase() {
        let json = serde_json::to_string(&Realm::Alchemy).unwrap_or_default();
        assert_eq!(json, "\"alchemy\"");
    }
}
