//! Identifier management using string interning for efficient string storage and comparison
//!
//! Node and edge ids are looked up on every render (edge endpoints, overlay
//! references), so they are interned once and compared as symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use vizkit_core::identifier::Id;
///
/// let input = Id::new("0-1");
/// let hidden = Id::new("1-3");
///
/// // Edge ids are derived from their endpoints when not given explicitly
/// let edge_id = Id::edge_between(input, hidden);
/// assert_eq!(edge_id, "0-1->1-3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Examples
    ///
    /// ```
    /// use vizkit_core::identifier::Id;
    ///
    /// let root = Id::new("root");
    /// assert_eq!(root, Id::new("root"));
    /// ```
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the deterministic id of an edge without an explicit id: `"{from}->{to}"`.
    pub fn edge_between(from: Id, to: Id) -> Self {
        let mut interner = interner();
        let name = {
            let from_str = interner.resolve(from.0).unwrap_or_default();
            let to_str = interner.resolve(to.0).unwrap_or_default();
            format!("{from_str}->{to_str}")
        };
        Self(interner.get_or_intern(name))
    }

    /// Runs `f` with the string value of this identifier.
    fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
