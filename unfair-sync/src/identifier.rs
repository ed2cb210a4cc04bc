//! Process-wide unique identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next value to hand out. Starts at zero and is never reset.
static NEXT_IDENTIFIER: AtomicU64 = AtomicU64::new(0);

/// Returns a value never returned before in this process.
///
/// Safe to call from any number of threads without setup. Concurrent
/// callers receive values in the order the atomic increment resolves.
///
/// # Examples
///
/// ```rust
/// let a = unfair_sync::next_identifier();
/// let b = unfair_sync::next_identifier();
/// assert_ne!(a, b);
/// ```
pub fn next_identifier() -> u64 {
    NEXT_IDENTIFIER.fetch_add(1, Ordering::Relaxed)
}

/// A typed identifier drawn from [`next_identifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(u64);

impl Identifier {
    /// Draws a fresh identifier.
    pub fn next() -> Self {
        Self(next_identifier())
    }

    /// Returns the raw value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<Identifier> for u64 {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
