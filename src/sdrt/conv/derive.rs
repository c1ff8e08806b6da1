//! Effective priority derivation.
//!
//! The parsed [`Playlist`] is never modified. Derivation produces a separate
//! [`DerivedPlaylist`] that pairs each alias with its effective priority, and
//! every emitter works from that view.

use tracing::debug;

use crate::sdrt::conv::model::{Alias, Playlist};

/// Priority value meaning "leave this alias out of the whitelist".
pub const EXCLUDE_FROM_WHITELIST: i64 = -1;

/// An alias paired with its effective priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAlias<'a> {
    pub alias: &'a Alias,
    pub priority: i64,
}

impl DerivedAlias<'_> {
    /// Whether this alias contributes whitelist rows.
    pub fn whitelisted(&self) -> bool {
        self.priority != EXCLUDE_FROM_WHITELIST
    }

    /// Priority column for the names table, present only for a real
    /// (non-zero, non-sentinel) priority.
    pub fn names_priority(&self) -> Option<i64> {
        match self.priority {
            0 | EXCLUDE_FROM_WHITELIST => None,
            priority => Some(priority),
        }
    }
}

/// Playlist view ready for emission, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPlaylist<'a> {
    pub aliases: Vec<DerivedAlias<'a>>,
}

/// The last non-zero id priority of the alias, or 0 when there is none.
pub fn effective_priority(alias: &Alias) -> i64 {
    alias
        .tgids
        .iter()
        .rev()
        .map(|tgid| tgid.priority)
        .find(|priority| *priority != 0)
        .unwrap_or(0)
}

/// Derives the effective priority of every alias.
pub fn derive_playlist(playlist: &Playlist) -> DerivedPlaylist<'_> {
    let aliases: Vec<DerivedAlias<'_>> = playlist
        .aliases
        .iter()
        .map(|alias| DerivedAlias {
            alias,
            priority: effective_priority(alias),
        })
        .collect();

    let prioritised = aliases.iter().filter(|derived| derived.priority != 0).count();
    debug!(
        alias_count = aliases.len(),
        prioritised, "alias priorities derived"
    );

    DerivedPlaylist { aliases }
}
