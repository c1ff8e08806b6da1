pub mod csv_write;
pub mod playlist_read;
pub mod tsv_write;

use tracing::warn;

use crate::sdrt::conv::derive::DerivedAlias;
use crate::sdrt::conv::model::TgidKind;

/// An id entry that was left out of the outputs because it lacks the fields
/// its kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Name of the alias the entry belongs to.
    pub alias: String,
    pub kind: TgidKind,
}

/// Counts reported by an emitter after a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Lines written to the primary table (names table or CSV).
    pub rows: usize,
    /// Lines written to the whitelist table. Always 0 for CSV.
    pub whitelist_rows: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl EmitSummary {
    pub(crate) fn skip(&mut self, derived: &DerivedAlias<'_>, kind: TgidKind) {
        match kind {
            TgidKind::TalkgroupRange => {
                warn!(alias = %derived.alias.name, "talkgroup range entry is missing min or max; skipping");
            }
            TgidKind::Talkgroup => {
                warn!(alias = %derived.alias.name, "talkgroup entry has no value; skipping");
            }
            other => {
                warn!(alias = %derived.alias.name, kind = %other, "entry is missing required fields; skipping");
            }
        }
        self.skipped.push(SkippedEntry {
            alias: derived.alias.name.clone(),
            kind,
        });
    }
}
