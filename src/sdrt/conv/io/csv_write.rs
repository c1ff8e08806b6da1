use std::io::Write;

use tracing::{debug, instrument};

use crate::sdrt::conv::derive::{DerivedAlias, DerivedPlaylist};
use crate::sdrt::conv::error::Result;
use crate::sdrt::conv::io::EmitSummary;
use crate::sdrt::conv::model::Resolved;

/// Mode column value for every row.
pub const DIGITAL_MODE: &str = "D";

/// Writes one scanner-import CSV line per resolved talkgroup id.
///
/// Columns: decimal id, hex id, mode, alpha tag, description, group tag,
/// list tag, priority. The alias name fills both the alpha tag and the
/// description. No header and no quoting.
#[instrument(level = "debug", skip_all, fields(alias_count = playlist.aliases.len()))]
pub fn write_csv<W: Write>(playlist: &DerivedPlaylist<'_>, mut out: W) -> Result<EmitSummary> {
    let mut summary = EmitSummary::default();

    for derived in &playlist.aliases {
        for tgid in &derived.alias.tgids {
            let resolved = tgid.resolve();
            if resolved == Resolved::Invalid {
                summary.skip(derived, tgid.kind());
                continue;
            }
            for id in resolved.ids() {
                write_row(&mut out, id, derived)?;
                summary.rows += 1;
            }
        }
    }

    out.flush()?;
    debug!(
        rows = summary.rows,
        skipped = summary.skipped.len(),
        "CSV table written"
    );
    Ok(summary)
}

fn write_row<W: Write>(out: &mut W, id: i64, derived: &DerivedAlias<'_>) -> Result<()> {
    let alias = derived.alias;
    writeln!(
        out,
        "{id},{hex},{DIGITAL_MODE},{name},{name},{group},{list},{priority}",
        hex = hex_id(id),
        name = alias.name,
        group = alias.group,
        list = alias.list,
        priority = derived.priority,
    )?;
    Ok(())
}

/// Uppercase hexadecimal without a prefix; negative ids keep their sign.
pub fn hex_id(id: i64) -> String {
    if id < 0 {
        format!("-{:X}", id.unsigned_abs())
    } else {
        format!("{id:X}")
    }
}
