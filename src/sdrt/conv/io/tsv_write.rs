use std::io::Write;

use tracing::{debug, instrument};

use crate::sdrt::conv::derive::{DerivedAlias, DerivedPlaylist};
use crate::sdrt::conv::error::Result;
use crate::sdrt::conv::io::EmitSummary;
use crate::sdrt::conv::model::Resolved;

/// Writes the talkgroup names table and the whitelist table.
///
/// Names rows are `id\tname` with a trailing `\tpriority` when the alias has
/// a real priority. Whitelist rows are `id` for single talkgroups and
/// `min\tmax` for ranges; aliases with priority -1 get no whitelist rows.
#[instrument(level = "debug", skip_all, fields(alias_count = playlist.aliases.len()))]
pub fn write_tsv<N: Write, W: Write>(
    playlist: &DerivedPlaylist<'_>,
    mut names: N,
    mut whitelist: W,
) -> Result<EmitSummary> {
    let mut summary = EmitSummary::default();

    for derived in &playlist.aliases {
        for tgid in &derived.alias.tgids {
            let resolved = tgid.resolve();
            match resolved {
                Resolved::Single(value) => {
                    if derived.whitelisted() {
                        writeln!(whitelist, "{value}")?;
                        summary.whitelist_rows += 1;
                    }
                }
                Resolved::Range { min, max } => {
                    if derived.whitelisted() {
                        writeln!(whitelist, "{min}\t{max}")?;
                        summary.whitelist_rows += 1;
                    }
                }
                Resolved::Invalid => {
                    summary.skip(derived, tgid.kind());
                    continue;
                }
                Resolved::Nothing => continue,
            }

            for id in resolved.ids() {
                write_name_row(&mut names, id, derived)?;
                summary.rows += 1;
            }
        }
    }

    names.flush()?;
    whitelist.flush()?;
    debug!(
        names = summary.rows,
        whitelist = summary.whitelist_rows,
        skipped = summary.skipped.len(),
        "TSV tables written"
    );
    Ok(summary)
}

fn write_name_row<N: Write>(names: &mut N, id: i64, derived: &DerivedAlias<'_>) -> Result<()> {
    match derived.names_priority() {
        Some(priority) => writeln!(names, "{id}\t{}\t{priority}", derived.alias.name)?,
        None => writeln!(names, "{id}\t{}", derived.alias.name)?,
    }
    Ok(())
}
