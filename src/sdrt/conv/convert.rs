use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::sdrt::conv::derive::{DerivedPlaylist, derive_playlist};
use crate::sdrt::conv::error::{Result, ToolError};
use crate::sdrt::conv::io::playlist_read::parse_playlist;
use crate::sdrt::conv::io::{EmitSummary, csv_write, tsv_write};
use crate::sdrt::conv::model::Playlist;

/// Playlist read when no input path is given.
pub const DEFAULT_INPUT: &str = "default.xml";
/// Default path of the talkgroup names table.
pub const DEFAULT_NAMES_PATH: &str = "tgs.tsv";
/// Default path of the whitelist table.
pub const DEFAULT_WHITELIST_PATH: &str = "wl.tsv";

/// Where the playlist document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Reads the whole document into memory.
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            InputSource::Stdin => read_all(io::stdin().lock()),
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(ToolError::MissingInput(path.clone()));
                }
                Ok(fs::read(path)?)
            }
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Paths of the two TSV tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvTargets {
    pub names: PathBuf,
    pub whitelist: PathBuf,
}

impl Default for TsvTargets {
    fn default() -> Self {
        Self {
            names: PathBuf::from(DEFAULT_NAMES_PATH),
            whitelist: PathBuf::from(DEFAULT_WHITELIST_PATH),
        }
    }
}

/// Destination of the CSV table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTarget {
    Stdout,
    File(PathBuf),
}

/// Output families requested for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSelection {
    pub tsv: Option<TsvTargets>,
    pub csv: Option<CsvTarget>,
}

impl OutputSelection {
    /// Rejects a selection that would produce nothing.
    pub fn validate(&self) -> Result<()> {
        if self.tsv.is_none() && self.csv.is_none() {
            return Err(ToolError::NoOutputMode);
        }
        Ok(())
    }
}

/// What a run produced, per output family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub alias_count: usize,
    pub tsv: Option<EmitSummary>,
    pub csv: Option<EmitSummary>,
}

/// Drains a reader such as standard input.
pub fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Parses a playlist streamed from any reader.
pub fn load_playlist_from<R: Read>(reader: R) -> Result<Playlist> {
    parse_playlist(&read_all(reader)?)
}

/// Reads and parses the playlist.
#[instrument(level = "debug", skip_all, fields(input = %source))]
pub fn load_playlist(source: &InputSource) -> Result<Playlist> {
    let bytes = source.read()?;
    parse_playlist(&bytes)
}

/// Runs a full conversion: parse, derive, then write every selected output.
///
/// The selection is validated before the input is touched. Sinks are opened
/// only after the document parsed successfully.
#[instrument(level = "info", skip_all, fields(input = %source))]
pub fn run(source: &InputSource, outputs: &OutputSelection) -> Result<ConversionReport> {
    outputs.validate()?;

    let playlist = load_playlist(source)?;
    info!(alias_count = playlist.aliases.len(), "parsed playlist");
    let derived = derive_playlist(&playlist);

    let mut report = ConversionReport {
        alias_count: playlist.aliases.len(),
        ..ConversionReport::default()
    };

    if let Some(targets) = &outputs.tsv {
        report.tsv = Some(write_tsv_files(&derived, targets)?);
    }
    if let Some(target) = &outputs.csv {
        report.csv = Some(write_csv_target(&derived, target)?);
    }

    Ok(report)
}

/// Creates both TSV files and fills them.
#[instrument(
    level = "info",
    skip_all,
    fields(names = %targets.names.display(), whitelist = %targets.whitelist.display())
)]
pub fn write_tsv_files(derived: &DerivedPlaylist<'_>, targets: &TsvTargets) -> Result<EmitSummary> {
    let names = create_output(&targets.names)?;
    let whitelist = create_output(&targets.whitelist)?;
    let summary = tsv_write::write_tsv(derived, names, whitelist)?;
    info!(
        names = summary.rows,
        whitelist = summary.whitelist_rows,
        skipped = summary.skipped.len(),
        "wrote TSV tables"
    );
    Ok(summary)
}

/// Writes the CSV table to a file or to standard output.
#[instrument(level = "info", skip_all, fields(?target))]
pub fn write_csv_target(derived: &DerivedPlaylist<'_>, target: &CsvTarget) -> Result<EmitSummary> {
    let summary = match target {
        CsvTarget::Stdout => {
            let stdout = io::stdout();
            csv_write::write_csv(derived, BufWriter::new(stdout.lock()))?
        }
        CsvTarget::File(path) => csv_write::write_csv(derived, create_output(path)?)?,
    };
    info!(
        rows = summary.rows,
        skipped = summary.skipped.len(),
        "wrote CSV table"
    );
    Ok(summary)
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ToolError::OpenOutput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
