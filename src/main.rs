use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sdrt_conv::Result;
use sdrt_conv::convert::{
    self, CsvTarget, DEFAULT_INPUT, DEFAULT_NAMES_PATH, DEFAULT_WHITELIST_PATH, InputSource,
    OutputSelection, TsvTargets,
};
use sdrt_conv::logging;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert(args) => execute_convert(args),
        Command::Pipe(args) => execute_pipe(args),
    }
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    convert::run(&args.source(), &args.outputs())?;
    Ok(())
}

fn execute_pipe(args: TsvPathArgs) -> Result<()> {
    let outputs = OutputSelection {
        tsv: Some(args.targets()),
        csv: None,
    };
    convert::run(&InputSource::Stdin, &outputs)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert a radio playlist into talkgroup, whitelist, and scanner CSV tables."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report fatal errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a playlist file into the selected output tables.
    Convert(ConvertArgs),
    /// Read a playlist from standard input and write both TSV tables.
    Pipe(TsvPathArgs),
}

#[derive(clap::Args)]
struct TsvPathArgs {
    /// Talkgroup names table.
    #[arg(long = "tgs", default_value = DEFAULT_NAMES_PATH)]
    names: PathBuf,

    /// Whitelist table.
    #[arg(long = "wl", default_value = DEFAULT_WHITELIST_PATH)]
    whitelist: PathBuf,
}

impl TsvPathArgs {
    fn targets(&self) -> TsvTargets {
        TsvTargets {
            names: self.names.clone(),
            whitelist: self.whitelist.clone(),
        }
    }
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Playlist document, or `-` for standard input.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Write the talkgroup names and whitelist TSV tables.
    #[arg(long)]
    tsv: bool,

    /// Write the scanner-import CSV table.
    #[arg(long)]
    csv: bool,

    #[command(flatten)]
    paths: TsvPathArgs,

    /// CSV output file; standard output when omitted.
    #[arg(long = "rdio")]
    csv_path: Option<PathBuf>,
}

impl ConvertArgs {
    fn source(&self) -> InputSource {
        if self.input.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(self.input.clone())
        }
    }

    fn outputs(&self) -> OutputSelection {
        OutputSelection {
            tsv: self.tsv.then(|| self.paths.targets()),
            csv: self.csv.then(|| match &self.csv_path {
                Some(path) => CsvTarget::File(path.clone()),
                None => CsvTarget::Stdout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).expect("arguments parsed")
    }

    #[test]
    fn dash_input_reads_standard_input() {
        let cli = parse(&["sdrt-conv", "convert", "-", "--tsv"]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(args.source(), InputSource::Stdin);
    }

    #[test]
    fn convert_defaults_to_default_playlist_file() {
        let cli = parse(&["sdrt-conv", "convert", "--csv"]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(args.source(), InputSource::File(PathBuf::from(DEFAULT_INPUT)));
        assert_eq!(
            args.outputs(),
            OutputSelection {
                tsv: None,
                csv: Some(CsvTarget::Stdout),
            }
        );
    }

    #[test]
    fn convert_without_mode_selects_nothing() {
        let cli = parse(&["sdrt-conv", "convert", "playlist.xml"]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert!(args.outputs().validate().is_err());
    }

    #[test]
    fn pipe_uses_default_table_paths() {
        let cli = parse(&["sdrt-conv", "pipe"]);
        let Command::Pipe(args) = cli.command else {
            panic!("expected pipe subcommand");
        };
        assert_eq!(args.targets(), TsvTargets::default());
    }

    #[test]
    fn convert_honours_path_overrides() {
        let cli = parse(&[
            "sdrt-conv", "-v", "convert", "in.xml", "--tsv", "--csv", "--tgs", "n.tsv", "--wl",
            "w.tsv", "--rdio", "r.csv",
        ]);
        assert_eq!(cli.verbose, 1);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert subcommand");
        };
        assert_eq!(
            args.outputs(),
            OutputSelection {
                tsv: Some(TsvTargets {
                    names: PathBuf::from("n.tsv"),
                    whitelist: PathBuf::from("w.tsv"),
                }),
                csv: Some(CsvTarget::File(PathBuf::from("r.csv"))),
            }
        );
    }
}
