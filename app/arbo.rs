//! Command-line interface for arbo.
//!
//! Reads a sorted list of paths from standard input or from a listing tool and
//! prints it as a tree.

use arbo::{
    ArboBuilder, ArboError, ArboOptions, Charset, OutputFormat, PathSource, Style,
    arbo_from_source, output,
};
use clap::{Parser, ValueEnum};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::exit;

/// arbo — display a tree from a list of paths
#[derive(Parser)]
#[command(name = "arbo", version, about, long_about = None)]
struct Cli {
    /// Where paths come from
    #[arg(short, long, value_enum, default_value_t = Source::Stdin)]
    source: Source,

    /// Directory for `find` (default current dir), package names for `dpkg`
    args: Vec<String>,

    /// Standard input records are NUL-terminated
    #[arg(short = '0', long = "null")]
    null: bool,

    /// Colorize labels with `ls --color=always`
    #[arg(long)]
    color: bool,

    /// pstree-like layout
    #[arg(short, long)]
    wide: bool,

    /// Box-drawing glyphs instead of ASCII
    #[arg(long)]
    unicode: bool,

    /// Drop the first component of every path
    #[arg(long)]
    strip_leading: bool,

    /// Sort standard input before building the tree
    #[arg(long)]
    sort: bool,

    /// Path separator
    #[arg(long, default_value_t = '/')]
    separator: char,

    /// Paths per decorator invocation
    #[arg(long, default_value_t = 256)]
    batch_size: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Pretty JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Source {
    Stdin,
    Git,
    Hg,
    Bzr,
    Svn,
    Find,
    Dpkg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Json,
}

impl Cli {
    fn into_options(self) -> (ArboOptions, PathSource, Option<PathBuf>) {
        let options = ArboBuilder::new()
            .separator(self.separator)
            .zero_terminated(self.null)
            .strip_leading(self.strip_leading)
            .sort(self.sort)
            .decorate(self.color)
            .batch_size(self.batch_size)
            .style(if self.wide { Style::Wide } else { Style::Narrow })
            .charset(if self.unicode {
                Charset::Unicode
            } else {
                Charset::Ascii
            })
            .format(match self.format {
                Format::Tree => OutputFormat::Tree,
                Format::Json => OutputFormat::Json,
            })
            .pretty(self.pretty)
            .build();

        let source = match self.source {
            Source::Stdin => PathSource::Stdin,
            Source::Git => PathSource::Git,
            Source::Hg => PathSource::Hg,
            Source::Bzr => PathSource::Bzr,
            Source::Svn => PathSource::Svn,
            Source::Find => PathSource::Find {
                dir: self
                    .args
                    .first()
                    .map_or_else(|| PathBuf::from("."), PathBuf::from),
            },
            Source::Dpkg => PathSource::Dpkg {
                packages: self.args,
            },
        };

        (options, source, self.output)
    }
}

fn main() {
    let cli = Cli::parse();
    let (options, source, output_path) = cli.into_options();

    if let Err(e) = run(&options, &source, output_path) {
        eprintln!("Error: {}", e);
        exit(e.exit_code());
    }
}

fn run(
    options: &ArboOptions,
    source: &PathSource,
    output_path: Option<PathBuf>,
) -> Result<(), ArboError> {
    let tree = arbo_from_source(options, source, None)?;
    match output_path {
        Some(path) => output::write_tree_to_file(&tree, options, path),
        None => {
            let stdout = io::stdout();
            let mut handle = BufWriter::new(stdout.lock());
            output::write_tree(&tree, options, &mut handle)
        }
    }
}
