use clap::{Parser, ValueEnum};
use miette::{Context, IntoDiagnostic, Report, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use garnet_json::{diagnostic, validate, IndentWidth, ValidationResult};

#[derive(Parser)]
#[command(name = "garnet")]
#[command(about = "json validator and pretty-printer that pins down where your mistake is", long_about = None)]
struct Cli {
    /// Input file. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Spaces per indentation level in the formatted output.
    #[arg(short, long, value_enum, default_value = "2")]
    indent: IndentArg,

    /// Print a line/size/type summary to stderr after formatting.
    #[arg(short, long)]
    stats: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum IndentArg {
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
}

impl From<IndentArg> for IndentWidth {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Two => IndentWidth::Two,
            IndentArg::Four => IndentWidth::Four,
            IndentArg::Eight => IndentWidth::Eight,
        }
    }
}

fn main() -> Result<()> {
    miette::set_panic_hook();
    let cli = Cli::parse();
    let input = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read file '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .into_diagnostic()
                .wrap_err("Failed to read stdin")?;
            buf
        }
    };
    match validate(&input, cli.indent.into()) {
        ValidationResult::Valid { formatted, stats } => {
            println!("{formatted}");
            if cli.stats {
                eprintln!(
                    "{}, {} lines, {} bytes",
                    stats.type_description, stats.lines, stats.size_bytes
                );
            }
            Ok(())
        }
        ValidationResult::Invalid { message, .. } => match diagnostic::explain(&input) {
            Some(err) => Err(Report::new(err)),
            None => Err(miette::miette!("{message}")),
        },
    }
}
