//! `spmap`: converts one SurvivalProject `.map` file per run into the
//! JSON-like text document the map tools read.
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use spmap::{DecoderOptions, NamePolicy};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod convert;
mod error;
mod prompt;

use convert::convert;
use error::CliError;
use prompt::prompt_for_map;

/// The output name is fixed rather than derived from the input.
const DEFAULT_OUTPUT: &str = "map.json";

#[derive(Parser, Debug)]
#[command(name = "spmap", version, about)]
struct Cli {
    /// Map file to convert. Prompts on stdin when omitted.
    input: Option<PathBuf>,

    /// Where to write the document.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Accepted header sentinel; repeat for several. Defaults to -1 and -11.
    #[arg(long = "sentinel", value_name = "N", allow_negative_numbers = true)]
    sentinels: Vec<i32>,

    /// Accept any header sentinel.
    #[arg(long, conflicts_with = "sentinels")]
    any_sentinel: bool,

    /// Scope of the duplicate-name check while building the document.
    #[arg(long, value_enum, default_value_t = NamePolicyArg::Siblings)]
    name_policy: NamePolicyArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum NamePolicyArg {
    Siblings,
    Document,
}

impl From<NamePolicyArg> for NamePolicy {
    fn from(value: NamePolicyArg) -> Self {
        match value {
            NamePolicyArg::Siblings => NamePolicy::Siblings,
            NamePolicyArg::Document => NamePolicy::Document,
        }
    }
}

impl Cli {
    fn decoder_options(&self) -> DecoderOptions {
        let mut options = DecoderOptions {
            name_policy: self.name_policy.into(),
            ..DecoderOptions::default()
        };
        if self.any_sentinel {
            options.accepted_sentinels.clear();
        } else if !self.sentinels.is_empty() {
            options.accepted_sentinels.clone_from(&self.sentinels);
        }
        options
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = match &cli.input {
        Some(path) => path.clone(),
        None => prompt_for_map(&mut io::stdin().lock(), &mut io::stdout().lock(), |p| {
            p.is_file()
        })?,
    };
    convert(&input, &cli.output, &cli.decoder_options())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
