use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use ksuid::Ksuid;

/// How each ID is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// The 27-character base62 string.
    #[default]
    String,
    /// A multi-line breakdown of representations and components.
    Inspect,
    /// The embedded time in UTC.
    Time,
    /// The embedded timestamp as seconds since the KSUID epoch.
    Timestamp,
    /// The 16 payload bytes, unencoded.
    Payload,
    /// The 20 ID bytes, unencoded.
    Raw,
}

/// Command line arguments for the `ksuid` binary.
///
/// With no positional IDs, generates `--count` fresh IDs. Otherwise parses
/// each positional argument as a base62 KSUID and prints it in the requested
/// format.
#[derive(Parser, Debug, Clone)]
#[command(name = "ksuid", version, about = "Generate and inspect KSUIDs")]
pub struct CliArgs {
    /// Number of IDs to generate when no IDs are given.
    ///
    /// Environment variable: `KSUID_COUNT`
    #[arg(short = 'n', long, env = "KSUID_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Output format.
    ///
    /// Environment variable: `KSUID_FORMAT`
    #[arg(short, long, env = "KSUID_FORMAT", value_enum, default_value_t = Format::String)]
    pub format: Format,

    /// Prefix every output with the ID it describes.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Existing IDs to print instead of generating new ones.
    pub ids: Vec<String>,
}

/// What the binary should do, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Generate this many fresh IDs.
    Generate(usize),
    /// Print these parsed IDs.
    Parsed(Vec<Ksuid>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub format: Format,
    pub verbose: bool,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let source = if args.ids.is_empty() {
            if args.count == 0 {
                bail!("KSUID_COUNT must be greater than 0");
            }
            Source::Generate(args.count)
        } else {
            let ids = args
                .ids
                .iter()
                .map(|s| Ksuid::decode(s).with_context(|| format!("invalid KSUID {s:?}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Source::Parsed(ids)
        };

        Ok(Self {
            source,
            format: args.format,
            verbose: args.verbose,
        })
    }
}
