use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "modelref",
    about = "Parse, validate, and format model references",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Split a name into its parts
    Parse(ParseArgs),
    /// Check whether names are valid
    Check(CheckArgs),
    /// Parse a digest and print its canonical form
    Digest(DigestArgs),
    /// Compute the sha256 digest of a file
    Hash(HashArgs),
}

#[derive(Args)]
pub struct DefaultsArgs {
    /// Do not fill in host, namespace, or tag
    #[arg(long, conflicts_with = "defaults")]
    pub no_defaults: bool,

    /// TOML file with `host`, `namespace`, and `tag` defaults
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,
}

#[derive(Args)]
pub struct ParseArgs {
    pub name: String,

    #[command(flatten)]
    pub defaults: DefaultsArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub defaults: DefaultsArgs,
}

#[derive(Args)]
pub struct DigestArgs {
    pub digest: String,
}

#[derive(Args)]
pub struct HashArgs {
    pub path: PathBuf,
}
