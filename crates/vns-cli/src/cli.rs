use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vns",
    about = "Verified Name Store: signed name records pointing into content-addressed storage",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Record table file (overrides the config file)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Content directory used by `resolve` and `put` (overrides the config file)
    #[arg(long, global = true)]
    pub content_root: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the link stored for an identifier
    Get(GetArgs),
    /// Store a signed link for an identifier
    Set(SetArgs),
    /// Fetch the content behind an identifier's link
    Resolve(ResolveArgs),
    /// List every record in the table
    List(ListArgs),
    /// Run a name-record-get or name-record-set request
    Request(RequestArgs),
    /// Generate a key pair and print its identifier
    Keygen(KeygenArgs),
    /// Sign a link with a secret key
    Sign(SignArgs),
    /// Copy a file into the content directory and print its link
    Put(PutArgs),
}

#[derive(Args)]
pub struct GetArgs {
    /// Identifier, `<name>:<hex public key>`
    pub uid: String,
}

#[derive(Args)]
pub struct SetArgs {
    /// Identifier, `<name>:<hex public key>`
    pub uid: String,
    #[arg(long)]
    pub link: String,
    /// Hex signature over the link
    #[arg(long)]
    pub sig: String,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub uid: String,
    /// Write content here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct RequestArgs {
    #[arg(long = "request-type")]
    pub request_type: String,
    #[arg(long, default_value = "")]
    pub uid: String,
    #[arg(long = "ipfs-link", default_value = "")]
    pub link: String,
    #[arg(long, default_value = "")]
    pub sig: String,
}

#[derive(Args)]
pub struct KeygenArgs {
    /// Name to embed in the identifier
    pub name: String,
}

#[derive(Args)]
pub struct SignArgs {
    /// Hex secret key printed by `keygen`
    #[arg(long)]
    pub secret: String,
    pub link: String,
}

#[derive(Args)]
pub struct PutArgs {
    pub path: PathBuf,
}
