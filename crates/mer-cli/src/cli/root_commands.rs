use clap::{Args, Subcommand};

/// Root subcommands for the `mrd` binary.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ensure an annotation exists, creating it only when no match is found
    Publish(AnnotateArgs),
    /// Look up annotations matching an identity without writing anything
    Search(AnnotateArgs),
}

/// Annotation identity arguments shared by `publish` and `search`.
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Annotation text
    #[arg(long)]
    pub text: String,

    /// Tag to attach (repeatable); the automation marker tag is always added
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Event start, epoch seconds (defaults to now)
    #[arg(long)]
    pub start: Option<i64>,

    /// Event end, epoch seconds; makes this a region annotation
    #[arg(long)]
    pub end: Option<i64>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection overrides; config supplies anything not given here.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Grafana base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Basic auth username
    #[arg(long)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long)]
    pub password: Option<String>,

    /// Bearer token (API key or service account token)
    #[arg(long)]
    pub token: Option<String>,
}
