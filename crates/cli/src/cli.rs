use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minimark")]
#[command(about = "Render markdown into preview HTML for restricted display surfaces")]
#[command(version)]
pub struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document to preview HTML
    Render(RenderArgs),
    /// Print the node tree of a document as JSON
    Ast(AstArgs),
    /// Print the stylesheet rendered output expects
    Stylesheet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Markdown source
    Markdown,
    /// JSON node array
    Json,
}

#[derive(Args)]
pub struct InputArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,

    /// Input format (detected from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit only the rendered content, without the stylesheet
    #[arg(long)]
    pub fragment: bool,

    /// JSON file with render options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render ordered lists as <ol>
    #[arg(long)]
    pub ordered_lists: bool,

    /// Attribute carrying link destinations
    #[arg(long)]
    pub link_attribute: Option<String>,

    /// Escape raw HTML instead of passing it through
    #[arg(long)]
    pub escape_html: bool,
}

#[derive(Args)]
pub struct AstArgs {
    #[command(flatten)]
    pub source: InputArgs,
}
