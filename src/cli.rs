use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codebot")]
#[command(about = "Snippet store and line-based code analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv)
    ///
    /// -v: info messages
    /// -vv: debug messages
    /// RUST_LOG takes precedence when set
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (skips discovery of .codebot.toml)
    #[arg(long, global = true, env = "CODEBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Snippet store file (overrides store.path from the configuration)
    #[arg(long, global = true, env = "CODEBOT_STORE")]
    pub store: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze source files for size metrics and problematic patterns
    Analyze {
        /// Files to analyze ("-" reads standard input)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Language tag (detected from the file extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Maximum body length of a function before it is reported
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        threshold: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Manage stored snippets
    Snippet {
        #[command(subcommand)]
        action: SnippetCommand,
    },

    /// Print a structured prompt for an agent
    Prompt {
        #[command(subcommand)]
        action: PromptCommand,
    },

    /// Print the guide to the snippet tools
    Guide,

    /// Initialize a codebot configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CodeSource {
    /// Code given inline
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the code from a file ("-" reads standard input)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Language regex
    #[arg(short, long)]
    pub language: Option<String>,

    /// Free-text regex
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommand {
    /// Store a new snippet
    Add {
        title: String,

        #[command(flatten)]
        source: CodeSource,

        #[arg(short, long, default_value = "python")]
        language: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Show one snippet
    Get {
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List snippets, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Tag regex (any tag may match)
        #[arg(long)]
        tag: Option<String>,

        /// Maximum number of results (defaults to store.default_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Change fields of a snippet
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        source: CodeSource,

        #[arg(short, long)]
        language: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Replace all tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete a snippet
    Delete { id: String },

    /// Search code by regular expression
    Search {
        pattern: String,

        #[arg(short, long)]
        language: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Summarize the store
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Add or remove tags on every matching snippet
    Tag {
        #[command(flatten)]
        filter: FilterArgs,

        /// Tags to add (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        add: Vec<String>,

        /// Tags to remove (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        remove: Vec<String>,
    },

    /// Analyze stored snippets
    Analyze {
        /// Snippet to analyze
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<String>,

        /// Analyze every stored snippet
        #[arg(long)]
        all: bool,

        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        threshold: Option<u64>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommand {
    /// Professional review of a stored snippet
    CodeReview { snippet_id: String },

    /// Diagnose an error message
    Debug {
        error_message: String,

        #[arg(long, default_value = "")]
        context: String,
    },

    /// Draft a GitHub issue
    Issue {
        description: String,

        /// bug or enhancement (anything else drafts a bug)
        #[arg(long, default_value = "bug")]
        kind: String,
    },

    /// Pre-deploy checklist
    DeployCheck,

    /// Summarize technical logs
    Logs {
        /// Log file ("-" reads standard input)
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Optimization pass over a stored snippet
    Optimize { snippet_id: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
