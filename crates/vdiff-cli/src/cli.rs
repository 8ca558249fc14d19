use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vdiff_engine::Granularity;

#[derive(Parser)]
#[command(
    name = "vdiff",
    about = "Text and JSON comparison: unified diffs, structural diffs, similarity",
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
    /// Unified line diff of two files
    Text(TextArgs),
    /// Structural diff of two JSON documents
    Json(JsonArgs),
    /// Similarity percentage of two files
    Similarity(SimilarityArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct TextArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Unchanged lines shown around each change
    #[arg(
        short = 'U',
        long = "context",
        default_value_t = vdiff_engine::DEFAULT_CONTEXT_LINES,
        allow_negative_numbers = true
    )]
    pub context: i64,
}

#[derive(Args)]
pub struct JsonArgs {
    pub old: PathBuf,
    pub new: PathBuf,
}

#[derive(Args)]
pub struct SimilarityArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long, default_value = "chars")]
    pub granularity: GranularityArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GranularityArg {
    Chars,
    Words,
    Lines,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Chars => Granularity::Chars,
            GranularityArg::Words => Granularity::Words,
            GranularityArg::Lines => Granularity::Lines,
        }
    }
}

#[derive(Args)]
pub struct ServeArgs {
    /// Overrides `bind_addr` from the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML server configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text() {
        let cli = Cli::try_parse_from(["vdiff", "text", "a.txt", "b.txt"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.old, PathBuf::from("a.txt"));
            assert_eq!(args.new, PathBuf::from("b.txt"));
            assert_eq!(args.context, 3);
        } else {
            panic!("wrong command");
        }
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_text_context() {
        let cli = Cli::try_parse_from(["vdiff", "text", "-U", "0", "a", "b"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.context, 0);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_negative_context_reaches_engine() {
        let cli = Cli::try_parse_from(["vdiff", "text", "a", "b", "-U", "-2"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.context, -2);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_json_with_global_format() {
        let cli =
            Cli::try_parse_from(["vdiff", "json", "a.json", "b.json", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Json(_)));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parse_similarity_granularity() {
        let cli = Cli::try_parse_from(["vdiff", "similarity", "a", "b", "--granularity", "words"])
            .unwrap();
        if let Command::Similarity(args) = cli.command {
            assert_eq!(Granularity::from(args.granularity), Granularity::Words);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_similarity_defaults_to_chars() {
        let cli = Cli::try_parse_from(["vdiff", "-v", "similarity", "a", "b"]).unwrap();
        assert!(cli.verbose);
        if let Command::Similarity(args) = cli.command {
            assert_eq!(args.granularity, GranularityArg::Chars);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["vdiff", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert!(args.config.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["vdiff", "serve", "--bind", "not-an-addr"]).is_err());
    }

    #[test]
    fn rejects_unknown_granularity() {
        let parsed =
            Cli::try_parse_from(["vdiff", "similarity", "a", "b", "--granularity", "bytes"]);
        assert!(parsed.is_err());
    }
}
