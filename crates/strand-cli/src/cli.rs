use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "strand",
    about = "Strand: content-addressed string store with property queries",
    version,
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
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the content digest of a string
    Digest(ValueArgs),
    /// Print the derived properties of a string
    Analyze(ValueArgs),
    /// Show the filters a natural-language query resolves to
    Translate(TranslateArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on; overrides the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Allow cross-origin requests
    #[arg(long)]
    pub cors: bool,
}

#[derive(Args)]
pub struct ValueArgs {
    pub value: String,
}

#[derive(Args)]
pub struct TranslateArgs {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["strand", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.bind.is_none());
            assert!(args.config.is_none());
            assert!(!args.cors);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_with_options() {
        let cli = Cli::try_parse_from([
            "strand", "serve", "--bind", "0.0.0.0:8080", "--config", "strand.toml", "--cors",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.config, Some(PathBuf::from("strand.toml")));
            assert!(args.cors);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["strand", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_digest() {
        let cli = Cli::try_parse_from(["strand", "digest", "hello"]).unwrap();
        if let Command::Digest(args) = cli.command {
            assert_eq!(args.value, "hello");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_analyze_json() {
        let cli = Cli::try_parse_from(["strand", "analyze", "a b", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Analyze(_)));
    }

    #[test]
    fn parse_translate() {
        let cli = Cli::try_parse_from(["strand", "translate", "all palindromic strings"]).unwrap();
        if let Command::Translate(args) = cli.command {
            assert_eq!(args.query, "all palindromic strings");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_verbose() {
        let cli = Cli::try_parse_from(["strand", "digest", "x", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["strand"]).is_err());
    }
}
