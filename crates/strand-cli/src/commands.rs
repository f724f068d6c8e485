use colored::Colorize;
use strand_crypto::ContentHasher;
use strand_query::{PredicateSet, Translator};
use strand_server::{AppState, ServerConfig, StrandServer};
use strand_store::Properties;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Digest(args) => cmd_digest(args, cli.format),
        Command::Analyze(args) => cmd_analyze(args, cli.format),
        Command::Translate(args) => cmd_translate(args, cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let server = StrandServer::new(resolve_config(&args)?, AppState::in_memory()?);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Config file values first, then command-line overrides.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config.enable_cors |= args.cors;
    debug!(
        bind = %config.bind_addr,
        max_body_bytes = config.max_body_bytes,
        cors = config.enable_cors,
        "resolved server config"
    );
    Ok(config)
}

fn cmd_digest(args: ValueArgs, format: OutputFormat) -> anyhow::Result<()> {
    let digest = ContentHasher::digest(&args.value);
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": digest })),
        OutputFormat::Text => println!("{}", digest.to_hex()),
    }
    Ok(())
}

fn cmd_analyze(args: ValueArgs, format: OutputFormat) -> anyhow::Result<()> {
    let props = Properties::compute(&args.value);
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    let palindrome = if props.is_palindrome { "yes".green() } else { "no".red() };
    println!("{} {}", "digest:".bold(), props.content_hash.to_hex().cyan());
    println!("  length:            {}", props.length);
    println!("  palindrome:        {palindrome}");
    println!("  unique characters: {}", props.unique_characters);
    println!("  words:             {}", props.word_count);
    println!("  frequencies:");
    for (c, n) in &props.character_frequency_map {
        println!("    {:?} {}", c, n.to_string().yellow());
    }
    Ok(())
}

fn cmd_translate(args: TranslateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let translator = Translator::with_default_rules()?;
    debug!(rules = ?translator.rule_names(), "translating {:?}", args.query);
    let filters = translator.translate(&args.query)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&filters)?),
        OutputFormat::Text => print_filters(&filters),
    }
    Ok(())
}

fn print_filters(filters: &PredicateSet) {
    if let Some(p) = filters.is_palindrome {
        println!("  {} {}", "is_palindrome:".bold(), p);
    }
    if let Some(n) = filters.min_length {
        println!("  {} {}", "min_length:".bold(), n);
    }
    if let Some(n) = filters.max_length {
        println!("  {} {}", "max_length:".bold(), n);
    }
    if let Some(n) = filters.word_count {
        println!("  {} {}", "word_count:".bold(), n);
    }
    if let Some(c) = filters.contains_character {
        println!("  {} {:?}", "contains_character:".bold(), c);
    }
}
