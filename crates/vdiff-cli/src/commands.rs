use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use vdiff_engine::{
    ChangeKind, JsonDiffReport, JsonNode, SimilarityReport, TextDiffReport, UnifiedOptions,
};
use vdiff_server::{ServerConfig, VdiffServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Text(args) => cmd_text(args, format),
        Command::Json(args) => cmd_json(args, format),
        Command::Similarity(args) => cmd_similarity(args, format),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_text(args: TextArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_input(&args.old)?;
    let new = read_input(&args.new)?;
    let options = UnifiedOptions::with_context(args.context)?
        .labels(args.old.display().to_string(), args.new.display().to_string());
    let report = vdiff_engine::diff_text_with(&old, &new, &options);
    match format {
        OutputFormat::Text => print!("{}", render_text_diff(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

fn cmd_json(args: JsonArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_json(&args.old)?;
    let new = read_json(&args.new)?;
    let report = vdiff_engine::diff_json(&old, &new);
    match format {
        OutputFormat::Text => print!("{}", render_json_diff(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

fn cmd_similarity(args: SimilarityArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_input(&args.old)?;
    let new = read_input(&args.new)?;
    let report = vdiff_engine::similarity_with(&old, &new, args.granularity.into());
    match format {
        OutputFormat::Text => println!("{}", render_similarity(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    println!("vdiff server on {}", config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(VdiffServer::new(config).serve())?;
    Ok(())
}

/// Config file first, then flag overrides.
fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    debug!(?config, "server config resolved");
    Ok(config)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json(path: &Path) -> anyhow::Result<JsonNode> {
    let text = read_input(path)?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn to_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn render_text_diff(report: &TextDiffReport) -> String {
    let mut out = String::new();
    for (idx, line) in report.diff.iter().enumerate() {
        let styled = if idx < 2 {
            line.bold()
        } else if line.starts_with("@@") {
            line.cyan()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with('\\') {
            line.dimmed()
        } else {
            line.normal()
        };
        out.push_str(&format!("{styled}\n"));
    }
    out
}

fn render_json_diff(report: &JsonDiffReport) -> String {
    if !report.has_changes {
        return "No differences.\n".to_string();
    }
    let mut out = String::new();
    for item in &report.differences {
        let line = match (item.kind, &item.old_value, &item.new_value) {
            (ChangeKind::Added, _, Some(new)) => format!("{} {}: {}", "+".green(), item.path, new),
            (ChangeKind::Removed, Some(old), _) => format!("{} {}: {}", "-".red(), item.path, old),
            (ChangeKind::Changed, Some(old), Some(new)) => {
                format!("{} {}: {} -> {}", "~".yellow(), item.path, old, new)
            }
            (ChangeKind::TypeChanged, Some(old), Some(new)) => format!(
                "{} {}: {} ({}) -> {} ({})",
                "!".magenta(),
                item.path,
                old,
                old.kind(),
                new,
                new.kind()
            ),
            (kind, _, _) => format!("? {}: {}", item.path, kind),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("{} change(s)\n", report.total_changes.to_string().bold()));
    out
}

fn render_similarity(report: &SimilarityReport) -> String {
    format!(
        "Similarity: {}% ({} matching blocks, {} vs {} chars)",
        format!("{:.2}", report.similarity_percent).bold(),
        report.matching_blocks,
        report.text1_length,
        report.text2_length
    )
}
