// Command-line front end for minimark.
//
// Usage:
//  minimark render <input> [--output <file>] [--fragment] [--format markdown|json]
//  minimark ast <input> [--format markdown|json]
//  minimark stylesheet
//
// `-` reads the document from stdin. Markdown is parsed with markdown-rs and
// lowered into minimark nodes; JSON input is a node array as produced by
// `minimark ast`.

mod cli;

use crate::cli::{Cli, Commands, InputArgs, InputFormat, RenderArgs};
use anyhow::{Context, Result};
use clap::Parser;
use minimark_core::{Node, nodes_from_json, nodes_to_json, parse_document};
use minimark_render::{Options, STYLESHEET, render_document, wrap_document};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Ast(args) => {
            let nodes = load_nodes(&args.source, &Options::default())?;
            println!("{}", nodes_to_json(&nodes)?);
            Ok(())
        }
        Commands::Stylesheet => {
            println!("{}", STYLESHEET);
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let options = build_options(&args)?;
    let nodes = load_nodes(&args.source, &options)?;

    let content = render_document(&nodes, &options);
    let html = if args.fragment {
        content
    } else {
        wrap_document(&content)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", html)?;
        }
    }
    Ok(())
}

/// Layers command-line flags over the optional config file.
fn build_options(args: &RenderArgs) -> Result<Options> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Options::default(),
    };

    if args.ordered_lists {
        options.ordered_lists = true;
    }
    if let Some(attr) = &args.link_attribute {
        options.link_attribute = attr.clone();
    }
    if args.escape_html {
        options.allow_raw_html = false;
    }
    Ok(options)
}

fn detect_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => InputFormat::Json,
        _ => InputFormat::Markdown,
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn load_nodes(input: &InputArgs, options: &Options) -> Result<Vec<Node>> {
    let source = read_input(&input.input)?;
    let format = input.format.unwrap_or_else(|| detect_format(&input.input));
    let nodes = match format {
        InputFormat::Markdown => parse_document(&source, &options.parse_options()),
        InputFormat::Json => nodes_from_json(&source),
    };
    nodes.with_context(|| format!("loading {}", input.input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("a.json")), InputFormat::Json);
        assert_eq!(detect_format(Path::new("a.md")), InputFormat::Markdown);
        assert_eq!(detect_format(Path::new("README")), InputFormat::Markdown);
        assert_eq!(detect_format(Path::new("-")), InputFormat::Markdown);
    }

    #[test]
    fn test_cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "minimark",
            "render",
            "doc.md",
            "--fragment",
            "--ordered-lists",
            "--link-attribute",
            "src",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("Expected render command");
        };
        assert!(args.fragment);
        let options = build_options(&args).unwrap();
        assert!(options.ordered_lists);
        assert_eq!(options.link_attribute, "src");
        assert!(options.allow_raw_html);
    }
}
