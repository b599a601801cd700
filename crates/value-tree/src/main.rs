use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use value_tree::outline::render_outline;
use value_tree::prelude::*;

/// Browse a JSON document as a tree that expands on demand
#[derive(Parser, Debug)]
#[command(name = "value-tree", version)]
struct Args {
    /// JSON file to show, `-` reads standard input
    #[arg(default_value = "-")]
    input: String,

    /// Label of the root node
    #[arg(long, default_value = "Object")]
    root_name: String,

    /// Start with the root expanded
    #[arg(long)]
    expanded: bool,

    /// Expand the containers along a `/`-separated key path (repeatable)
    #[arg(long, value_name = "PATH")]
    expand: Vec<String>,

    /// Expand every container
    #[arg(long)]
    expand_all: bool,

    /// JSON file with display options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Text shown next to collapsed containers
    #[arg(long)]
    toggle_label: Option<String>,

    /// Text shown for blank values
    #[arg(long)]
    empty_label: Option<String>,

    /// Pattern for values under labels containing "Date"
    #[arg(long)]
    date_format: Option<String>,

    /// Offset from UTC, in minutes, for formatted dates
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Deepest level whose children may be created
    #[arg(long)]
    max_depth: Option<usize>,

    /// Read `toggle PATH` commands from the terminal after printing
    #[arg(long, short)]
    interactive: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.interactive && args.input == "-" {
        bail!("--interactive needs a FILE argument, standard input is used for commands");
    }

    let config = build_config(&args)?;
    let value = load_value(&args.input)?;
    let options = RenderOptions::new()
        .root_label(args.root_name.clone())
        .start_expanded(args.expanded)
        .config(config);
    let mut tree = value_tree::render(value, options)?;

    for path in &args.expand {
        let keys = split_path(path);
        tree.expand_path(&keys[..])
            .with_context(|| format!("Failed to expand '{}'", path))?;
    }
    if args.expand_all {
        let count = tree.expand_all(None)?;
        info!("Expanded {} containers", count);
    }

    println!("{}", render_outline(&tree));

    if args.interactive {
        run_interactive(&mut tree)?;
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<TreeConfig> {
    let mut config = match &args.config {
        Some(path) => TreeConfig::from_file(path)?,
        None => TreeConfig::default(),
    };
    if let Some(label) = &args.toggle_label {
        config = config.with_toggle_label(label.clone());
    }
    if let Some(label) = &args.empty_label {
        config = config.with_empty_label(label.clone());
    }
    if let Some(format) = &args.date_format {
        config = config.with_date_format(format.clone());
    }
    if let Some(minutes) = args.utc_offset {
        config = config.with_utc_offset_minutes(minutes);
    }
    if args.max_depth.is_some() {
        config = config.with_max_depth(args.max_depth);
    }
    debug!("Using config {:?}", config);
    Ok(config)
}

fn load_value(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        text
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", input))?;
    Ok(Value::from(json))
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|key| !key.is_empty()).collect()
}

/// Toggle the node at `path`; the node must already be loaded
fn toggle_path(tree: &mut ValueTree, path: &str) -> Result<bool> {
    let keys = split_path(path);
    let Some(id) = tree.find_by_key_path(&keys[..]) else {
        bail!("no loaded node at '{}'", path);
    };
    Ok(tree.toggle(id)?)
}

/// Command loop: `toggle PATH`, `expand-all`, `show`, `quit`
fn run_interactive(tree: &mut ValueTree) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" | "show" => {}
            "toggle" | "t" => {
                if let Err(err) = toggle_path(tree, argument.trim()) {
                    println!("error: {}", err);
                    continue;
                }
            }
            "expand-all" => {
                if let Err(err) = tree.expand_all(None) {
                    println!("error: {}", err);
                    continue;
                }
            }
            "quit" | "q" | "exit" => return Ok(()),
            other => {
                println!("unknown command '{}' (toggle PATH, expand-all, show, quit)", other);
                continue;
            }
        }
        println!("{}", render_outline(tree));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("subObj/subArray"), vec!["subObj", "subArray"]);
        assert_eq!(split_path("/a//b/"), vec!["a", "b"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_toggle_path() {
        let value = Value::from(serde_json::json!({"subObj": {"inner": {"x": 1}}}));
        let options = RenderOptions::new().start_expanded(true);
        let mut tree = value_tree::render(value, options).unwrap();

        assert!(toggle_path(&mut tree, "subObj").unwrap());
        assert!(toggle_path(&mut tree, "subObj/inner").unwrap());
        // stays loaded under a collapsed parent
        assert!(!toggle_path(&mut tree, "subObj").unwrap());
        assert!(!toggle_path(&mut tree, "subObj/inner").unwrap());

        let err = toggle_path(&mut tree, "subObj/inner/x/y").unwrap_err();
        assert_eq!(err.to_string(), "no loaded node at 'subObj/inner/x/y'");
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "value-tree",
            "data.json",
            "--empty-label",
            "-",
            "--utc-offset",
            "-60",
            "--max-depth",
            "4",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.empty_label, "-");
        assert_eq!(config.utc_offset_minutes, -60);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.toggle_label, "click to expand");
    }
}
