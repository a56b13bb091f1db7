//! CLI tool for checking PowerPoint decks against style rules.

use anyhow::{Context, Result};
use clap::Parser;
use deckstyle_core::{CheckReport, PresentationFormat, RuleSet, StyleChecker};
use deckstyle_pptx::{PptxAnnotator, PptxParser};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Check a PowerPoint deck for style violations and mark offending text.
#[derive(Parser, Debug)]
#[command(name = "deckstyle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    #[arg(required_unless_present = "print_rules")]
    input: Option<PathBuf>,

    /// Annotated output file (default: <input>_marked.pptx next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not write an annotated copy
    #[arg(long, conflicts_with = "output")]
    no_annotate: bool,

    /// JSON rule file (missing fields use the built-in rules)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Print the effective rules as JSON and exit
    #[arg(long)]
    print_rules: bool,

    /// Print findings as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let rules = load_rules(args.rules.as_deref())?;
    if args.print_rules {
        println!("{}", rules.to_json()?);
        return Ok(());
    }

    let checker = StyleChecker::new(rules).context("Failed to compile style rules")?;
    let input_path = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("No input file given"))?;

    let source = read_presentation(input_path)?;
    let (report, annotated) = process_file(input_path, &source, &checker, !args.no_annotate)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.findings)?);
    } else {
        print_report(&report);
    }

    if let Some(bytes) = annotated {
        let output_path = get_output_path(input_path, args.output.as_ref());
        std::fs::write(&output_path, bytes)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        if args.verbose {
            eprintln!("Written to: {}", output_path.display());
        }
    }

    Ok(())
}

/// Load rules from a JSON file, or the built-in rules.
fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules from {}", path.display()))?;
    RuleSet::from_json(&json).with_context(|| format!("Invalid rules in {}", path.display()))
}

/// Read a presentation into memory, rejecting formats we cannot annotate.
fn read_presentation(input_path: &Path) -> Result<Vec<u8>> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let format = PresentationFormat::from_magic(&bytes).or_else(|| {
        input_path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(PresentationFormat::from_extension)
    });

    match format {
        Some(PresentationFormat::Pptx) => Ok(bytes),
        Some(PresentationFormat::Ppt) => Err(deckstyle_core::Error::UnsupportedFormat(
            "legacy .ppt files are not supported; save the deck as .pptx".to_string(),
        )
        .into()),
        None => Err(deckstyle_core::Error::UnsupportedFormat(format!(
            "{} is not a PowerPoint file",
            input_path.display()
        ))
        .into()),
    }
}

/// Check one deck and optionally produce its annotated copy.
fn process_file(
    input_path: &Path,
    source: &[u8],
    checker: &StyleChecker,
    annotate: bool,
) -> Result<(CheckReport, Option<Vec<u8>>)> {
    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    log::debug!("Parsing {} as PPTX", filename);
    let deck = PptxParser::new()
        .parse(Cursor::new(source), filename)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let report = checker.check(&deck);

    let annotated = if annotate {
        let bytes = PptxAnnotator::new()
            .annotate(Cursor::new(source), &report.annotated)
            .context("Failed to write annotated copy")?;
        Some(bytes)
    } else {
        None
    };

    Ok((report, annotated))
}

fn print_report(report: &CheckReport) {
    if report.is_clean() {
        println!("✅ No style issues found!");
        return;
    }

    println!("Style Issues Found:");
    for finding in &report.findings {
        println!("{}", finding);
    }
}

/// Determine the output path for the annotated copy.
fn get_output_path(input_path: &Path, output: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = output {
        return path.clone();
    }

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output_filename = format!("{}_marked.pptx", stem);

    match input_path.parent() {
        Some(parent) => parent.join(output_filename),
        None => PathBuf::from(output_filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            get_output_path(Path::new("decks/Q3 Review.pptx"), None),
            PathBuf::from("decks/Q3 Review_marked.pptx")
        );
        assert_eq!(
            get_output_path(Path::new("deck.pptx"), Some(&PathBuf::from("out/x.pptx"))),
            PathBuf::from("out/x.pptx")
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["deckstyle", "deck.pptx", "--json", "--no-annotate"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("deck.pptx")));
        assert!(args.json);
        assert!(args.no_annotate);

        assert!(Args::try_parse_from(["deckstyle"]).is_err());
        assert!(Args::try_parse_from(["deckstyle", "--print-rules"]).is_ok());
        assert!(Args::try_parse_from(["deckstyle", "a.pptx", "--no-annotate", "-o", "b.pptx"]).is_err());
    }

    #[test]
    fn test_load_default_rules() {
        assert_eq!(load_rules(None).unwrap(), RuleSet::default());
    }
}
