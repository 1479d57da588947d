//! Tagcheck CLI - Tag-driven Field Validation
//!
//! This is a demonstration CLI for the tagcheck library.

use anyhow::{bail, Context, Result};
use tagcheck::prelude::*;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("tagcheck");

    if args.len() < 2 {
        print_usage(program);
        return;
    }

    let outcome = match args[1].as_str() {
        "list" => list_validators(),
        "parse" => match args.get(2) {
            Some(tag) => parse(tag),
            None => Err(anyhow::anyhow!("Please specify a tag, e.g. 'not_empty,min:3'")),
        },
        "check" => {
            if args.len() < 4 {
                eprintln!("Error: Please specify a tag and a value");
                eprintln!(
                    "Usage: {} check <tag> <value> [--as string|int|float] [--nil] [--config <file>] [--json]",
                    program
                );
                std::process::exit(2);
            }
            check(&args[2], &args[3], &args[4..])
        }
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            std::process::exit(2);
        }
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("Tagcheck - Tag-driven Field Validation v{}", tagcheck::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                  List all available validators");
    println!("  parse <tag>           Show the directives in a tag");
    println!("  check <tag> <value>   Validate a single value against a tag");
    println!("  help                  Show this help message");
    println!();
    println!("Check options:");
    println!("  --as <kind>       Treat the value as string (default), int or float");
    println!("  --nil             Treat the value as absent");
    println!("  --config <file>   Load pipeline options from a TOML file");
    println!("  --json            Print the report as JSON");
}

fn list_validators() -> Result<()> {
    let registry = tagcheck::validators::global();

    println!("Available validators ({} total):", registry.len());
    println!();
    for entry in registry.entries() {
        println!("  • {:<10} {}", entry.name, entry.description);
    }
    Ok(())
}

fn parse(tag: &str) -> Result<()> {
    let directives = parse_tag(tag).with_context(|| format!("Invalid tag '{}'", tag))?;

    if directives.is_empty() {
        println!("(no directives)");
        return Ok(());
    }
    for (i, directive) in directives.iter().enumerate() {
        if directive.options.is_empty() {
            println!("{}. {}", i + 1, directive.name);
        } else {
            println!("{}. {} {:?}", i + 1, directive.name, directive.options);
        }
    }
    Ok(())
}

fn check(tag: &str, raw: &str, flags: &[String]) -> Result<()> {
    let mut kind = "string";
    let mut nil = false;
    let mut json = false;
    let mut config: Option<&str> = None;

    let mut i = 0;
    while i < flags.len() {
        match flags[i].as_str() {
            "--as" if i + 1 < flags.len() => {
                kind = flags[i + 1].as_str();
                i += 2;
            }
            "--config" if i + 1 < flags.len() => {
                config = Some(flags[i + 1].as_str());
                i += 2;
            }
            "--nil" => {
                nil = true;
                i += 1;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    let value = field_value(kind, raw, nil)?;
    let pipeline = match config {
        Some(path) => ValidationPipeline::from_config_file(path)?,
        None => ValidationPipeline::default(),
    };
    let report = pipeline.check("Value", tag, value)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.summary());
        for line in report.detailed_errors() {
            println!("   {}", line);
        }
    }

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn field_value(kind: &str, raw: &str, nil: bool) -> Result<FieldValue> {
    let value = match (kind, nil) {
        ("string", true) => FieldValue::Nil(ValueKind::String),
        ("int", true) => FieldValue::Nil(ValueKind::Integer),
        ("float", true) => FieldValue::Nil(ValueKind::Float),
        ("string", false) => FieldValue::from(raw),
        ("int", false) => FieldValue::Integer(
            raw.parse()
                .with_context(|| format!("'{}' is not an integer", raw))?,
        ),
        ("float", false) => FieldValue::Float(
            raw.parse()
                .with_context(|| format!("'{}' is not a float", raw))?,
        ),
        (other, _) => bail!("Unknown value kind '{}'", other),
    };
    Ok(value)
}
