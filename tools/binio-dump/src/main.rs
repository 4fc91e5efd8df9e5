// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! binio-dump - Dump binary records described by a schema document
//!
//! Loads a YAML/JSON schema, opens the input file read-only and prints the
//! root record (or a named type at an offset) member by member.

mod dump;

use binio::{FileAdapter, Session, SessionConfig, Type};
use clap::Parser;
use colored::*;
use dump::{dump_array, dump_struct, DumpOptions};
use serde_json::Value;
use std::path::PathBuf;

/// Dump binary records described by a schema document
#[derive(Parser, Debug)]
#[command(name = "binio-dump")]
#[command(version)]
#[command(about = "Dump binary records described by a binio schema document")]
struct Args {
    /// Schema document (.yaml, .yml or .json)
    #[arg(short, long)]
    schema: PathBuf,

    /// Binary input file
    #[arg(short, long)]
    input: PathBuf,

    /// Absolute byte offset of the record
    #[arg(short, long, default_value = "0")]
    offset: u64,

    /// Alias to dump instead of the schema root
    #[arg(short = 't', long = "type")]
    type_name: Option<String>,

    /// Elements shown per sequence
    #[arg(short = 'n', long, default_value = "16")]
    max_elements: usize,

    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Log schema loading and adapter calls
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let registry = binio::schema::load_path(&args.schema)?;
    let adapter = FileAdapter::open(&args.input)?;
    let config = SessionConfig::default().with_trace_io(args.verbose);
    let session = Session::open_with_config(registry, adapter, config);
    let opts = DumpOptions {
        max_elements: args.max_elements,
    };

    let (label, value) = match &args.type_name {
        None => {
            let mut root = session.struct_at(session.registry().root().clone(), args.offset);
            (root.compound_type().name().to_string(), dump_struct(&mut root, opts)?)
        }
        Some(name) => match session.registry().lookup(name)?.clone() {
            Type::Compound(c) => {
                let mut view = session.struct_at(c, args.offset);
                (name.clone(), dump_struct(&mut view, opts)?)
            }
            Type::Sequence(s) => (name.clone(), dump_array(session.sequence_at(s, args.offset), opts)?),
            Type::Scalar(s) => {
                return Err(format!("'{}' is the scalar {}, expected a compound or sequence", name, s).into())
            }
        },
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Pretty => {
            println!(
                "{} {} @ {}",
                ">>>".green().bold(),
                label.cyan().bold(),
                args.offset
            );
            print_pretty(&value, 1);
        }
    }
    Ok(())
}

fn print_pretty(value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (name, member) in map {
                match member {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}", indent, name.white().bold());
                        print_pretty(member, depth + 1);
                    }
                    leaf => println!("{}{} = {}", indent, name.white(), render_leaf(leaf)),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let tag = format!("[{}]", i).yellow();
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}", indent, tag);
                        print_pretty(item, depth + 1);
                    }
                    Value::String(note) => println!("{}{}", indent, note.dimmed()),
                    leaf => println!("{}{} {}", indent, tag, render_leaf(leaf)),
                }
            }
        }
        leaf => println!("{}{}", indent, render_leaf(leaf)),
    }
}

fn render_leaf(value: &Value) -> ColoredString {
    match value {
        Value::String(s) => s.dimmed(),
        other => other.to_string().green(),
    }
}
