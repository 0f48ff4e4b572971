// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use fretdrill::config::{validate_config, Settings};
use fretdrill::exercise::{ExerciseSession, Grade};
use fretdrill::fretboard::{render, FretWindow, FretboardMap, LabelMode, Position, Tuning};
use fretdrill::music::{PatternRegistry, Scale};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn print_usage() {
    println!("FRETDRILL - Fretboard Scale Trainer");
    println!();
    println!("Usage: fretdrill [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --patterns                         List available scale patterns");
    println!("  --show <ROOT> <PATTERN> [FIRST LAST]");
    println!("                                     Show a scale on a standard-tuned fretboard");
    println!("  --config <FILE>                    Show the scale described by a settings file");
    println!("  --quiz <FILE>                      Run the exercise described by a settings file");
    println!("  --help                             Show this help message");
}

/// Log filter used when RUST_LOG is unset or unparsable
const DEFAULT_LOG_FILTER: &str = "fretdrill=info";

/// RUST_LOG directives when given, otherwise the default filter
fn log_filter(directives: Option<&str>) -> Result<EnvFilter> {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .map_or_else(|| EnvFilter::try_new(DEFAULT_LOG_FILTER), Ok)
        .map_err(|e| anyhow!("Failed to parse tracing directive: {}", e))
}

fn init_logging() -> Result<()> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(directives.as_deref())?)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn list_patterns() {
    for name in PatternRegistry::new().available_patterns() {
        println!("{}", name);
    }
}

fn show_scale(root: &str, pattern: &str, first: u8, last: u8) -> Result<()> {
    let scale = Scale::parse(root, pattern)?;
    let window = FretWindow::new(first, last, first == 0)?;
    let map = FretboardMap::for_scale(Tuning::standard(), scale, &window);

    println!("{}", map.scale());
    print!("{}", render::to_text(&map, &window, LabelMode::Notes));
    println!();
    print!("{}", render::to_text(&map, &window, LabelMode::ScaleDegrees));
    Ok(())
}

fn show_config(path: &str) -> Result<()> {
    let settings = validate_config(path)?;
    let context = settings.exercise_context()?;
    let map = context.pattern();

    println!("{}", context.scale);
    print!("{}", render::to_text(&map, &context.window, settings.fretboard.labels));
    Ok(())
}

fn run_quiz(path: &str) -> Result<()> {
    let settings: Settings = validate_config(path)?;
    let labels = settings.fretboard.labels;
    let exercise = settings.exercise.build(settings.exercise_context()?);
    let mut session = ExerciseSession::from_entropy(exercise)?;

    println!("{} in {}", settings.exercise, session.exercise().context().scale);
    println!("Enter positions as STRING:FRET (strings counted from 0), then 'submit'.");
    println!("Other commands: 'show', 'clear', 'skip', 'quit'.");
    println!();
    println!("{}", session.question().prompt);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let window = session.exercise().context().window;
        match line.trim() {
            "" => {}
            "quit" | "q" => break,
            "show" => {
                if settings.fretboard.pattern {
                    print!("{}", render::to_text(&session.pattern(), &window, labels));
                    println!();
                }
                print!("{}", render::to_text(session.selection(), &window, labels));
            }
            "clear" => session.clear_selection(),
            "skip" => {
                let question = session.advance()?;
                println!("{}", question.prompt);
            }
            "submit" => match session.submit()? {
                Grade::Correct => {
                    println!("Correct!");
                    println!();
                    println!("{}", session.question().prompt);
                }
                Grade::Incorrect => {
                    println!("Not quite, try again.");
                }
            },
            other => match other.parse::<Position>() {
                Ok(position) => match session.toggle(position) {
                    Ok(true) => println!("selected {}", position),
                    Ok(false) => println!("deselected {}", position),
                    Err(e) => println!("{}", e),
                },
                Err(e) => println!("{}", e),
            },
        }
        stdout.flush()?;
    }

    println!(
        "Answered {} of {} attempts correctly.",
        session.correct_count(),
        session.attempts()
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("FRETDRILL - Fretboard Scale Trainer");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--patterns" => {
            list_patterns();
        }
        "--show" => {
            if args.len() < 4 {
                eprintln!("Error: --show requires a root and a pattern");
                eprintln!("Use --patterns to see available patterns");
                std::process::exit(1);
            }
            let (first, last) = if args.len() >= 6 {
                let first: u8 = args[4]
                    .parse()
                    .map_err(|_| anyhow!("Invalid first fret: {}", args[4]))?;
                let last: u8 = args[5]
                    .parse()
                    .map_err(|_| anyhow!("Invalid last fret: {}", args[5]))?;
                (first, last)
            } else {
                (0, 12)
            };
            show_scale(&args[2], &args[3], first, last)?;
        }
        "--config" => {
            if args.len() < 3 {
                eprintln!("Error: --config requires a settings file");
                std::process::exit(1);
            }
            show_config(&args[2])?;
        }
        "--quiz" => {
            if args.len() < 3 {
                eprintln!("Error: --quiz requires a settings file");
                std::process::exit(1);
            }
            run_quiz(&args[2])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
