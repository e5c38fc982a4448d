use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use yard::{
    BalanceReport, Lexer, Options, YardError, check_balance, convert_debug_with, convert_with,
    insert_concatenation, read_pattern, read_patterns,
};

#[derive(Parser)]
#[command(name = "yard")]
#[command(about = "Yard - convert infix regular expressions to postfix notation")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a pattern to postfix notation
    Convert {
        /// The pattern to convert; read from stdin when omitted
        pattern: Option<String>,
        /// Fail instead of recovering from malformed input
        #[arg(short, long)]
        strict: bool,
        /// Show every pipeline stage
        #[arg(short, long)]
        debug: bool,
    },
    /// Convert the pattern stored in a file
    File {
        /// Path of the file holding the pattern
        path: PathBuf,
        /// Convert each non-empty line as its own pattern
        #[arg(short, long)]
        lines: bool,
        /// Fail instead of recovering from malformed input
        #[arg(short, long)]
        strict: bool,
    },
    /// Show the token sequence with explicit concatenation
    Tokens {
        /// The pattern to tokenize
        pattern: String,
    },
    /// Trace bracket balancing step by step
    Balance {
        /// The expression to check
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        expression: Option<String>,
        /// Check each non-empty line of a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            pattern,
            strict,
            debug,
        } => {
            let pattern = pattern.unwrap_or_else(|| prompt_pattern().unwrap_or_else(|e| fail(e)));
            cmd_convert(&pattern, strict, debug);
        }
        Commands::File {
            path,
            lines,
            strict,
        } => cmd_file(&path, lines, strict),
        Commands::Tokens { pattern } => cmd_tokens(&pattern),
        Commands::Balance { expression, file } => cmd_balance(expression.as_deref(), file.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn fail(error: impl Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    std::process::exit(1);
}

fn prompt_pattern() -> io::Result<String> {
    print!("Enter the regular expression: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn options_for(strict: bool) -> Options {
    if strict { Options::strict() } else { Options::default() }
}

fn cmd_convert(pattern: &str, strict: bool, debug: bool) {
    log::info!("converting `{}`", pattern);
    let report = convert_debug_with(pattern, &options_for(strict)).unwrap_or_else(|e| fail(e));
    if debug {
        report.report();
        return;
    }

    println!("{}", "Converting pattern...".bold());
    println!("  Original:      {}", report.input.cyan());
    println!("  Preprocessed:  {}", report.preprocessed.yellow());
    println!();
    println!("{}", "Postfix:".bold());
    println!("  {}", report.postfix.green());

    for anomaly in &report.anomalies {
        println!("  {} {}", "recovered:".yellow(), anomaly);
    }
}

fn cmd_file(path: &Path, lines: bool, strict: bool) {
    log::info!("reading patterns from {}", path.display());
    if !lines {
        let pattern = read_pattern(path).unwrap_or_else(|e| fail(e));
        cmd_convert(&pattern, strict, false);
        return;
    }

    let patterns = read_patterns(path).unwrap_or_else(|e| fail(e));
    if patterns.is_empty() {
        fail(YardError::EmptyInput);
    }

    let options = options_for(strict);
    let mut failures = 0;
    println!(
        "{} {}",
        "Converting".bold(),
        format!("{} pattern(s) from {}", patterns.len(), path.display()).cyan()
    );
    println!();

    for (number, pattern) in &patterns {
        match convert_with(pattern, &options) {
            Ok(conversion) => {
                println!("  [line {}] {} => {}", number, pattern, conversion.to_string().green());
                for anomaly in conversion.anomalies() {
                    println!("           {} {}", "recovered:".yellow(), anomaly);
                }
            }
            Err(e) => {
                failures += 1;
                println!("  [line {}] {} => {}", number, pattern, e.to_string().red());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn cmd_tokens(pattern: &str) {
    let mut lexer = Lexer::new(&yard::pipeline::strip_spaces(&yard::preprocess(pattern)));
    let tokens = insert_concatenation(lexer.tokenize());

    println!(
        "{} {}",
        "Found".bold(),
        format!("{} token(s)", tokens.len()).green()
    );
    println!();

    for (i, token) in tokens.iter().enumerate() {
        let origin = if token.is_synthetic() {
            "inserted".dimmed().to_string()
        } else {
            format!(
                "{}..{}, {} char(s)",
                token.span.start,
                token.span.end,
                token.span.len()
            )
        };
        println!(
            "  [{}] {:<10} {} ({})",
            i + 1,
            token.token.kind_name(),
            token.to_string().green(),
            origin
        );
    }

    for anomaly in lexer.anomalies() {
        println!("  {} {}", "recovered:".yellow(), anomaly);
    }
}

fn cmd_balance(expression: Option<&str>, file: Option<&Path>) {
    let expressions: Vec<(Option<usize>, String)> = match (expression, file) {
        (Some(expression), _) => vec![(None, expression.to_string())],
        (None, Some(path)) => read_patterns(path)
            .unwrap_or_else(|e| fail(e))
            .into_iter()
            .map(|(number, line)| (Some(number), line))
            .collect(),
        (None, None) => fail("an expression or --file is required"),
    };

    let mut all_balanced = true;
    for (number, expression) in &expressions {
        if let Some(number) = number {
            println!("{}", format!("Line {}:", number).bold());
        }
        let report = check_balance(expression);
        all_balanced &= report.balanced;
        print_balance(expression, &report);
    }

    if !all_balanced {
        std::process::exit(1);
    }
}

fn print_balance(expression: &str, report: &BalanceReport) {
    let rule = "=".repeat(80);
    println!("{}", rule);
    println!("Expression: {}", expression.cyan());
    println!("{}", rule);

    if report.balanced {
        println!("{}", "✓ Balanced".green().bold());
    } else {
        println!("{}", "✗ Not balanced".red().bold());
    }
    println!();

    let stack = |items: &[char]| format!("{:?}", items);
    for (i, step) in report.steps.iter().enumerate() {
        let character = step
            .character
            .map_or_else(|| "END".to_string(), |c| format!("'{}'", c));
        let action = if step.action.is_error() {
            step.action.to_string().red()
        } else {
            step.action.to_string().normal()
        };
        println!(
            "Step {:2} | Pos {:2} | Char: {}",
            i + 1,
            step.position,
            character
        );
        println!("        | Action: {}", action);
        println!("        | Stack before: {}", stack(&step.stack_before));
        println!("        | Stack after:  {}", stack(&step.stack_after));
        println!("{}", "-".repeat(80));
    }
    println!();
}
