//! End-to-end conversion pipeline
//!
//! raw pattern -> preprocess -> strip spaces -> tokenize -> insert
//! concatenation -> Shunting-Yard -> postfix
//!
//! Lenient conversion never fails. Recovered defects travel alongside the
//! output in a [`Conversion`], and [`Mode::Strict`] turns them into errors.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::concat::insert_concatenation;
use crate::error::{Anomaly, Result, YardError};
use crate::lexer::{Lexer, SpannedToken};
use crate::preprocess::preprocess;
use crate::shunting_yard::to_postfix;

/// How recovered defects are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Recover and report anomalies alongside the output
    #[default]
    Lenient,
    /// Fail on the first conversion that recovered anything
    Strict,
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Treatment of recovered defects
    pub mode: Mode,
    /// Remove ASCII spaces before tokenizing
    pub strip_spaces: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: Mode::Lenient,
            strip_spaces: true,
        }
    }
}

impl Options {
    /// Default options with strict validation
    pub fn strict() -> Self {
        Options {
            mode: Mode::Strict,
            ..Options::default()
        }
    }
}

/// Best-effort postfix output together with everything recovered on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    postfix: Vec<SpannedToken>,
    anomalies: Vec<Anomaly>,
}

impl Conversion {
    /// Tokens in postfix order
    pub fn postfix(&self) -> &[SpannedToken] {
        &self.postfix
    }

    /// Defects recovered while lexing and converting, in input order
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Whether nothing had to be recovered
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Reject the conversion if anything was recovered
    pub fn into_result(self) -> Result<Conversion> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(YardError::Malformed(self.anomalies))
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.postfix {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Remove ASCII spaces; other whitespace is kept
pub fn strip_spaces(input: &str) -> String {
    input.replace(' ', "")
}

/// Tokenize a preprocessed pattern and make concatenation explicit
pub fn infix_tokens(input: &str, options: &Options) -> (Vec<SpannedToken>, Vec<Anomaly>) {
    let cleaned = if options.strip_spaces {
        strip_spaces(input)
    } else {
        input.to_string()
    };
    let mut lexer = Lexer::new(&cleaned);
    let tokens = insert_concatenation(lexer.tokenize());
    log::trace!("infix tokens: {}", join(&tokens, " "));
    (tokens, lexer.into_anomalies())
}

/// Output of every pipeline stage for one input
struct Stages {
    preprocessed: String,
    infix: Vec<SpannedToken>,
    anomalies: Vec<Anomaly>,
}

fn lex(input: &str, options: &Options) -> Stages {
    let preprocessed = preprocess(input);
    log::debug!("preprocessed `{}` to `{}`", input, preprocessed);

    let (infix, anomalies) = infix_tokens(&preprocessed, options);
    Stages {
        preprocessed,
        infix,
        anomalies,
    }
}

fn shunt(input: &str, infix: Vec<SpannedToken>, mut anomalies: Vec<Anomaly>) -> Conversion {
    let postfix = to_postfix(infix);
    anomalies.extend(postfix.anomalies);
    anomalies.sort_by_key(|anomaly| anomaly.span.start);

    let conversion = Conversion {
        postfix: postfix.tokens,
        anomalies,
    };
    log::debug!(
        "converted `{}` to `{}` ({} anomalies)",
        input,
        conversion,
        conversion.anomalies.len()
    );
    conversion
}

fn run(input: &str, options: &Options) -> Conversion {
    let stages = lex(input, options);
    shunt(input, stages.infix, stages.anomalies)
}

/// Convert with explicit options
pub fn convert_with(input: &str, options: &Options) -> Result<Conversion> {
    let conversion = run(input, options);
    match options.mode {
        Mode::Lenient => Ok(conversion),
        Mode::Strict => conversion.into_result(),
    }
}

/// Convert an infix pattern to postfix, recovering from every defect
///
/// # Example
/// ```
/// use yard::convert;
///
/// assert_eq!(convert("a(b|c)d"), "abc|.d.");
/// ```
pub fn convert(input: &str) -> String {
    run(input, &Options::default()).to_string()
}

/// Convert an infix pattern to postfix, failing on any recovered defect
pub fn convert_strict(input: &str) -> Result<String> {
    convert_with(input, &Options::strict()).map(|conversion| conversion.to_string())
}

/// Convert with every intermediate stage kept for display
pub fn convert_debug(input: &str) -> ConversionReport {
    report_with(input, &Options::default())
}

/// Like [`convert_debug`], but honours `options.mode`
pub fn convert_debug_with(input: &str, options: &Options) -> Result<ConversionReport> {
    let report = report_with(input, options);
    match options.mode {
        Mode::Strict if !report.anomalies.is_empty() => Err(YardError::Malformed(report.anomalies)),
        _ => Ok(report),
    }
}

fn report_with(input: &str, options: &Options) -> ConversionReport {
    let stages = lex(input, options);
    // rendered before the tokens move into the converter
    let infix = join(&stages.infix, " ");
    let conversion = shunt(input, stages.infix, stages.anomalies);

    ConversionReport {
        input: input.to_string(),
        preprocessed: stages.preprocessed,
        infix,
        postfix: conversion.to_string(),
        anomalies: conversion.anomalies,
    }
}

/// Read a pattern from a file, trimming surrounding whitespace
pub fn read_pattern(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| YardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pattern = contents.trim();
    if pattern.is_empty() {
        return Err(YardError::EmptyInput);
    }
    Ok(pattern.to_string())
}

/// Read every non-empty line of a file as its own pattern.
///
/// Lines are trimmed and paired with their 1-based line number.
pub fn read_patterns(path: impl AsRef<Path>) -> Result<Vec<(usize, String)>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| YardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| (number, line.to_string()))
        .collect())
}

fn join(tokens: &[SpannedToken], separator: &str) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Result of a conversion with debug information
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The original input pattern
    pub input: String,
    /// The pattern after preprocessing
    pub preprocessed: String,
    /// Infix tokens with explicit concatenation, space separated
    pub infix: String,
    /// The postfix output
    pub postfix: String,
    /// Recovered defects
    pub anomalies: Vec<Anomaly>,
}

impl ConversionReport {
    /// Print a formatted report of the conversion
    pub fn report(&self) {
        println!("Conversion Report");
        println!("=================");
        println!("Original:      {}", self.input);
        println!("Preprocessed:  {}", self.preprocessed);
        println!("Infix tokens:  {}", self.infix);
        println!("Postfix:       {}", self.postfix);
        for anomaly in &self.anomalies {
            println!("Recovered:     {}", anomaly);
        }
    }
}
