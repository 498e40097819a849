//! Command handlers for the `jdsl` CLI.
//!
//! Each handler writes its results to `out` and returns an error for the
//! binary to report; nothing here exits the process.

use std::fs::File;
use std::io::{self, Read, Write};

use jdsl_value::Value;
use thiserror::Error;

use crate::options::Options;

mod debug;
mod run;

pub use debug::{decode_file, lex_file, parse_file};
pub use run::{eval_expr, run_file};

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Jdsl(#[from] jdsl_eval::Error),
    #[error("cannot print result as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl From<jdsl_decode::DecodeError> for CommandError {
    fn from(err: jdsl_decode::DecodeError) -> Self {
        CommandError::Jdsl(err.into())
    }
}

impl From<jdsl_lexer::LexError> for CommandError {
    fn from(err: jdsl_lexer::LexError) -> Self {
        CommandError::Jdsl(jdsl_decode::DecodeError::from(err).into())
    }
}

/// Open `path` for reading; `-` is standard input.
fn open_source(path: &str) -> Result<Box<dyn Read>, CommandError> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    File::open(path)
        .map(|file| Box::new(file) as Box<dyn Read>)
        .map_err(|source| read_error(path, source))
}

/// Read all of `path` as UTF-8; `-` is standard input.
fn read_source(path: &str) -> Result<String, CommandError> {
    let mut content = String::new();
    open_source(path)?
        .read_to_string(&mut content)
        .map_err(|source| read_error(path, source))?;
    Ok(content)
}

fn read_error(path: &str, source: io::Error) -> CommandError {
    match source.kind() {
        io::ErrorKind::NotFound => CommandError::NotFound {
            path: path.to_owned(),
        },
        _ => CommandError::Read {
            path: path.to_owned(),
            source,
        },
    }
}

/// Print a result value in the notation `options` selects.
fn print_value(out: &mut dyn Write, value: &Value, options: &Options) -> Result<(), CommandError> {
    if options.json {
        serde_json::to_writer(&mut *out, value)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
