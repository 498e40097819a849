//! The `run` and `eval` commands.

use std::io::Write;

use jdsl_eval::Evaluator;
use tracing::debug;

use super::{open_source, print_value, CommandError};
use crate::options::Options;

/// Evaluate every statement of a file and print the last value.
pub fn run_file(path: &str, options: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    let reader = open_source(path)?;
    debug!(path, "running");
    let mut evaluator = Evaluator::with_config(options.eval);
    let value = evaluator.eval_reader(reader)?;
    print_value(out, &value, options)
}

/// Evaluate source given on the command line and print the last value.
pub fn eval_expr(source: &str, options: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut evaluator = Evaluator::with_config(options.eval);
    let value = evaluator.eval_source(source)?;
    print_value(out, &value, options)
}
