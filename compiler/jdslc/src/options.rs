//! Flags shared by the evaluating commands.

use jdsl_eval::EvalConfig;

/// Settings collected from `--flag` arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub eval: EvalConfig,
    /// Print results as JSON instead of source notation.
    pub json: bool,
}

/// Split `args` into options and positional arguments.
///
/// Recognized flags: `--max-depth=N`, `--no-depth-limit`,
/// `--max-nesting=N`, `--chunk-size=N`, `--json`. A lone `-` is
/// positional (standard input).
pub fn parse_options(args: &[String]) -> Result<(Options, Vec<&str>), String> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    for arg in args {
        if let Some(n) = arg.strip_prefix("--max-depth=") {
            options.eval.max_depth = Some(parse_count("--max-depth", n)?);
        } else if arg == "--no-depth-limit" {
            options.eval.max_depth = None;
        } else if let Some(n) = arg.strip_prefix("--max-nesting=") {
            options.eval.decode.max_depth = parse_count("--max-nesting", n)?;
        } else if let Some(n) = arg.strip_prefix("--chunk-size=") {
            options.eval.decode.tokenizer.chunk_size = parse_count("--chunk-size", n)?;
        } else if arg == "--json" {
            options.json = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else {
            positional.push(arg.as_str());
        }
    }
    Ok((options, positional))
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive integer, found '{value}'")),
    }
}
