//! jdsl CLI

use jdslc::commands::{decode_file, eval_expr, lex_file, parse_file, run_file, CommandError};
use jdslc::options::{parse_options, Options};

type Handler = fn(&str, &Options, &mut dyn std::io::Write) -> Result<(), CommandError>;

fn main() {
    jdslc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let handler: Handler = match command.as_str() {
        "run" => run_file,
        "eval" => eval_expr,
        "decode" => decode_file,
        "parse" => parse_file,
        "lex" => lex_file,
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("jdsl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let (options, positional) = match parse_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    let [input] = positional.as_slice() else {
        let what = if command == "eval" { "<expr>" } else { "<file|->" };
        eprintln!("Usage: jdsl {command} {what} [options]");
        std::process::exit(1);
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = handler(input, &options, &mut out) {
        match &err {
            CommandError::Jdsl(inner) => eprintln!("{}: {err}", inner.category()),
            _ => eprintln!("error: {err}"),
        }
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("jdsl: JSON with operators");
    println!();
    println!("Usage: jdsl <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file|->         Evaluate a file and print the last value");
    println!("  eval <expr>          Evaluate source given as an argument");
    println!("  decode <file|->      Print decoded statements without evaluating");
    println!("  parse <file|->       Print the parse tree with source spans");
    println!("  lex <file|->         Print the token stream");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Limit nested calls (default: 10000)");
    println!("  --no-depth-limit     Disable the call depth limit");
    println!("  --max-nesting=<n>    Limit bracket nesting while decoding (default: 512)");
    println!("  --chunk-size=<n>     Bytes read per refill (default: 4096)");
    println!("  --json               Print results as JSON");
    println!();
    println!("Logging is controlled by RUST_LOG, e.g. RUST_LOG=jdsl_eval=trace.");
    println!();
    println!("Examples:");
    println!("  jdsl eval 'lambda(x, y, add(x, y))(2)(3)'");
    println!("  jdsl run script.jdsl --json");
    println!("  echo '[1, 2, sum(3, 4)]' | jdsl run -");
}
