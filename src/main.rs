use std::{fs, path::Path, process::ExitCode};

use clap::Parser;
use tessera::{
    interpreter::{evaluator::core::Context, lexer::tokenize, module::SourceLoader},
    parse,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// tessera runs scripts written in a small, typed, class-based language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tessera to read the script from a file instead of the command
    /// line.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream and exits.
    #[arg(long)]
    tokens: bool,

    /// Prints the parsed program and exits.
    #[arg(long)]
    ast: bool,

    contents: String,
}

/// Installs a log subscriber when `RUST_LOG` is set; otherwise the
/// interpreter stays silent.
fn init_logging() {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                      .with(filter)
                                      .init();
    }
}

fn run(args: &Args, script: &str, base: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if args.tokens {
        for (token, line) in tokenize(script)? {
            println!("{line:>4}  {token}");
        }
        return Ok(());
    }

    let program = parse(script)?;
    if args.ast {
        println!("{program:#?}");
        return Ok(());
    }

    let mut context = Context::new().with_loader(SourceLoader::new(base));
    context.execute_all(&program)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let (script, base) = if args.file {
        let Ok(script) = fs::read_to_string(&args.contents) else {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            return ExitCode::FAILURE;
        };
        let base = Path::new(&args.contents).parent()
                                            .map(Path::to_path_buf)
                                            .unwrap_or_default();
        (script, base)
    } else {
        (args.contents.clone(), ".".into())
    };

    match run(&args, &script, &base) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
