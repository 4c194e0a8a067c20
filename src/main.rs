use is_terminal::IsTerminal;
use log::{info, LevelFilter};
use std::io::{self, Write};
use std::process;

use linecat::sources::STDIN_ARG;

fn main() {
    let args = match linecat::args::parsed() {
        Ok(args) => args,
        Err(e) => exit_with(&e),
    };
    init_logging(args.config.verbose);

    let stdin = io::stdin();
    if args.inputs.iter().any(|arg| arg == STDIN_ARG) && stdin.is_terminal() {
        info!("reading standard input from the terminal (end it with Ctrl-D)");
    }

    match linecat::run(&args.config, &args.inputs, &mut stdin.lock()) {
        Ok(summary) => info!(
            "{} source(s) read, {} skipped, {} line(s) written to {}",
            summary.sources_read,
            summary.sources_skipped,
            summary.lines_written,
            args.config.output.display()
        ),
        Err(e) => exit_with(&e),
    }
}

/// Diagnostics go to stderr as `linecat: <level>: <message>`. Warnings are
/// always shown; `-v` adds the rest. `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let level = record.level().as_str().to_lowercase();
            writeln!(buf, "linecat: {level}: {}", record.args())
        })
        .init();
}

fn exit_with(e: &linecat::Error) -> ! {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message = format!("{message}: {cause}");
        source = cause.source();
    }
    eprintln!("linecat: error: {message}");
    process::exit(e.exit_code())
}
