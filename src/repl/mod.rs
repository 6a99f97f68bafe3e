use std::io;

use ansi_term::Color;
use linefeed::{Interface, ReadResult, Terminal};
use tracing::debug;

use crate::config::Config;
use crate::evaluator;
use crate::printer;

static BANNER: &str = concat!("Lispy version ", env!("CARGO_PKG_VERSION"));
static EXIT_HINT: &str = "Press Ctrl+C to Exit\n";

fn configure_reader<T: Terminal>(reader: &Interface<T>, config: &Config) -> io::Result<()> {
    let mut reader = reader.lock_reader();
    reader.set_blink_matching_paren(true);

    let style = Color::Purple.bold();

    reader.set_prompt(&format!(
        "\x01{prefix}\x02{text}\x01{suffix}\x02",
        prefix = style.prefix(),
        text = config.prompt,
        suffix = style.suffix()
    ))
}

pub fn run(config: &Config) -> io::Result<()> {
    let reader = Interface::new("lispy")?;
    configure_reader(&reader, config)?;

    let history_file = &config.history_file;
    if let Err(e) = reader.load_history(history_file) {
        if e.kind() == io::ErrorKind::NotFound {
            println!(
                "History file {} doesn't exist, not loading history.",
                history_file.display()
            );
        } else {
            eprintln!(
                "Could not load history file {}: {}",
                history_file.display(),
                e
            );
        }
    }

    println!("{}", BANNER);
    println!("{}", EXIT_HINT);

    loop {
        match reader.read_line()? {
            ReadResult::Input(input) => {
                if input.trim().is_empty() {
                    continue;
                }
                reader.add_history_unique(input.clone());
                rep(&input, config)?
            }
            ReadResult::Eof => {
                print!("^D");
                break;
            }
            ReadResult::Signal(signal) => {
                println!("signal: {:?}", signal);
                break;
            }
        }
    }

    if let Err(e) = reader.save_history(history_file) {
        eprintln!(
            "Could not save history file {}: {}",
            history_file.display(),
            e
        );
    }

    Ok(())
}

fn rep(input: &str, config: &Config) -> io::Result<()> {
    debug!(input, "evaluating line");
    let result = evaluator::eval_str_with_max_depth(input, config.max_nesting_depth);
    printer::println_result_to(io::stdout(), &result)
}
