use std::io;

use lispy::config::Config;
use lispy::logging;
use lispy::repl;

fn main() -> io::Result<()> {
    logging::init_tracing();

    let config = Config::from_env();
    repl::run(&config)
}
