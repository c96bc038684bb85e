mod cmd;

use clap::Parser;
use cmd::Cli;

fn main() {
    let cli = Cli::parse();
    eprintln!("myshadow {}", env!("CARGO_PKG_VERSION"));

    cmd::init_tracing();

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
