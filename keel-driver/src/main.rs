mod cli;
mod driver;
mod logging;
mod options;
mod stage;

use clap::Parser;

use cli::Cli;
use options::Options;
use stage::{UnimplementedBackend, UnimplementedFrontend, UnimplementedLinker};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let opts = Options::from_cli(cli);
    logging::init(opts.verbosity);

    let code = driver::run(&opts, &UnimplementedFrontend, &UnimplementedBackend, &UnimplementedLinker)?;
    std::process::exit(code);
}
