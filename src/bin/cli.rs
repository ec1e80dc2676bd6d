// src/bin/cli.rs
use offer_watch::cli::{self, Command};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let opts = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", cli::help());
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    offer_watch::log::init(opts.verbose);
    cli::run(&opts)
}
