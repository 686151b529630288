// src/bin/cli.rs
use color_eyre::eyre::{Result, WrapErr};

use cvf_dl::{cli, logging};

fn main() -> Result<()> {
    color_eyre::install()?;

    let options = match cli::parse_args(std::env::args().skip(1))? {
        cli::Command::Run(options) => options,
        cli::Command::Help => {
            eprintln!("{}", cli::HELP);
            return Ok(());
        }
    };

    logging::init(options.log_level, options.log_file.as_deref())
        .wrap_err("cannot install logger")?;

    // Failures are in the report; a finished run always exits 0
    cli::run(&options);
    Ok(())
}
