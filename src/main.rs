use clap::Parser;
use cnvdose::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{plot, score},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Score(_) => "score",
        Command::Plot(_) => "plot",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Score(args) => score::score(args)?,
        Command::Plot(args) => plot::plot(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
