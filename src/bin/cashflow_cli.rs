use cashflow_core::{
    cli::{output, run_cli, Cli},
    init,
};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init();

    if let Err(err) = run_cli(cli) {
        output::error(&err);
        std::process::exit(1);
    }
}
