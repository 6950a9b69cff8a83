use log::{error, info};
use mastermind_solver::cli::{CliInterface, parse_cli};
use mastermind_solver::game_loop;
use mastermind_solver::logging::{default_log_path, init_logging};
use mastermind_solver::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    // the full-screen interface owns the terminal, so its logs go to a file
    let log_path = cli
        .log_file
        .clone()
        .or_else(|| cli.tui.then(default_log_path));
    if let Err(e) = init_logging(log_path.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let selector = cli.strategy.selector();
    info!(
        "starting with {} strategy, opening {:?}",
        selector.name(),
        cli.opening
    );

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                error!("failed to start TUI: {e}");
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut interface, selector.as_ref(), cli.opening);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut interface, selector.as_ref(), cli.opening);
    }

    ExitCode::SUCCESS
}
