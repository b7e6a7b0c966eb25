use std::process::exit;

use colored::Colorize;
use human_panic::setup_panic;
use log::{Level, error, info, log_enabled};

use submission_sort::prelude::*;

fn run_from_args() -> anyhow::Result<()> {
    let matches = get_matches();
    init_logger(get_verbosity(&matches), &get_log_file(&matches)?)?;

    let config = load_or_default(get_config_path(&matches))?;
    let options = ProcessingOptions {
        root: get_root(&matches),
        settings: config.settings()?,
    };
    info!("Sorting submissions in {}", options.root.display());

    let report = run(&options)?;
    println!(
        "{}",
        format_message(
            &format!("Done. Report: {}", report.display()),
            &format!("Done. Report: {}", report.display())
                .green()
                .to_string()
        )
    );
    Ok(())
}

fn main() {
    setup_panic!();

    let status = match run_from_args() {
        Ok(()) => 0,
        Err(e) => {
            if log_enabled!(Level::Error) {
                error!("{e:#}");
            } else {
                let message = format!("Error: {e:#}");
                eprintln!("{}", format_message(&message, &message.red().bold().to_string()));
            }
            1
        }
    };

    check_for_stdout_stream();
    exit(status);
}
