//! Ymir's main application entry point.
//! Parses the command line, sets up logging and runs the request in the
//! process working directory.

use ymir::{
    cli::get_args,
    error::{default_error_handler, Error},
    logger::init_logger,
    prompt::DialoguerPrompter,
    run,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose, args.quiet);

    let outcome = std::env::current_dir()
        .map_err(Error::from)
        .and_then(|cwd| run(&args, &cwd, &DialoguerPrompter::new()));
    if let Err(err) = outcome {
        default_error_handler(err);
    }
}
