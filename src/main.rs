use clap::Parser;

use style_guard::checker::LinkRegistry;
use style_guard::cli::{Cli, Commands};
use style_guard::commands::{run_check, run_config, run_init};
use style_guard::{EXIT_INTERRUPTED, StyleGuardError};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let registry = LinkRegistry::new();
    install_interrupt_handler(&registry);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli, &registry),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}

/// `-q` shows errors only, `-v` to `-vvv` go from info to trace. `RUST_LOG` wins.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// On Ctrl-C, SIGTERM or SIGHUP, remove every temporary link still alive
/// before exiting.
///
/// `process::exit` skips destructors, so the registry is drained here
/// rather than relying on `Drop`.
fn install_interrupt_handler(registry: &LinkRegistry) {
    let registry = registry.clone();
    let result = ctrlc::set_handler(move || {
        let removed = registry.drain();
        log::debug!("Interrupted, removed {removed} temporary link(s)");
        eprintln!("{}", StyleGuardError::Interrupted);
        std::process::exit(EXIT_INTERRUPTED);
    });

    if let Err(e) = result {
        log::warn!("Failed to install interrupt handler: {e}");
    }
}
