use clap::Parser;
use tapeworks_cli::{config, execute, init_logging, Args, CliError};

fn fail(e: CliError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn main() {
    let args = Args::parse();

    let env_verbose = std::env::var(config::VERBOSE_ENV).ok();
    let config = args
        .machine_config(env_verbose.as_deref())
        .unwrap_or_else(|e| fail(e));
    init_logging(config.verbose);
    tracing::debug!(?config, command = ?args.command, "running");

    match execute(&args.command, config, &args.printer()) {
        Ok(output) => println!("{}", output),
        Err(e) => fail(e),
    }
}
