use kana_entry::{cli::run_cli, errors::CliError, init};
use kentry_config::ConfigManager;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let config_manager = ConfigManager::from_env()?;
    let config = config_manager.load()?;
    init(config.log_filter.as_deref());
    run_cli(config_manager, config)
}
