use clap::Parser;
use log::error;

use memo::{log_crash, App, Cli, Commands, Config, NoteStore, Result};

fn initialize_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn run(config: &Config, command: Option<Commands>) -> Result<()> {
    let store = NoteStore::load(&config.data_file)?;
    let mut app = App::new(store, config.clone());
    app.run(command)
}

fn main() {
    initialize_logger();

    let cli = Cli::parse();

    let config = match Config::resolve(cli.data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("memo: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config, cli.command) {
        // Record the failure next to the data file before telling the user.
        log_crash(&config.crash_log, &e);
        error!("{e}");
        eprintln!("memo: {e}");
        std::process::exit(1);
    }
}
