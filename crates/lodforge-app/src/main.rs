//! The `lodforge` command-line entry point.

use clap::Parser;
use lodforge_app::platform::PlatformDirs;
use lodforge_config::{CONFIG_FILE_NAME, CliArgs};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => Ok(PlatformDirs::with_config_dir(dir)),
        None => PlatformDirs::resolve(),
    };
    let dirs = match dirs.and_then(|d| d.create_dirs().map(|()| d)) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    let (mut config, source) = match lodforge_app::load_settings(&dirs.config_dir, &args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            std::process::exit(1);
        }
    };

    lodforge_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        ?source,
        path = %dirs.config_dir.join(CONFIG_FILE_NAME).display(),
        "Settings ready"
    );

    let result = lodforge_app::run(&args, &mut config);

    if !args.no_save_settings {
        if let Err(e) = config.save(&dirs.config_dir) {
            tracing::error!("Failed to save settings: {e}");
        }
    }

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
