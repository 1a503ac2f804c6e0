#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use quickconv::app::QuickConvApp;
use quickconv::cli::Args;
use quickconv::config;
use quickconv::settings::AppSettings;

use clap::Parser;
use eframe::egui;
use log::{debug, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: failed to create application directories: {e}");
    }

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("quickconv.log", &path_config));
        let file = std::fs::File::create(&log_path)
            .map_err(|e| format!("failed to create log file {}: {e}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("eframe", log::LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {log_level:?})", log_path.display());
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .filter_module("eframe", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    info!("QuickConv starting...");
    debug!("Command-line args: {args:?}");
    info!(
        "Config path: {}",
        config::config_file("quickconv.json", &path_config).display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("QuickConv v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([900.0, 600.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(config::config_file("quickconv.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "QuickConv",
        native_options,
        Box::new(|cc| {
            let settings = AppSettings::load_or_default(cc.storage);
            Ok(Box::new(QuickConvApp::new(settings)))
        }),
    )?;

    info!("Application exiting");
    Ok(())
}
