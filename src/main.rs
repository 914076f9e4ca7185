mod app;
mod cli;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;

use crate::cli::{Cli, Command};
use crate::config::Settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let settings = Settings::from_cli(&cli);

    match cli.command {
        Some(Command::Scan { top }) => commands::run_scan(&settings, top),
        Some(Command::Clean { confirm, min_size }) => {
            commands::run_clean(&settings, &min_size, confirm)
        }
        None => run_window(settings),
    }
}

fn run_window(settings: Settings) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TidyScan")
            .with_inner_size([900.0, 620.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TidyScan",
        options,
        Box::new(|cc| Ok(Box::new(app::TidyScanApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow!("could not open the window: {e}"))
}
