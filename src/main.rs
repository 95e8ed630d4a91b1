mod chart;
mod color;
mod config;
mod data;
mod error;
mod server;
mod state;
mod ui;

use config::DashboardConfig;
use state::AppContext;
use ui::callbacks::CallbackRegistry;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = DashboardConfig::load();

    let table = data::loader::load_file(&config.data_path)?;
    log::info!(
        "Loaded {} launch records from {}",
        table.len(),
        config.data_path.display()
    );

    let ctx = AppContext::new(config, table);
    let registry = CallbackRegistry::dashboard();

    server::start_dashboard_server(&ctx, &registry)
}
