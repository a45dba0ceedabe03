use std::path::Path;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Worker thread count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    // Missing directories only warn: files can appear while the server runs
    if !Path::new(&cfg.files.data_dir).is_dir() {
        logger::log_warning(&format!(
            "Data directory '{}' does not exist; /protein/ requests will 404",
            cfg.files.data_dir
        ));
    }
    if !Path::new(&cfg.files.static_dir).is_dir() {
        logger::log_warning(&format!(
            "Static directory '{}' does not exist; /static/ requests will 404",
            cfg.files.static_dir
        ));
    }

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));

    // Connection tasks are spawned with spawn_local
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state)).await
}
