use std::sync::Arc;

use tracing::error;
use website::config::{load_config, print_schema};
use website::startup;
use website::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = load_config();

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
