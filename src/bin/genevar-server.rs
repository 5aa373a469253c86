extern crate getopts;

use std::{process, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use getopts::Options;
use tower::layer::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::EnvFilter;

use genevar::provider::ProviderChain;
use genevar::web::config::Config;
use genevar::web::server::{make_router, AllState};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("{} v{}", PKG_NAME, VERSION);

    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options::new();

    opts.optflag("h", "help", "print this help message");
    opts.optopt("c", "config-file", "Configuration file name", "CONFIG");
    opts.optopt("b", "bind-address-and-port", "The address:port to bind to", "BIND_ADDRESS_AND_PORT");
    opts.optflag("", "offline", "only use the local gene table, don't query NCBI");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("Invalid options\n{}", f);
            print_usage(&args[0], opts);
            process::exit(1);
        }
    };

    let program = args[0].clone();

    if matches.opt_present("help") {
        print_usage(&program, opts);
        process::exit(0);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("genevar=info,tower_http=warn"))?,
        )
        .init();

    let mut config =
        if let Some(config_file_name) = matches.opt_str("config-file") {
            Config::read(&config_file_name)?
        } else {
            Config::default()
        };

    if matches.opt_present("offline") {
        config.make_offline();
    }

    let bind_address_and_port = matches.opt_str("bind-address-and-port")
        .unwrap_or_else(|| config.server.bind_address_and_port.clone());

    let provider = ProviderChain::from_config(&config)?;

    tracing::info!("gene providers: {}", provider.provider_names().join(", "));

    let all_state = AllState {
        provider: Arc::new(provider),
    };

    let listener = tokio::net::TcpListener::bind(&bind_address_and_port).await
        .with_context(|| format!("failed to bind to {}", bind_address_and_port))?;

    tracing::info!("listening on {}", bind_address_and_port);

    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
    let app = make_router(all_state, request_timeout);
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .context("server error")?;

    Ok(())
}
