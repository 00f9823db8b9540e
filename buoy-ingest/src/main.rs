use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use buoy_ingest::archive::EntityArchive;
use buoy_ingest::batch::{BatchResult, fetch_reports, fetch_stations};
use buoy_ingest::cache::ResponseCache;
use buoy_ingest::catalog::list_stations;
use buoy_ingest::config::IngestConfig;
use buoy_ingest::export::{export_reports, export_stations};
use buoy_ingest::ndbc::{HttpTransport, NdbcClient};
use buoy_ingest::store::DiskStore;

/// What to ingest this run.
#[derive(Debug, Clone, Copy)]
enum Mode {
    Stations,
    Reports,
}

impl Mode {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("reports") => Some(Mode::Reports),
            Some("stations") => Some(Mode::Stations),
            Some(_) => None,
        }
    }
}

async fn cancelled() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the batch just runs to completion
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn report_diagnostics<T>(result: &BatchResult<T>) {
    for diagnostic in &result.diagnostics {
        warn!(station = %diagnostic.station(), "{diagnostic}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let arg = std::env::args().nth(1);
    let Some(mode) = Mode::parse(arg.as_deref()) else {
        eprintln!("usage: buoy-ingest [stations|reports]");
        return ExitCode::from(2);
    };

    let config = match IngestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };
    info!(?mode, base_url = %config.base_url, "starting ingest");

    let ndbc_config = config.ndbc();
    let transport = match HttpTransport::new(&ndbc_config) {
        Ok(transport) => transport,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let cache = ResponseCache::new(DiskStore::new(&config.cache_dir));
    let archive = EntityArchive::new(DiskStore::new(&config.archive_dir));
    let client = NdbcClient::new(transport, cache, &ndbc_config).with_archive(archive);
    let output = DiskStore::new(&config.output_dir);

    let stations = match list_stations(&client).await {
        Ok(stations) => stations,
        Err(e) => {
            error!(error = %e, "cannot resolve station catalog");
            return ExitCode::FAILURE;
        }
    };

    let exported = match mode {
        Mode::Stations => match fetch_stations(&client, stations, cancelled()).await {
            Ok(result) => {
                report_diagnostics(&result);
                export_stations(&output, &result).await
            }
            Err(e) => {
                error!(error = %e, "ingest incomplete");
                return ExitCode::FAILURE;
            }
        },
        Mode::Reports => match fetch_reports(&client, stations, cancelled()).await {
            Ok(result) => {
                report_diagnostics(&result);
                export_reports(&output, &result).await
            }
            Err(e) => {
                error!(error = %e, "ingest incomplete");
                return ExitCode::FAILURE;
            }
        },
    };

    match exported {
        Ok(count) => {
            info!(count, output = %config.output_dir.display(), "ingest finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "export failed");
            ExitCode::FAILURE
        }
    }
}
