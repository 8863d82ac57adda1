//! Azure provider extension - mutating admission webhooks for Gardener

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use kube::Client;
use tracing::info;

use azure_common::telemetry::{init_telemetry, TelemetryConfig};
use azure_webhook::{webhook_router, FlowMutator, KubeClusterLookup, SentinelKeys, ShootMutator};

/// Mutating admission webhooks of the Gardener Azure provider extension
#[derive(Parser, Debug)]
#[command(name = "provider-azure-webhook", version, about, long_about = None)]
struct Cli {
    /// Address the webhook server listens on
    #[arg(long, env = "WEBHOOK_BIND_ADDRESS", default_value = "0.0.0.0:10250")]
    bind_address: SocketAddr,

    /// PEM certificate served to the API server
    ///
    /// Without a certificate and key the server speaks plain HTTP.
    #[arg(long, env = "WEBHOOK_TLS_CERT_FILE", requires = "tls_key_file")]
    tls_cert_file: Option<PathBuf>,

    /// PEM private key for the serving certificate
    #[arg(long, env = "WEBHOOK_TLS_KEY_FILE", requires = "tls_cert_file")]
    tls_key_file: Option<PathBuf>,

    /// Service name reported in traces
    #[arg(
        long,
        env = "OTEL_SERVICE_NAME",
        default_value = "gardener-extension-provider-azure"
    )]
    service_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // aws-lc-rs must be the process-wide provider before any TLS config is built
    if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
        eprintln!("CRITICAL: Failed to install crypto provider: {:?}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();

    init_telemetry(TelemetryConfig {
        service_name: cli.service_name.clone(),
        ..Default::default()
    })?;

    let client = Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;

    let lookup = Arc::new(KubeClusterLookup::new(client));
    let app = webhook_router(
        Arc::new(ShootMutator::new()),
        Arc::new(FlowMutator::new(lookup, SentinelKeys::default())),
    );

    match (cli.tls_cert_file, cli.tls_key_file) {
        (Some(cert), Some(key)) => {
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert, &key)
                .await
                .with_context(|| format!("failed to load TLS config from {}", cert.display()))?;

            info!(addr = %cli.bind_address, "Starting HTTPS webhook server");
            axum_server::bind_rustls(cli.bind_address, tls_config)
                .serve(app.into_make_service())
                .await
                .context("HTTPS webhook server error")?;
        }
        _ => {
            let listener = tokio::net::TcpListener::bind(cli.bind_address)
                .await
                .with_context(|| format!("failed to bind {}", cli.bind_address))?;

            info!(addr = %cli.bind_address, "Starting HTTP webhook server");
            axum::serve(listener, app)
                .await
                .context("HTTP webhook server error")?;
        }
    }

    Ok(())
}
