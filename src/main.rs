use es_csv_writer::{config::WriterConfig, writer_app::WriterApp};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("es_csv_writer=info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let path = WriterConfig::resolve_path(std::env::args().nth(1));
    let config = WriterConfig::load(&path)?;
    info!("Starting writer, action {:?}", config.action);

    let app = WriterApp::new(config);
    match app.run().await {
        Ok(Some(output)) => {
            println!("{}", output);
            Ok(())
        }
        Ok(None) => {
            info!("Writer finished");
            Ok(())
        }
        Err(e) => {
            error!("Writer failed: {}", e);
            Err(e.into())
        }
    }
}
