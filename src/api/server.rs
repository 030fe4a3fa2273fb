use crate::api::routes;
use crate::api::store::WorkflowStore;
use std::net::SocketAddr;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `port` - Port number to listen on for incoming HTTP connections
/// * `store` - Templates served and edited by the server
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok once the server stops, Error if binding or serving fails
///
/// # Example
/// ```no_run
/// use workflow_editor::api::{server, WorkflowStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     server::launch_server(5000, WorkflowStore::new(Vec::new())?).await
/// }
/// ```
pub async fn launch_server(
    port: u16,
    store: WorkflowStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::app(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Workflow backend listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
