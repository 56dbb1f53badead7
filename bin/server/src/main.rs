//! Simulation Server Binary
//!
//! Serves the simulation API and SSE event streams.
//! Options: --bind, --workers

#[tokio::main]
async fn main() {
    pd_core::log();
    pd_core::kys();
    pd_server::run().await.unwrap();
}
