//! HTTP surface for the simulation service.
//!
//! Exposes session creation, SSE streaming, cooperative stop, and the
//! strategy catalog over actix-web. All state lives in the shared
//! [`pd_session::Lobby`].
//!
//! ## Submodules
//!
//! - [`handlers`] — request handlers, thin wrappers over the lobby
//! - [`sse`] — event channel to SSE response body adapter

pub mod handlers;
pub mod sse;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use clap::Parser;
use pd_session::Lobby;

/// Command line options for the server binary.
#[derive(Parser, Debug)]
pub struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: String,
    /// Number of HTTP worker threads.
    #[arg(long, default_value_t = 4)]
    pub workers: usize,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api")
            .route("/strategies", web::get().to(handlers::strategies))
            .route("/simulations", web::post().to(handlers::create))
            .route("/simulations/{id}/stream", web::get().to(handlers::stream))
            .route("/simulations/{id}/stop", web::post().to(handlers::stop)),
    );
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let args = Args::parse();
    let lobby = web::Data::from(Lobby::new());
    log::info!("starting simulation server on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .configure(routes)
    })
    .workers(args.workers)
    .bind(args.bind)?
    .run()
    .await
}
