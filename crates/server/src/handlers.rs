use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use pd_core::ID;
use pd_engine::SimulationConfig;
use pd_engine::Strategy;
use pd_session::Lobby;
use pd_session::SessionError;
use pd_session::SimulationRequest;

pub async fn create(
    lobby: web::Data<Lobby>,
    request: web::Json<SimulationRequest>,
) -> impl Responder {
    let config = match SimulationConfig::try_from(request.into_inner()) {
        Ok(config) => config,
        Err(e) => return bad_request(e.to_string()),
    };
    match lobby.into_inner().create(config).await {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "simulation_id": id.to_string() })),
        Err(e) => bad_request(e.to_string()),
    }
}

pub async fn stream(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.subscribe(ID::from(path.into_inner())).await {
        Ok(events) => sse::stream(events),
        Err(e @ SessionError::StreamTaken) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

pub async fn stop(lobby: web::Data<Lobby>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match lobby.cancel(ID::from(path.into_inner())).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "stopping" })),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

pub async fn strategies() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "strategies": Strategy::catalog() }))
}

fn bad_request(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": error }))
}
