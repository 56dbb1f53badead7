use actix_web::HttpResponse;
use actix_web::web::Bytes;
use futures::Stream;
use pd_session::StreamEvent;
use tokio::sync::mpsc;

/// Adapt a session's event channel into an SSE response body.
/// The body ends when the worker drops its sender; dropping the response
/// closes the channel, which the worker detects on its next send.
fn body(rx: mpsc::Receiver<StreamEvent>) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|event| (Ok(Bytes::from(event.to_sse())), rx))
    })
}

pub fn stream(rx: mpsc::Receiver<StreamEvent>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/event-stream"))
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(body(rx))
}
