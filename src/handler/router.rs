//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method and target matching,
//! dispatch to the payload, and access logging.

use crate::config::AppState;
use crate::handler::payload;
use crate::http;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let target = request_target(&req);

    let response = if matches_route(req.method(), &target, &state.config.responder.route) {
        payload::serve_payload(
            &state.config.responder.payload_file,
            state.request_log.as_ref(),
        )
        .await
    } else {
        http::build_404_response()
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        target.to_string(),
    );
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = body_len(&response);
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    state.request_log.access(&entry);

    Ok(response)
}

/// Only GET and POST on the exact route are answered with the payload
pub fn matches_route(method: &Method, target: &str, route: &str) -> bool {
    matches!(*method, Method::GET | Method::POST) && target == route
}

/// Request target as sent by the client, unnormalized.
///
/// Origin-form targets are the path plus query. Absolute-form and
/// authority-form targets keep their scheme and host, so they never equal a
/// route.
fn request_target<B>(req: &Request<B>) -> Cow<'_, str> {
    let uri = req.uri();
    if uri.scheme().is_some() || uri.authority().is_some() {
        return Cow::Owned(uri.to_string());
    }
    Cow::Borrowed(
        uri.path_and_query()
            .map_or("", hyper::http::uri::PathAndQuery::as_str),
    )
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
