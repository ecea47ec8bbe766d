use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

use super::request_id::REQUEST_ID_HEADER;

/// Build the CORS middleware from the configured origins.
///
/// A `*` entry allows any origin (the browser frontend may be served from
/// anywhere during development).
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let origin = origin.to_str().unwrap_or("");
            allowed.iter().any(|a| a == "*" || a == origin)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers(vec![HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(3600)
}
