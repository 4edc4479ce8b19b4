//! Control endpoint routing — pure request parsing and dispatch.
//!
//! Kept free of socket I/O so every route is unit-testable: the server
//! module hands in the request line, this module hands back a
//! [`Response`]. Calibration routes sample the foil sensor through the
//! injected [`SensorPort`] so a calibration always uses a fresh reference
//! reading, never a stale one.

use serde_json::json;

use crate::app::ports::SensorPort;
use crate::app::service::AppService;

// ───────────────────────────────────────────────────────────────
// Request side
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Options,
    Other,
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "OPTIONS" => Self::Options,
            _ => Self::Other,
        }
    }
}

/// Split an HTTP/1.1 request line into method + request target.
pub fn parse_request_line(line: &str) -> Option<(Method, &str)> {
    let mut parts = line.split(' ');
    let method = Method::parse(parts.next()?);
    let path = parts.next()?;
    if path.is_empty() {
        return None;
    }
    Some((method, path))
}

/// Find `key` in the request target's query string. Pairs without a `=`
/// are skipped silently; the first match wins.
pub fn query_param<'a>(target: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

// ───────────────────────────────────────────────────────────────
// Response side
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NoContent,
    NotFound,
    ServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NoContent => 204,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NoContent => "No Content",
            Self::NotFound => "Not Found",
            Self::ServerError => "Internal Server Error",
        }
    }
}

/// A response ready for serialisation: status plus optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: Option<String>,
}

impl Response {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: Status::Ok,
            body: Some(body.to_string()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            body: None,
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: Status::ServerError,
            body: None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Dispatch
// ───────────────────────────────────────────────────────────────

/// Route one request against the app's calibration surface.
pub fn dispatch(
    method: Method,
    target: &str,
    app: &mut AppService,
    hw: &mut impl SensorPort,
) -> Response {
    // CORS preflight ack for any path.
    if method == Method::Options {
        return Response::no_content();
    }

    let path = target.split('?').next().unwrap_or(target);

    match (method, path) {
        (Method::Get, "/status") => {
            let snap = app.thresholds();
            Response::ok(json!({
                "foil_thresh": snap.threshold,
                "foil_dry": snap.dry,
                "foil_wet": snap.wet,
                "temp_limit": app.temp_limit_c() as i64,
            }))
        }

        (Method::Post, "/set_threshold") => {
            if let Some(value) = query_param(target, "value") {
                // A present-but-unparseable value is a handler fault, not
                // a silently ignored parameter.
                let Ok(value) = value.parse::<u16>() else {
                    return Response::server_error();
                };
                app.set_threshold(value);
            }
            Response::ok(json!({
                "success": true,
                "new_threshold": app.thresholds().threshold,
            }))
        }

        (Method::Post, "/reset_threshold") => {
            let new_threshold = app.reset_threshold();
            Response::ok(json!({
                "success": true,
                "new_threshold": new_threshold,
            }))
        }

        (Method::Post, "/calibrate_dry") => {
            let reference = hw.sample_foil();
            let (foil_dry, new_threshold) = app.calibrate_dry(reference);
            Response::ok(json!({
                "success": true,
                "foil_dry": foil_dry,
                "new_threshold": new_threshold,
            }))
        }

        (Method::Post, "/calibrate_wet") => {
            let reference = hw.sample_foil();
            let (foil_wet, new_threshold) = app.calibrate_wet(reference);
            Response::ok(json!({
                "success": true,
                "foil_wet": foil_wet,
                "new_threshold": new_threshold,
            }))
        }

        _ => Response::not_found(),
    }
}
