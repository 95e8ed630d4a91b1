//! HTTP server for the dashboard
//!
//! Serves the page, its layout description and the callback endpoint. Requests
//! are handled one at a time; every handler only borrows the [`AppContext`].

use std::collections::BTreeMap;
use std::io::Read;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::chart::Figure;
use crate::error::DashboardError;
use crate::state::AppContext;
use crate::ui::INDEX_HTML;
use crate::ui::callbacks::{CallbackRegistry, OutputId, UpdateRequest};
use crate::ui::layout::PageLayout;

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(error: String) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Payload of a successful `POST /api/update`.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outputs: BTreeMap<OutputId, Figure>,
}

/// A fully rendered response, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: HTML,
            body: body.to_string(),
        }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: JSON,
                body,
            },
            Err(e) => {
                log::error!("Failed to serialize response: {e}");
                Self {
                    status: 500,
                    content_type: TEXT,
                    body: "Internal server error".to_string(),
                }
            }
        }
    }

    fn error(err: DashboardError) -> Self {
        log::warn!("{err}");
        Self::json(err.status_code(), &ApiResponse::failure(err.to_string()))
    }
}

/// Start the dashboard server and block serving requests.
pub fn start_dashboard_server(ctx: &AppContext, registry: &CallbackRegistry) -> anyhow::Result<()> {
    let addr = ctx.config.bind_addr();
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("binding {addr}: {e}"))?;

    log::info!("Dashboard running at http://{addr}");
    log::info!("Press Ctrl+C to stop");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(ctx, registry, request) {
            log::error!("Failed to send response: {e}");
        }
    }

    Ok(())
}

fn handle_request(
    ctx: &AppContext,
    registry: &CallbackRegistry,
    mut request: Request,
) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    let mut body = String::new();
    let reply = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => route(ctx, registry, &method, path, &body),
        Err(e) => Reply::error(DashboardError::Body(e)),
    };
    log::debug!("{method} {path} -> {}", reply.status);

    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid content type")
        })?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header);
    request.respond(response)
}

/// Map one request onto a reply.
pub fn route(
    ctx: &AppContext,
    registry: &CallbackRegistry,
    method: &Method,
    path: &str,
    body: &str,
) -> Reply {
    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Reply::html(INDEX_HTML),

        (&Method::Get, "/api/layout") => {
            Reply::json(200, &ApiResponse::success(PageLayout::build(ctx, registry)))
        }

        (&Method::Post, "/api/update") => match update(ctx, registry, body) {
            Ok(response) => Reply::json(200, &ApiResponse::success(response)),
            Err(e) => Reply::error(e),
        },

        _ => Reply::error(DashboardError::NotFound(format!("{method} {path}"))),
    }
}

fn update(
    ctx: &AppContext,
    registry: &CallbackRegistry,
    body: &str,
) -> Result<UpdateResponse, DashboardError> {
    let request: UpdateRequest = serde_json::from_str(body)?;
    let inputs = request.inputs(&ctx.constants);
    Ok(UpdateResponse {
        outputs: registry.dispatch(ctx, &request.changed, &inputs),
    })
}
