#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use exposure_api_client::error::{ApiError, Result};
use exposure_api_client::transport::{BoxFuture, HttpRequest, HttpResponse, Transport};
use exposure_api_client::{origin, Dispatcher, OriginContext, StaticIdentity};
use tokio::sync::Notify;

pub const BASE: &str = "https://api.example.com/v1";

/// Scripted reply for one action path.
#[derive(Clone)]
pub enum Reply {
    Respond(u16, String),
    Fail(String),
    /// Wait until the gate is opened, then respond.
    Gated(Arc<Notify>, u16, String),
    Panic,
}

/// Records every request and answers from a per-path script.
pub struct FakeTransport {
    calls: Mutex<Vec<HttpRequest>>,
    script: Mutex<HashMap<String, Reply>>,
    fallback: Reply,
}

impl FakeTransport {
    pub fn new(fallback: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(HashMap::new()),
            fallback,
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(Reply::Respond(200, body.to_string()))
    }

    /// Reply to requests whose URL path ends with `/{action}`.
    pub fn on(self: &Arc<Self>, action: &str, reply: Reply) -> Arc<Self> {
        self.script
            .lock()
            .unwrap()
            .insert(action.to_string(), reply);
        self.clone()
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn reply_for(&self, request: &HttpRequest) -> Reply {
        let path = request.url.path();
        self.script
            .lock()
            .unwrap()
            .iter()
            .filter(|(action, _)| path.ends_with(&format!("/{action}")))
            .max_by_key(|(action, _)| action.len())
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        let reply = self.reply_for(&request);
        self.calls.lock().unwrap().push(request);
        Box::pin(async move {
            match reply {
                Reply::Respond(status, body) => Ok(HttpResponse::new(status, body)),
                Reply::Fail(message) => Err(ApiError::Transport(message)),
                Reply::Gated(gate, status, body) => {
                    gate.notified().await;
                    Ok(HttpResponse::new(status, body))
                }
                Reply::Panic => panic!("transport blew up"),
            }
        })
    }
}

pub fn dispatcher(transport: Arc<FakeTransport>) -> (Dispatcher, OriginContext) {
    let (origin, handle) = origin::channel();
    let dispatcher = Dispatcher::builder()
        .base_endpoint(BASE)
        .origin(handle)
        .transport(transport)
        .identity(StaticIdentity::new("uid-1", 7))
        .build()
        .expect("build dispatcher");
    (dispatcher, origin)
}
