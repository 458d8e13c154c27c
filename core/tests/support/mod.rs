#![allow(dead_code)]

use schain_core::error::{CoreError, CoreResult};
use schain_core::fetch::RemoteFetcher;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory remote: URL -> body or failure. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct FakeFetcher {
    routes: HashMap<String, Result<String, String>>,
    hits: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.routes.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

impl RemoteFetcher for FakeFetcher {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        self.hits.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(CoreError::RemoteFetchFailed(reason.clone())),
            None => Err(CoreError::RemoteFetchFailed(format!(
                "HTTP status client error (404 Not Found) for url ({})",
                url
            ))),
        }
    }
}

pub fn sellers_json(entries: &[(&str, &str, &str)]) -> String {
    let sellers: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, name, domain)| {
            serde_json::json!({"seller_id": id, "name": name, "domain": domain, "seller_type": "INTERMEDIARY"})
        })
        .collect();
    serde_json::json!({"version": "1.0", "sellers": sellers}).to_string()
}
