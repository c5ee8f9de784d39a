//! Scripted collaborators for unit tests.

use crate::{
    api::ApiClient,
    errors::AppError,
    features::auth::{
        fingerprint::{FingerprintError, FingerprintSource},
        types::DeviceFingerprint,
    },
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tokio::sync::Notify;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Probe = Box<dyn Fn(&str) + Send + Sync>;

/// Fake API answering from a per-path script. Unscripted paths answer `{}`.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    responses: Mutex<HashMap<String, Result<Value, AppError>>>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
    probe: Mutex<Option<Probe>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, result: Result<Value, AppError>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(path.to_string(), result);
        }
        self
    }

    /// Makes requests to `path` wait until the returned handle is notified.
    pub fn hold(&self, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        if let Ok(mut holds) = self.holds.lock() {
            holds.insert(path.to_string(), Arc::clone(&notify));
        }
        notify
    }

    /// Runs `probe` with the path of every request as it is issued.
    pub fn with_probe(self, probe: impl Fn(&str) + Send + Sync + 'static) -> Self {
        if let Ok(mut slot) = self.probe.lock() {
            *slot = Some(Box::new(probe));
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.path).collect()
    }

    async fn answer(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
        }
        if let Ok(probe) = self.probe.lock() {
            if let Some(probe) = probe.as_ref() {
                probe(path);
            }
        }

        let hold = self
            .holds
            .lock()
            .ok()
            .and_then(|holds| holds.get(path).cloned());
        if let Some(notify) = hold {
            notify.notified().await;
        }

        self.responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(path).cloned())
            .unwrap_or_else(|| Ok(json!({})))
    }
}

#[async_trait]
impl ApiClient for ScriptedApi {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        self.answer("GET", path, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, AppError> {
        self.answer("POST", path, body).await
    }
}

pub(crate) fn http_error(status: u16, server_message: Option<&str>) -> AppError {
    AppError::Http {
        status,
        message: "Request failed.".to_string(),
        server_message: server_message.map(str::to_string),
    }
}

pub(crate) struct FixedFingerprint {
    value: Option<String>,
    calls: AtomicUsize,
}

impl FixedFingerprint {
    pub fn new(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            value: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FingerprintSource for FixedFingerprint {
    async fn fingerprint(&self) -> Result<DeviceFingerprint, FingerprintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.value
            .as_deref()
            .map(DeviceFingerprint::new)
            .ok_or_else(|| FingerprintError("generator unavailable".to_string()))
    }
}
