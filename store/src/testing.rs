//! Scripted backend for tests.
//!
//! [`ScriptedStore`] behaves like a [`MemoryStore`] but records every call and
//! lets a test queue failures for specific operations.

use crate::backend::KeyValueStore;
use crate::errors::BackendError;
use crate::memory::MemoryStore;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreCall {
    Get,
    Set,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub call: StoreCall,
    pub key: String,
    pub value: Option<String>,
}

#[derive(Default)]
pub struct ScriptedStore {
    inner: MemoryStore,
    queued: Mutex<HashMap<StoreCall, VecDeque<BackendError>>>,
    persistent: Mutex<HashMap<StoreCall, BackendError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call of `call` with `error`. Queued failures are
    /// consumed in order before any persistent failure applies.
    pub fn fail_next(&self, call: StoreCall, error: BackendError) {
        let mut queued = self.queued.lock().unwrap_or_else(|e| e.into_inner());
        queued.entry(call).or_default().push_back(error);
    }

    /// Fail every call of `call` with `error` until [`Self::recover`].
    pub fn fail_always(&self, call: StoreCall, error: BackendError) {
        let mut persistent = self.persistent.lock().unwrap_or_else(|e| e.into_inner());
        persistent.insert(call, error);
    }

    pub fn recover(&self, call: StoreCall) {
        let mut persistent = self.persistent.lock().unwrap_or_else(|e| e.into_inner());
        persistent.remove(&call);
    }

    /// Write a raw value without recording a call.
    pub async fn seed(&self, key: &str, value: &str) {
        // MemoryStore never fails
        let _ = self.inner.set(key, value).await;
    }

    /// Read a raw value without recording a call.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count(&self, call: StoreCall) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|recorded| recorded.call == call)
            .count()
    }

    fn record(&self, call: StoreCall, key: &str, value: Option<&str>) -> Result<(), BackendError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                call,
                key: key.to_string(),
                value: value.map(str::to_string),
            });

        let queued = self
            .queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        if let Some(error) = queued {
            return Err(error);
        }

        let persistent = self.persistent.lock().unwrap_or_else(|e| e.into_inner());
        match persistent.get(&call) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for ScriptedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.record(StoreCall::Get, key, None)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.record(StoreCall::Set, key, Some(value))?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.record(StoreCall::Remove, key, None)?;
        self.inner.remove(key).await
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}
