//! Scripted transport for integration tests
//!
//! Maps exact URLs to queued outcomes, records every request in arrival
//! order, and tracks peak request concurrency through an in-flight gauge.

use async_trait::async_trait;
use shelfdash::{FetchError, RemoteClient};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Outcome = Result<serde_json::Value, FetchError>;

pub struct ScriptedClient {
    responses: Mutex<HashMap<String, VecDeque<Outcome>>>,
    requests: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Queue an outcome for an exact URL (repeat to script sequences)
    pub fn script(self, url: &str, outcome: Outcome) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    /// Queue a successful JSON body for an exact URL
    pub fn script_json(self, url: &str, body: serde_json::Value) -> Self {
        self.script(url, Ok(body))
    }

    /// Hold every request open for `delay` so overlap is observable
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Peak number of simultaneously open requests
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for ScriptedClient {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self
            .responses
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front())
        {
            Some(outcome) => outcome,
            None => Err(FetchError::Api {
                status: 404,
                message: format!("unscripted URL: {}", url),
            }),
        }
    }
}
