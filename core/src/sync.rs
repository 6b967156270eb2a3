//! Single-writer synchronizer between the local `TodoStore` and the remote
//! collection.
//!
//! # Design
//! `TodoSynchronizer` is a cheap, cloneable handle. Every operation becomes an
//! `Intent` on a bounded mpsc queue consumed by one worker task, which owns
//! the store. The worker handles intents one at a time in arrival order:
//! build the request, run it on the blocking pool, parse, reconcile, publish
//! a snapshot, reply. Two overlapping operations on the same record therefore
//! apply in the order they were issued and never interleave.
//!
//! Failures leave the store untouched. They are logged at `warn` and returned
//! to the caller.
//!
//! The worker exits once every handle has been dropped and the queue is
//! drained.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, SyncError};
use crate::http::{HttpRequest, HttpResponse};
use crate::store::TodoStore;
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Public jsonplaceholder endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Settings for `TodoSynchronizer::spawn`.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub base_url: String,
    /// Per-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Intents that may wait before `send` starts applying backpressure.
    pub queue_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, SyncError>>;

enum Intent {
    Load { reply: Reply<usize> },
    /// `title: None` submits the current draft.
    Create { title: Option<String>, reply: Reply<Todo> },
    SetCompleted { id: TodoId, completed: bool, reply: Reply<()> },
    Toggle { id: TodoId, reply: Reply<bool> },
    Remove { id: TodoId, reply: Reply<()> },
    SetDraft { text: String, reply: Reply<()> },
}

/// Handle to the synchronizer worker.
#[derive(Clone)]
pub struct TodoSynchronizer {
    intents: mpsc::Sender<Intent>,
    state: watch::Receiver<TodoStore>,
}

impl TodoSynchronizer {
    /// Start a worker talking to `config.base_url` over ureq.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: &SyncConfig) -> Self {
        Self::with_transport(
            TodoClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
            config.queue_capacity,
        )
    }

    /// Start a worker over an arbitrary transport.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_transport<T: Transport>(client: TodoClient, transport: T, queue_capacity: usize) -> Self {
        let (intents, queue) = mpsc::channel(queue_capacity.max(1));
        let (publisher, state) = watch::channel(TodoStore::new());
        let worker = Worker {
            client,
            transport: Arc::new(transport),
            store: TodoStore::new(),
            publisher,
        };
        tokio::spawn(worker.run(queue));
        Self { intents, state }
    }

    /// Replace the local list with the full remote collection.
    /// Returns the number of records received.
    pub async fn load(&self) -> Result<usize, SyncError> {
        self.request(|reply| Intent::Load { reply }).await
    }

    /// Create a todo with `title` and append the server's record.
    /// Clears the draft on success.
    pub async fn create(&self, title: impl Into<String>) -> Result<Todo, SyncError> {
        let title = Some(title.into());
        self.request(|reply| Intent::Create { title, reply }).await
    }

    /// Create a todo from the current draft.
    pub async fn submit(&self) -> Result<Todo, SyncError> {
        self.request(|reply| Intent::Create { title: None, reply }).await
    }

    pub async fn set_draft(&self, text: impl Into<String>) -> Result<(), SyncError> {
        let text = text.into();
        self.request(|reply| Intent::SetDraft { text, reply }).await
    }

    pub async fn set_completed(&self, id: TodoId, completed: bool) -> Result<(), SyncError> {
        self.request(|reply| Intent::SetCompleted { id, completed, reply })
            .await
    }

    /// Flip the completion flag of the first local record with `id`.
    /// Returns the new value.
    pub async fn toggle(&self, id: TodoId) -> Result<bool, SyncError> {
        self.request(|reply| Intent::Toggle { id, reply }).await
    }

    pub async fn remove(&self, id: TodoId) -> Result<(), SyncError> {
        self.request(|reply| Intent::Remove { id, reply }).await
    }

    /// Current state as last published by the worker.
    pub fn snapshot(&self) -> TodoStore {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<TodoStore> {
        self.state.clone()
    }

    async fn request<T>(&self, intent: impl FnOnce(Reply<T>) -> Intent) -> Result<T, SyncError> {
        let (reply, response) = oneshot::channel();
        self.intents
            .send(intent(reply))
            .await
            .map_err(|_| SyncError::Closed)?;
        response.await.map_err(|_| SyncError::Closed)?
    }
}

struct Worker {
    client: TodoClient,
    transport: Arc<dyn Transport>,
    store: TodoStore,
    publisher: watch::Sender<TodoStore>,
}

impl Worker {
    async fn run(mut self, mut queue: mpsc::Receiver<Intent>) {
        debug!(base_url = self.client.base_url(), "synchronizer started");
        while let Some(intent) = queue.recv().await {
            self.handle(intent).await;
        }
        debug!("synchronizer stopped");
    }

    async fn handle(&mut self, intent: Intent) {
        // A dropped receiver means the caller stopped waiting; the work is done either way.
        match intent {
            Intent::Load { reply } => {
                let result = self.load().await;
                let _ = reply.send(logged("load", result));
            }
            Intent::Create { title, reply } => {
                let title = title.unwrap_or_else(|| self.store.draft().to_string());
                let result = self.create(title).await;
                let _ = reply.send(logged("create", result));
            }
            Intent::SetCompleted { id, completed, reply } => {
                let result = self.set_completed(id, completed).await;
                let _ = reply.send(logged("set_completed", result));
            }
            Intent::Toggle { id, reply } => {
                let result = self.toggle(id).await;
                let _ = reply.send(logged("toggle", result));
            }
            Intent::Remove { id, reply } => {
                let result = self.remove(id).await;
                let _ = reply.send(logged("remove", result));
            }
            Intent::SetDraft { text, reply } => {
                self.store.set_draft(text);
                self.publish();
                let _ = reply.send(Ok(()));
            }
        }
    }

    async fn load(&mut self) -> Result<usize, SyncError> {
        let request = self.client.build_list_todos();
        let todos = self.client.parse_list_todos(self.round_trip(request).await?)?;
        let count = todos.len();
        self.store.replace_all(todos);
        self.publish();
        debug!(count, "loaded todos");
        Ok(count)
    }

    async fn create(&mut self, title: String) -> Result<Todo, SyncError> {
        let request = self.client.build_create_todo(&CreateTodo::new(title))?;
        let todo = self.client.parse_create_todo(self.round_trip(request).await?)?;
        self.store.apply_created(todo.clone());
        self.publish();
        debug!(id = %todo.id, "created todo");
        Ok(todo)
    }

    async fn set_completed(&mut self, id: TodoId, completed: bool) -> Result<(), SyncError> {
        let request = self
            .client
            .build_update_todo(&id, &UpdateTodo::completed(completed))?;
        self.client.parse_update_todo(self.round_trip(request).await?)?;
        let matched = self.store.apply_completed(&id, completed);
        self.publish();
        debug!(%id, completed, matched, "updated todo");
        Ok(())
    }

    async fn toggle(&mut self, id: TodoId) -> Result<bool, SyncError> {
        let completed = match self.store.find(&id) {
            Some(todo) => !todo.completed,
            None => return Err(SyncError::UnknownTodo(id)),
        };
        self.set_completed(id, completed).await?;
        Ok(completed)
    }

    async fn remove(&mut self, id: TodoId) -> Result<(), SyncError> {
        let request = self.client.build_delete_todo(&id);
        self.client.parse_delete_todo(self.round_trip(request).await?)?;
        let removed = self.store.apply_removed(&id);
        self.publish();
        debug!(%id, removed, "removed todo");
        Ok(())
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.execute(request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }

    fn publish(&self) {
        self.publisher.send_replace(self.store.clone());
    }
}

fn logged<T>(operation: &'static str, result: Result<T, SyncError>) -> Result<T, SyncError> {
    if let Err(error) = &result {
        match error {
            SyncError::Api(api) => {
                warn!(operation, status = ?api.status(), error = %api, "remote call failed")
            }
            other => warn!(operation, error = %other, "operation rejected"),
        }
    }
    result
}
