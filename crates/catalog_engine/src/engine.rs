use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use catalog_logging::catalog_warn;

use crate::api::{ApiSettings, PlantApi, ReqwestApi};
use crate::{EngineEvent, PageQuery, PlantDraft, WriteKind};

enum EngineCommand {
    FetchPage { session: u64, query: PageQuery },
    FetchDetail { id: String },
    Create { draft: PlantDraft },
    Update { id: String, draft: PlantDraft },
    DeleteOne { id: String },
    DeleteMany { ids: Vec<String> },
}

/// Handle to the engine thread. Commands go in over an mpsc channel and
/// are executed on a dedicated tokio runtime; completion events come back
/// over `try_recv`. Clones share both channels.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let api = Arc::new(ReqwestApi::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_page(&self, session: u64, query: PageQuery) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage { session, query });
    }

    pub fn fetch_detail(&self, id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchDetail { id: id.into() });
    }

    pub fn create(&self, draft: PlantDraft) {
        let _ = self.cmd_tx.send(EngineCommand::Create { draft });
    }

    pub fn update(&self, id: impl Into<String>, draft: PlantDraft) {
        let _ = self.cmd_tx.send(EngineCommand::Update {
            id: id.into(),
            draft,
        });
    }

    pub fn delete_one(&self, id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::DeleteOne { id: id.into() });
    }

    pub fn delete_many(&self, ids: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::DeleteMany { ids });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn PlantApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage { session, query } => {
            let result = api.list(&query).await;
            if let Err(err) = &result {
                catalog_warn!("Page fetch failed (session {}): {}", session, err);
            }
            EngineEvent::PageFetched { session, result }
        }
        EngineCommand::FetchDetail { id } => {
            let result = api.detail(&id).await;
            if let Err(err) = &result {
                catalog_warn!("Detail fetch failed for {}: {}", id, err);
            }
            EngineEvent::DetailFetched { result }
        }
        EngineCommand::Create { draft } => {
            let result = api.create(&draft).await.map(|_| 1);
            EngineEvent::Mutated {
                kind: WriteKind::Create,
                result,
            }
        }
        EngineCommand::Update { id, draft } => {
            let result = api.update(&id, &draft).await.map(|_| 1);
            EngineEvent::Mutated {
                kind: WriteKind::Update,
                result,
            }
        }
        EngineCommand::DeleteOne { id } => {
            let result = api.delete_one(&id).await;
            EngineEvent::Mutated {
                kind: WriteKind::DeleteOne,
                result,
            }
        }
        EngineCommand::DeleteMany { ids } => {
            let result = api.delete_many(&ids).await;
            EngineEvent::Mutated {
                kind: WriteKind::DeleteMany,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
