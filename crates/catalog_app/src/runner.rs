use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use catalog_core::{
    Category, Effect, Item, ItemId, Msg, MutationKind, PageData, PageRequest, PromoTag, SessionId,
};
use catalog_engine::{
    ApiSettings, EngineEvent, EngineHandle, PageEnvelope, PageQuery, PlantDraft, PlantRecord,
    WriteKind,
};
use catalog_logging::catalog_info;

/// Delay after the first page of a session before end-of-list triggers
/// count. Covers the render reflow that follows the initial load.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Executes core effects against the engine and pumps engine events back
/// into the core's message channel.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = EngineHandle::new(settings);
        let runner = Self {
            engine,
            msg_tx: msg_tx.clone(),
        };
        runner.spawn_event_pump(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { session, request } => {
                    catalog_info!("FetchPage session={} page={}", session.0, request.page);
                    self.engine.fetch_page(session.0, to_query(&request));
                }
                Effect::StartSettleTimer { session } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(SETTLE_DELAY);
                        let _ = tx.send(Msg::SettleElapsed { session });
                    });
                }
                Effect::DeleteBatch { ids } => {
                    catalog_info!("DeleteBatch n={}", ids.len());
                    self.engine
                        .delete_many(ids.iter().map(|id| id.as_str().to_owned()).collect());
                }
            }
        }
    }

    // Shell-driven writes; completions come back through the event pump
    // and trigger the reload there.

    pub fn create(&self, draft: PlantDraft) {
        self.engine.create(draft);
    }

    pub fn update_item(&self, id: &ItemId, draft: PlantDraft) {
        self.engine.update(id.as_str(), draft);
    }

    pub fn delete_one(&self, id: &ItemId) {
        self.engine.delete_one(id.as_str());
    }

    pub fn fetch_detail(&self, id: &str) {
        self.engine.fetch_detail(id);
    }

    fn spawn_event_pump(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                match event {
                    EngineEvent::PageFetched { session, result } => {
                        let session = SessionId(session);
                        let msg = match result {
                            Ok(envelope) => Msg::PageLoaded {
                                session,
                                page: map_page(envelope),
                            },
                            Err(err) => Msg::PageFailed {
                                session,
                                error: err.to_string(),
                            },
                        };
                        let _ = msg_tx.send(msg);
                    }
                    EngineEvent::DetailFetched { result } => match result {
                        Ok(record) => println!("{}", crate::shell::render_detail(&record)),
                        Err(err) => println!("detail error: {err}"),
                    },
                    EngineEvent::Mutated { kind, result } => {
                        let msg = match result {
                            Ok(count) => Msg::MutationCompleted {
                                kind: map_write(kind, count),
                            },
                            Err(err) => Msg::MutationFailed {
                                kind: map_write(kind, 0),
                                error: err.to_string(),
                            },
                        };
                        let _ = msg_tx.send(msg);
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn to_query(request: &PageRequest) -> PageQuery {
    PageQuery {
        page: request.page,
        page_size: request.page_size,
        category: request.category.map(|c| c.as_str().to_owned()),
        sort: request.sort.map(|s| s.as_str().to_owned()),
    }
}

fn map_page(envelope: PageEnvelope) -> PageData {
    PageData {
        page: envelope.page,
        items: envelope.plants.into_iter().map(map_record).collect(),
        total: envelope.total,
    }
}

fn map_record(record: PlantRecord) -> Item {
    Item {
        id: ItemId::new(record.id),
        name: record.name,
        price: record.cost,
        category: Category::parse(&record.category),
        status: PromoTag::parse(&record.status),
        description: record.description,
        image: if record.image.is_empty() {
            None
        } else {
            Some(record.image)
        },
    }
}

fn map_write(kind: WriteKind, count: u64) -> MutationKind {
    match kind {
        WriteKind::Create => MutationKind::Created,
        WriteKind::Update => MutationKind::Updated,
        WriteKind::DeleteOne => MutationKind::Deleted { count },
        WriteKind::DeleteMany => MutationKind::BatchDeleted { count },
    }
}
