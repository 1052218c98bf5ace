//! In-memory stand-ins for the queue and the tenant datastores.

#![allow(dead_code)]

use ingest_core::constants::{ENCOUNTERS_COLLECTION, PATIENTS_COLLECTION, PRACTITIONERS_COLLECTION};
use ingest_core::{
    ConnectError, DatastoreConnector, EncounterRecord, InboundMessage, MessageSource,
    PatientRecord, PersistStage, PractitionerRecord, SourceError, StorageId, StoreError,
    TenantDatastore, TenantId,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const FIXTURE: &str = r#"{
    "encounter": {
        "fhirId": "123",
        "fullUrl": "urn:uuid:123",
        "status": "finished",
        "class": "outpatient",
        "period": {
            "start": "2023-01-01T10:00:00Z",
            "end": "2023-01-01T11:00:00Z"
        },
        "practitionerId": "dr-smith",
        "patientId": "patient-123"
    },
    "practitioner": {
        "fhirId": "dr-smith",
        "givenName": "John",
        "familyName": "Smith"
    },
    "patient": {
        "fhirId": "patient-123",
        "givenName": "Maria",
        "familyName": "Silva",
        "birthDate": "1990-01-01",
        "gender": "female"
    }
}"#;

pub fn message(id: &str, routing_key: &str, body: &str) -> InboundMessage {
    InboundMessage {
        id: id.to_string(),
        body: body.to_string(),
        routing_key: routing_key.to_string(),
    }
}

/// Replays a fixed sequence of receive results, then reports an empty queue forever.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    state: Arc<Mutex<SourceState>>,
}

#[derive(Default)]
struct SourceState {
    script: VecDeque<Result<Option<InboundMessage>, SourceError>>,
    receives: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Option<InboundMessage>, SourceError>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SourceState {
                script: script.into(),
                receives: 0,
            })),
        }
    }

    pub fn receives(&self) -> usize {
        self.state.lock().unwrap().receives
    }
}

#[async_trait::async_trait]
impl MessageSource for ScriptedSource {
    async fn receive_one(&self) -> Result<Option<InboundMessage>, SourceError> {
        let mut state = self.state.lock().unwrap();
        state.receives += 1;
        state.script.pop_front().unwrap_or(Ok(None))
    }
}

/// Everything one tenant database holds.
#[derive(Default, Debug, Clone)]
pub struct TenantCollections {
    pub patients: Vec<(StorageId, PatientRecord)>,
    pub practitioners: Vec<(StorageId, PractitionerRecord)>,
    pub encounters: Vec<(StorageId, EncounterRecord)>,
}

#[derive(Default)]
struct MemoryState {
    tenants: HashMap<TenantId, TenantCollections>,
    connects: usize,
    refuse_connects: usize,
    fail_insert: Option<PersistStage>,
    next_id: u64,
}

/// Shared in-memory datastore server; every `connect` hands out a handle onto it.
#[derive(Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnector {
    /// Refuse the next `count` connection attempts.
    pub fn refuse_next_connects(&self, count: usize) {
        self.state.lock().unwrap().refuse_connects = count;
    }

    /// Make every insert at `stage` fail; `None` clears the fault.
    pub fn fail_inserts_at(&self, stage: Option<PersistStage>) {
        self.state.lock().unwrap().fail_insert = stage;
    }

    pub fn connects(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    pub fn tenant(&self, tenant: TenantId) -> TenantCollections {
        self.state
            .lock()
            .unwrap()
            .tenants
            .get(&tenant)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DatastoreConnector for MemoryConnector {
    type Handle = MemoryHandle;

    async fn connect(&self, tenant: TenantId) -> Result<MemoryHandle, ConnectError> {
        let mut state = self.state.lock().unwrap();
        state.connects += 1;
        if state.refuse_connects > 0 {
            state.refuse_connects -= 1;
            return Err(ConnectError::new(tenant, "server selection timeout"));
        }
        Ok(MemoryHandle {
            tenant,
            state: Arc::clone(&self.state),
        })
    }
}

pub struct MemoryHandle {
    tenant: TenantId,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryHandle {
    fn insert<T>(
        &self,
        stage: PersistStage,
        collection: &'static str,
        select: impl FnOnce(&mut TenantCollections) -> &mut Vec<(StorageId, T)>,
        record: T,
    ) -> Result<StorageId, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_insert == Some(stage) {
            return Err(StoreError::new(collection, "write concern error"));
        }
        state.next_id += 1;
        let id = StorageId::new(format!("{:024x}", state.next_id));
        let collections = state.tenants.entry(self.tenant).or_default();
        select(collections).push((id.clone(), record));
        Ok(id)
    }
}

#[async_trait::async_trait]
impl TenantDatastore for MemoryHandle {
    async fn insert_patient(&self, record: &PatientRecord) -> Result<StorageId, StoreError> {
        self.insert(
            PersistStage::Patient,
            PATIENTS_COLLECTION,
            |c| &mut c.patients,
            record.clone(),
        )
    }

    async fn insert_practitioner(
        &self,
        record: &PractitionerRecord,
    ) -> Result<StorageId, StoreError> {
        self.insert(
            PersistStage::Practitioner,
            PRACTITIONERS_COLLECTION,
            |c| &mut c.practitioners,
            record.clone(),
        )
    }

    async fn insert_encounter(&self, record: &EncounterRecord) -> Result<StorageId, StoreError> {
        self.insert(
            PersistStage::Encounter,
            ENCOUNTERS_COLLECTION,
            |c| &mut c.encounters,
            record.clone(),
        )
    }
}
