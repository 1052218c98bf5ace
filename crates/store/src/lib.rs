//! MongoDB tenant datastores.
//!
//! Every tenant lives in its own database on the same deployment (`fhir_hca`, `fhir_hcb`), each
//! holding `patients`, `practitioners` and `encounters` collections. A [`MongoConnector`] opens a
//! fresh client per cycle and checks it with a `ping` before handing out a [`MongoTenant`].

mod documents;

pub use documents::{EncounterDocument, PatientDocument, PeriodDocument, PractitionerDocument};

use ingest_core::constants::{
    ENCOUNTERS_COLLECTION, PATIENTS_COLLECTION, PRACTITIONERS_COLLECTION,
};
use ingest_core::{
    ConnectError, DatastoreConfig, DatastoreConnector, EncounterRecord, PatientRecord,
    PractitionerRecord, StorageId, StoreError, TenantDatastore, TenantId,
};
use mongodb::bson::{doc, Bson};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use serde::Serialize;

/// Database used for the connectivity check.
const ADMIN_DATABASE: &str = "admin";

/// Opens MongoDB sessions with the shared credentials.
#[derive(Clone)]
pub struct MongoConnector {
    uri: String,
    username: String,
    password: String,
}

impl MongoConnector {
    pub fn new(config: &DatastoreConfig) -> Self {
        Self {
            uri: config.uri.as_str().to_string(),
            username: config.username.as_str().to_string(),
            password: config.password.as_str().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl DatastoreConnector for MongoConnector {
    type Handle = MongoTenant;

    async fn connect(&self, tenant: TenantId) -> Result<MongoTenant, ConnectError> {
        let mut options = ClientOptions::parse(self.uri.as_str())
            .await
            .map_err(|e| ConnectError::new(tenant, e.to_string()))?;

        let mut credential = Credential::default();
        credential.username = Some(self.username.clone());
        credential.password = Some(self.password.clone());
        options.credential = Some(credential);

        let client =
            Client::with_options(options).map_err(|e| ConnectError::new(tenant, e.to_string()))?;

        client
            .database(ADMIN_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectError::new(tenant, e.to_string()))?;

        tracing::debug!(%tenant, database = tenant.database_name(), "datastore session opened");

        Ok(MongoTenant {
            database: client.database(tenant.database_name()),
        })
    }
}

/// Session bound to one tenant's database.
pub struct MongoTenant {
    database: Database,
}

impl MongoTenant {
    async fn insert<T>(&self, collection: &'static str, document: &T) -> Result<StorageId, StoreError>
    where
        T: Serialize + Send + Sync,
    {
        let result = self
            .database
            .collection::<T>(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::new(collection, e.to_string()))?;

        storage_id(collection, result.inserted_id)
    }
}

#[async_trait::async_trait]
impl TenantDatastore for MongoTenant {
    async fn insert_patient(&self, record: &PatientRecord) -> Result<StorageId, StoreError> {
        self.insert(PATIENTS_COLLECTION, &PatientDocument::from(record))
            .await
    }

    async fn insert_practitioner(
        &self,
        record: &PractitionerRecord,
    ) -> Result<StorageId, StoreError> {
        self.insert(PRACTITIONERS_COLLECTION, &PractitionerDocument::from(record))
            .await
    }

    async fn insert_encounter(&self, record: &EncounterRecord) -> Result<StorageId, StoreError> {
        let document = EncounterDocument::from_record(record, ENCOUNTERS_COLLECTION)?;
        self.insert(ENCOUNTERS_COLLECTION, &document).await
    }
}

/// The server assigns `ObjectId`s; anything else means the collection is not ours.
fn storage_id(collection: &'static str, inserted_id: Bson) -> Result<StorageId, StoreError> {
    match inserted_id {
        Bson::ObjectId(oid) => Ok(StorageId::new(oid.to_hex())),
        other => Err(StoreError::new(
            collection,
            format!("unexpected inserted id {other}"),
        )),
    }
}
