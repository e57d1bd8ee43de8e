//! One user's schema-building session
//!
//! The session owns the schema, lazily obtains the field catalog (memory,
//! then on-disk cache, then the service) and issues generation requests.
//! Every generation request takes a ticket from a [`RequestSequencer`]; a
//! response that arrives after a newer request was issued is reported as
//! [`SessionError::Superseded`] instead of being returned.

use fieldkit::{
    FieldCatalog, FieldDescriptor, FieldDraft, GenerationRequest, OutputFormat, Schema, SchemaError,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{ClientError, GenerationClient, GenerationOutput, HealthStatus, Record};
use crate::store::{SchemaStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Request {ticket} was superseded by request {latest}")]
    Superseded { ticket: u64, latest: u64 },
}

/// Monotonic request numbering shared by clones
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

/// Sequence number of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket; it becomes the latest
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// True if no newer ticket has been issued
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest() == ticket.0
    }

    fn accept<T>(&self, ticket: RequestTicket, value: T) -> Result<T, SessionError> {
        let latest = self.latest();
        if latest != ticket.0 {
            warn!(ticket = ticket.0, latest, "accept: discarding stale response");
            return Err(SessionError::Superseded {
                ticket: ticket.0,
                latest,
            });
        }
        Ok(value)
    }
}

/// Schema builder bound to a store and a generation service
pub struct Session {
    store: SchemaStore,
    client: Arc<dyn GenerationClient>,
    schema: Schema,
    catalog: Option<FieldCatalog>,
    sequencer: RequestSequencer,
}

impl Session {
    /// Open a session, loading the persisted schema
    pub fn open(store: SchemaStore, client: Arc<dyn GenerationClient>) -> Result<Self, SessionError> {
        let schema = store.load_schema()?;
        debug!(fields = schema.len(), "Session::open: called");
        Ok(Self {
            store,
            client,
            schema,
            catalog: None,
            sequencer: RequestSequencer::new(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// The field catalog: in memory, else cached on disk, else fetched
    pub async fn catalog(&mut self) -> Result<&FieldCatalog, SessionError> {
        if self.catalog.is_none() {
            match self.store.load_catalog()? {
                Some(cached) => {
                    debug!(field_types = cached.len(), "catalog: using cached catalog");
                    self.catalog = Some(cached);
                }
                None => return self.refresh_catalog().await,
            }
        }
        self.catalog
            .as_ref()
            .ok_or_else(|| ClientError::InvalidResponse("field catalog unavailable".to_string()).into())
    }

    /// Fetch the catalog from the service and update the cache
    pub async fn refresh_catalog(&mut self) -> Result<&FieldCatalog, SessionError> {
        let fetched = self.client.fetch_catalog().await?;
        self.store.save_catalog(&fetched)?;

        let stale = self.schema.stale_types(&fetched);
        if !stale.is_empty() {
            warn!(?stale, "refresh_catalog: schema uses types the service no longer advertises");
        }

        let catalog: &FieldCatalog = self.catalog.insert(fetched);
        Ok(catalog)
    }

    /// Add a field built from a name, a canonical type and `key=value` constraint settings
    pub async fn add_field(
        &mut self,
        name: &str,
        field_type: &str,
        settings: &[(String, String)],
    ) -> Result<&[FieldDescriptor], SessionError> {
        debug!(%name, %field_type, settings = settings.len(), "add_field: called");
        let catalog = self.catalog().await?.clone();

        let mut draft = FieldDraft::new();
        draft.set_name(name);
        draft.set_type(field_type);
        for (key, value) in settings {
            draft.set_constraint(key, value, &catalog)?;
        }

        self.schema.commit_draft(&mut draft, &catalog)?;
        self.store.save_schema(&self.schema)?;
        info!(%name, %field_type, "add_field: added");
        Ok(self.schema.fields())
    }

    /// Remove the field at `index`; out of range changes nothing
    pub fn remove_field(&mut self, index: usize) -> Result<Option<FieldDescriptor>, SessionError> {
        let removed = self.schema.remove_field(index);
        if let Some(field) = &removed {
            self.store.save_schema(&self.schema)?;
            info!(index, name = %field.name, "remove_field: removed");
        }
        Ok(removed)
    }

    /// Replace the schema from pasted JSON shorthand
    pub async fn import_json(&mut self, raw: &str) -> Result<&[FieldDescriptor], SessionError> {
        let catalog = self.catalog().await?.clone();
        self.schema.import_json(raw, &catalog)?;
        self.store.save_schema(&self.schema)?;
        Ok(self.schema.fields())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.schema.clear();
        self.store.save_schema(&self.schema)?;
        info!("clear: schema emptied");
        Ok(())
    }

    /// Request a sample of at most [`fieldkit::PREVIEW_LIMIT`] records
    pub async fn preview(&self, requested: u32, seed: Option<i64>) -> Result<Vec<Record>, SessionError> {
        let request = GenerationRequest::preview(&self.schema, requested, seed)?;
        match self.submit(&request).await? {
            GenerationOutput::Records(records) => Ok(records),
            GenerationOutput::Csv(_) => {
                Err(ClientError::InvalidResponse("expected JSON records for a preview".to_string()).into())
            }
        }
    }

    /// Request the full dataset in the chosen format
    pub async fn download(
        &self,
        count: u32,
        format: OutputFormat,
        seed: Option<i64>,
    ) -> Result<GenerationOutput, SessionError> {
        let request = GenerationRequest::download(&self.schema, count, format, seed)?;
        self.submit(&request).await
    }

    pub async fn health(&self) -> Result<HealthStatus, SessionError> {
        Ok(self.client.health().await?)
    }

    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationOutput, SessionError> {
        let ticket = self.sequencer.issue();
        debug!(ticket = ticket.id(), count = request.count, format = %request.format, "submit: called");
        let output = self.client.generate(request).await?;
        self.sequencer.accept(ticket, output)
    }
}
