use crate::{errors::ParseError, providers::db::RecipeStore, recipe::RecipeRecord};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::{debug, error};

/// The table recipes are written to when none is configured.
pub const DEFAULT_RECIPES_TABLE: &str = "recipes";

/// Writes recipe rows through the Supabase REST (PostgREST) interface.
#[derive(Clone, Debug)]
pub struct SupabaseTable {
    client: ReqwestClient,
    base_url: String,
    service_key: String,
    table: String,
    upsert_on_upload_id: bool,
}

impl SupabaseTable {
    /// Creates a new `SupabaseTable` that performs plain inserts.
    pub fn new(base_url: String, service_key: String, table: String) -> Result<Self, ParseError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ParseError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            table,
            upsert_on_upload_id: false,
        })
    }

    /// Switches inserts to upserts keyed on `upload_id`, so a retried
    /// request replaces the earlier row instead of adding a second one.
    pub fn with_upsert_on_upload_id(mut self, enabled: bool) -> Self {
        self.upsert_on_upload_id = enabled;
        self
    }

    /// The REST endpoint for the configured table.
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl RecipeStore for SupabaseTable {
    fn name(&self) -> &str {
        "Supabase"
    }

    async fn insert_recipe(&self, record: &RecipeRecord) -> Result<Value, ParseError> {
        let url = self.table_url();
        debug!(upload_id = %record.upload_id, "--> Inserting recipe into '{}'", self.table);

        let mut request = self
            .client
            .post(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(record);

        request = if self.upsert_on_upload_id {
            request
                .query(&[("on_conflict", "upload_id")])
                .header("Prefer", "resolution=merge-duplicates,return=representation")
        } else {
            request.header("Prefer", "return=representation")
        };

        let response = request.send().await.map_err(ParseError::DatastoreRequest)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ParseError::DatastoreRequest)?;

        if !status.is_success() {
            error!(%status, "Datastore rejected the insert: {}", body);
            return Err(ParseError::DatastoreApi(format!("{status}: {body}")));
        }

        if body.trim().is_empty() {
            return Ok(Value::Array(vec![]));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
