use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::ResourceError;
use crate::stores::RecordStore;
use crate::types::dto::common::DeleteResponse;
use crate::types::dto::meta::ColumnMeta;

/// Generic CRUD API over the registered resources
///
/// Every registered resource gets the same five routes; the record store
/// supplies the per-resource behavior. Rows travel as untyped JSON since the
/// column set differs per resource.
pub struct ResourcesApi {
    record_store: Arc<RecordStore>,
}

impl ResourcesApi {
    pub fn new(record_store: Arc<RecordStore>) -> Self {
        Self { record_store }
    }
}

/// API tags for resource endpoints
#[derive(Tags)]
enum ResourceTags {
    /// Generic CRUD endpoints
    Resources,
    /// Resource metadata
    Metadata,
}

/// Successful creation response
#[derive(ApiResponse)]
pub enum RecordCreated {
    /// Row created
    #[oai(status = 201)]
    Created(Json<serde_json::Value>),
}

#[OpenApi]
impl ResourcesApi {
    /// Describe the columns of a resource
    #[oai(
        path = "/meta/:resource",
        method = "get",
        tag = "ResourceTags::Metadata"
    )]
    async fn meta(&self, resource: Path<String>) -> Result<Json<Vec<ColumnMeta>>, ResourceError> {
        let descriptor = self
            .record_store
            .registry()
            .resource(&resource)
            .ok_or_else(|| ResourceError::resource_not_found(&resource))?;

        // credential columns are not advertised
        let columns = descriptor
            .columns
            .iter()
            .filter(|c| !c.sensitive)
            .map(ColumnMeta::from)
            .collect();
        Ok(Json(columns))
    }

    /// List rows of a resource (first 1000)
    #[oai(path = "/:resource", method = "get", tag = "ResourceTags::Resources")]
    async fn list(
        &self,
        resource: Path<String>,
    ) -> Result<Json<Vec<serde_json::Value>>, ResourceError> {
        let rows = self.record_store.list(&resource).await?;
        Ok(Json(rows))
    }

    /// Fetch a single row by id
    #[oai(
        path = "/:resource/:id",
        method = "get",
        tag = "ResourceTags::Resources"
    )]
    async fn get(
        &self,
        resource: Path<String>,
        id: Path<String>,
    ) -> Result<Json<serde_json::Value>, ResourceError> {
        let row = self.record_store.get(&resource, &id).await?;
        Ok(Json(row))
    }

    /// Create a row from a JSON payload
    #[oai(path = "/:resource", method = "post", tag = "ResourceTags::Resources")]
    async fn create(
        &self,
        resource: Path<String>,
        body: Json<serde_json::Value>,
    ) -> Result<RecordCreated, ResourceError> {
        let row = self.record_store.create(&resource, body.0).await?;
        Ok(RecordCreated::Created(Json(row)))
    }

    /// Partially update a row: only the supplied keys are written
    #[oai(
        path = "/:resource/:id",
        method = "put",
        tag = "ResourceTags::Resources"
    )]
    async fn update(
        &self,
        resource: Path<String>,
        id: Path<String>,
        body: Json<serde_json::Value>,
    ) -> Result<Json<serde_json::Value>, ResourceError> {
        let row = self.record_store.update(&resource, &id, body.0).await?;
        Ok(Json(row))
    }

    /// Delete a row by id
    #[oai(
        path = "/:resource/:id",
        method = "delete",
        tag = "ResourceTags::Resources"
    )]
    async fn delete(
        &self,
        resource: Path<String>,
        id: Path<String>,
    ) -> Result<Json<DeleteResponse>, ResourceError> {
        self.record_store.delete(&resource, &id).await?;
        Ok(Json(DeleteResponse {
            message: "Deleted".to_string(),
        }))
    }
}
