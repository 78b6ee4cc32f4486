//! SurrealDB-backed registration store.

use super::{with_write_timeout, RegistrationStore, REGISTRATION_TABLE};
use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::registration::{Identity, Registration};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::{RecordId, Surreal};
use tracing::{debug, info, instrument};

/// Storage-level shape of the registration table.
///
/// Looser than the request validator; it only guarantees that no partial
/// document can be written, whoever the writer is.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS registration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS event ON registration TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD IF NOT EXISTS teamName ON registration TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD IF NOT EXISTS teamLeader ON registration TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD IF NOT EXISTS phoneNo ON registration TYPE string
    ASSERT string::len($value) = 10 AND string::is::numeric($value);
DEFINE FIELD IF NOT EXISTS email ON registration TYPE string ASSERT string::contains($value, "@");
DEFINE FIELD IF NOT EXISTS rollNo ON registration TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD IF NOT EXISTS members ON registration TYPE array<string>
    ASSERT array::len($value) > 0
    AND array::len(array::filter($value, |$m| string::len(string::trim($m)) = 0)) = 0;
DEFINE FIELD IF NOT EXISTS createdAt ON registration TYPE datetime DEFAULT time::now() READONLY;
"#;

/// Record returned by SurrealDB after a create; only the id is needed.
#[derive(Debug, Deserialize)]
struct CreatedRecord {
    id: RecordId,
}

/// Registration store backed by a SurrealDB connection.
///
/// The connection is opened once by [`SurrealStore::connect`] and shared by all
/// requests; cloning the store clones the handle, not the connection.
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Surreal<Any>,
    write_timeout: Duration,
}

impl SurrealStore {
    /// Connect, authenticate, select namespace/database and apply the schema.
    ///
    /// Any failure here is fatal for the service.
    #[instrument(skip(config), fields(url = %config.url, ns = %config.namespace, db = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let connection_error = |reason: String| StoreError::Connection {
            url: config.url.clone(),
            reason,
        };

        let db = connect(config.url.as_str())
            .await
            .map_err(|e| connection_error(e.to_string()))?;

        db.health()
            .await
            .map_err(|e| connection_error(format!("health check failed: {}", e)))?;

        if let Some(username) = &config.username {
            let password = config
                .password
                .as_ref()
                .map(|p| p.expose_secret().as_str())
                .unwrap_or_default();
            db.signin(Root {
                username: username.as_str(),
                password,
            })
            .await
            .map_err(|e| connection_error(format!("sign-in failed: {}", e)))?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.name.as_str())
            .await
            .map_err(|e| connection_error(e.to_string()))?;

        db.query(SCHEMA).await?.check()?;
        debug!(table = REGISTRATION_TABLE, "Registration schema applied");

        info!("Connected to SurrealDB");

        Ok(Self {
            db,
            write_timeout: config.write_timeout(),
        })
    }

    /// Underlying database handle.
    pub fn db(&self) -> &Surreal<Any> {
        &self.db
    }
}

#[async_trait]
impl RegistrationStore for SurrealStore {
    /// Create one `registration` document.
    ///
    /// A timeout only stops waiting for the acknowledgement. A write the server
    /// already received is not cancelled, so the document may still be stored
    /// even though the caller sees [`StoreError::Timeout`].
    #[instrument(skip_all, fields(event = registration.event(), team = registration.team_name()))]
    async fn create(&self, registration: Registration) -> Result<Identity, StoreError> {
        let created = with_write_timeout(self.write_timeout, async {
            let created: Option<CreatedRecord> = self
                .db
                .create(REGISTRATION_TABLE)
                .content(registration)
                .await?;
            Ok::<_, StoreError>(created)
        })
        .await?;

        let record = created.ok_or(StoreError::MissingIdentity)?;
        let id = Identity::new(record.id.to_string());
        debug!(%id, "Registration document created");

        Ok(id)
    }

    async fn health_check(&self) -> bool {
        self.db.health().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "surrealdb"
    }
}
