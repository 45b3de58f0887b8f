//! Object store implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use scraptally_shared::config::StorageSettings;
use scraptally_shared::types::{OwnerId, TransactionId};

use super::error::StorageError;

/// A stored attachment object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Public URL of the stored file.
    pub url: String,
    /// Backend key used to delete the object later.
    pub storage_id: String,
}

/// Attachment store collaborator contract.
///
/// Implemented by [`ObjectStore`] in production and by in-memory fakes in
/// tests. Deleting an id that does not exist (or was already deleted) must
/// succeed.
pub trait AttachmentStore: Send + Sync {
    /// Stores a file and returns its public URL and storage id.
    fn put(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<StoredObject, StorageError>> + Send;

    /// Deletes a stored object by id.
    fn delete(
        &self,
        storage_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}

/// OpenDAL-backed attachment store.
pub struct ObjectStore {
    operator: Operator,
    public_base_url: String,
}

impl ObjectStore {
    /// Creates a store from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend name is unknown or the backend
    /// cannot be initialized.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let operator = match settings.backend.as_str() {
            "s3" => {
                let builder = services::S3::default()
                    .endpoint(&settings.endpoint)
                    .bucket(&settings.bucket)
                    .access_key_id(&settings.access_key_id)
                    .secret_access_key(&settings.secret_access_key)
                    .region(&settings.region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            "fs" => {
                let builder = services::Fs::default().root(&settings.fs_root);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            other => return Err(StorageError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            operator,
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the storage key for a bill attachment.
    ///
    /// Keys are namespaced per owner and bill so tenants never collide:
    /// `attachments/{owner}/{transaction}/{uuid}-{filename}`.
    #[must_use]
    pub fn object_key(owner: OwnerId, transaction_id: TransactionId, filename: &str) -> String {
        let safe_name: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "attachments/{owner}/{transaction_id}/{}-{safe_name}",
            Uuid::new_v4()
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

impl AttachmentStore for ObjectStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        self.operator
            .write_with(key, data)
            .content_type(content_type)
            .await
            .map_err(|e| StorageError::backend(e.to_string()))?;

        Ok(StoredObject {
            url: self.public_url(key),
            storage_id: key.to_string(),
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), StorageError> {
        match self.operator.delete(storage_id).await {
            Ok(()) => Ok(()),
            // Already gone; deletion is idempotent.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::backend(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs_settings(root: &str) -> StorageSettings {
        StorageSettings {
            backend: "fs".to_string(),
            bucket: String::new(),
            endpoint: String::new(),
            region: "auto".to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            fs_root: root.to_string(),
            public_base_url: "https://cdn.example.com/".to_string(),
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let mut settings = fs_settings("/tmp/scraptally-test");
        settings.backend = "ftp".to_string();
        assert!(matches!(
            ObjectStore::from_settings(&settings),
            Err(StorageError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_object_key_sanitizes_filename() {
        let owner = OwnerId::new();
        let tx = TransactionId::new();
        let key = ObjectStore::object_key(owner, tx, "bill no 7/2025.pdf");
        assert!(key.starts_with(&format!("attachments/{owner}/{tx}/")));
        assert!(key.ends_with("bill_no_7_2025.pdf"));
        assert!(!key.contains(' '));
    }

    #[tokio::test]
    async fn test_fs_put_and_delete_roundtrip() {
        let root = std::env::temp_dir().join("scraptally-storage-test");
        std::fs::create_dir_all(&root).unwrap();
        let store = ObjectStore::from_settings(&fs_settings(&root.to_string_lossy())).unwrap();

        let object = store
            .put("attachments/test/bill.pdf", "application/pdf", b"%PDF".to_vec())
            .await
            .unwrap();
        assert_eq!(object.storage_id, "attachments/test/bill.pdf");
        assert_eq!(object.url, "https://cdn.example.com/attachments/test/bill.pdf");

        store.delete(&object.storage_id).await.unwrap();
        // deleting again must still succeed
        store.delete(&object.storage_id).await.unwrap();
    }
}
