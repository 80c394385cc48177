//! # Credential Persistence
//!
//! The stored token pair across restarts, and how the HTTP backend's
//! restore and sign-out treat it when the provider cannot be reached.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portal_backend::{
        BackendConfig, CredentialStore, FileCredentialStore, RestBackend, StoredCredential,
    };
    use portal_session::{SessionApi, SessionStatus, SessionStore, UserId};
    use tempfile::TempDir;

    use crate::fixtures::fast_config;

    /// Nothing listens on the discard port.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn credential() -> StoredCredential {
        StoredCredential {
            user_id: UserId::new(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: None,
        }
    }

    fn offline_store(dir: &TempDir) -> (Arc<FileCredentialStore>, SessionStore) {
        let credentials = Arc::new(FileCredentialStore::new(dir.path().join("session.json")));
        let config = BackendConfig {
            base_url: UNREACHABLE.to_string(),
            anon_key: "anon".to_string(),
            request_timeout_ms: 500,
            connect_timeout_ms: 200,
            data_dir: dir.path().to_path_buf(),
        };
        let backend = RestBackend::with_credential_store(config, credentials.clone()).expect("client");
        (credentials, SessionStore::with_config(Arc::new(backend), fast_config()))
    }

    #[test]
    fn test_credential_survives_restart() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");
        let saved = credential();

        FileCredentialStore::new(&path).save(&saved).expect("save");

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.load().expect("load"), Some(saved));
        reopened.clear().expect("clear");
        assert_eq!(FileCredentialStore::new(&path).load().expect("load"), None);
    }

    #[tokio::test]
    async fn test_restore_without_credential_is_anonymous() {
        let dir = TempDir::new().expect("tempdir");
        let (_, store) = offline_store(&dir);

        let session = store.initialize().await;
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
    }

    #[tokio::test]
    async fn test_restore_with_unreachable_provider_fails_closed() {
        let dir = TempDir::new().expect("tempdir");
        let (credentials, store) = offline_store(&dir);
        credentials.save(&credential()).expect("save");

        let session = store.initialize().await;
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
    }

    #[tokio::test]
    async fn test_corrupt_credential_file_restores_anonymous() {
        let dir = TempDir::new().expect("tempdir");
        let (credentials, store) = offline_store(&dir);
        std::fs::write(credentials.path(), "{ not json").expect("write");

        let session = store.initialize().await;
        assert_eq!(session.identity, None);
    }

    #[tokio::test]
    async fn test_sign_out_forgets_credential_when_offline() {
        let dir = TempDir::new().expect("tempdir");
        let (credentials, store) = offline_store(&dir);
        credentials.save(&credential()).expect("save");
        store.initialize().await;

        let session = store.sign_out().await;
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
        assert!(!credentials.path().exists());
    }
}
