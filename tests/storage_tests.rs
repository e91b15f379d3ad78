//! Storage backend tests

#[cfg(feature = "native-fs")]
mod filesystem_tests {
    use std::path::Path;

    use tempfile::TempDir;
    use token_sync::models::TokenCategory;
    use token_sync::storage::{
        StorageBackend, StorageError, filesystem::FileSystemStorageBackend,
    };
    use token_sync::sync::{SyncConfig, SyncPhase, SyncSession};
    use token_sync::{ModelLoader, resolve_store};
    use tokio::runtime::Runtime;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    /// Copy the bundled token sources into a scratch project
    fn project_with_bundled_tokens() -> TempDir {
        let temp = TempDir::new().unwrap();
        let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tokens");
        let target = temp.path().join("tokens");
        std::fs::create_dir_all(&target).unwrap();
        for category in TokenCategory::ALL {
            let name = category.file_name();
            std::fs::copy(source.join(&name), target.join(&name)).unwrap();
        }
        temp
    }

    #[test]
    fn test_read_write_roundtrip() {
        let rt = runtime();
        rt.block_on(async {
            let temp = TempDir::new().unwrap();
            let backend = FileSystemStorageBackend::new(temp.path());

            let content = br##"{"primitive": {"white": "#FFFFFF"}}"##;
            backend.write_file("tokens/colors.json", content).await.unwrap();

            let read_content = backend.read_file("tokens/colors.json").await.unwrap();
            assert_eq!(read_content, content);
            assert!(backend.file_exists("tokens/colors.json").await.unwrap());
            assert!(!backend.file_exists("tokens").await.unwrap());
        });
    }

    #[test]
    fn test_file_not_found() {
        let rt = runtime();
        rt.block_on(async {
            let temp = TempDir::new().unwrap();
            let backend = FileSystemStorageBackend::new(temp.path());

            let result = backend.read_file("tokens/motion.json").await;
            assert!(matches!(result, Err(StorageError::FileNotFound(_))));
            assert!(!backend.file_exists("tokens/motion.json").await.unwrap());
        });
    }

    #[test]
    fn test_path_traversal_blocked() {
        let rt = runtime();
        rt.block_on(async {
            let temp = TempDir::new().unwrap();
            let backend = FileSystemStorageBackend::new(temp.path());

            let result = backend.read_file("../.env").await;
            assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

            let result = backend.write_file("tokens/../../colors.json", b"{}").await;
            assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

            let result = backend.read_file("/tokens/../../../etc/passwd").await;
            assert!(matches!(result, Err(StorageError::PermissionDenied(_))));
        });
    }

    #[test]
    fn test_json_helpers() {
        let rt = runtime();
        rt.block_on(async {
            let temp = TempDir::new().unwrap();
            let backend = FileSystemStorageBackend::new(temp.path());

            let value = serde_json::json!({"primitive": {"4": "16px"}});
            backend.write_json("tokens/spacing.json", &value).await.unwrap();

            let text = backend.read_text("tokens/spacing.json").await.unwrap();
            assert!(text.ends_with("}\n"));
            assert_eq!(backend.read_json("tokens/spacing.json").await.unwrap(), value);

            backend.write_file("tokens/broken.json", b"{ nope").await.unwrap();
            let result = backend.read_json("tokens/broken.json").await;
            assert!(matches!(result, Err(StorageError::SerializationError(_))));
        });
    }

    #[test]
    fn test_missing_sources_are_reported_not_fatal() {
        let rt = runtime();
        rt.block_on(async {
            let temp = TempDir::new().unwrap();
            let backend = FileSystemStorageBackend::new(temp.path());
            backend
                .write_file("tokens/spacing.json", br#"{"primitive": {"4": "16px"}}"#)
                .await
                .unwrap();

            let loaded = ModelLoader::new(&backend)
                .load_store("tokens", &TokenCategory::ALL)
                .await
                .unwrap();
            assert_eq!(loaded.store.token_count(), 1);
            assert_eq!(loaded.missing_files.len(), 4);
            assert!(loaded.missing_files.contains(&"tokens/colors.json".to_string()));

            let studio = ModelLoader::new(&backend)
                .load_studio("tokens/tokens-studio", &[TokenCategory::Spacing])
                .await
                .unwrap();
            assert!(studio.documents.is_empty());
            assert_eq!(studio.missing_files.len(), 3);
        });
    }

    #[test]
    fn test_bundled_tokens_resolve_cleanly() {
        let rt = runtime();
        rt.block_on(async {
            let temp = project_with_bundled_tokens();
            let backend = FileSystemStorageBackend::new(temp.path());

            let loaded = ModelLoader::new(&backend)
                .load_store("tokens", &TokenCategory::ALL)
                .await
                .unwrap();
            assert!(loaded.missing_files.is_empty());
            assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);

            let colors = loaded.store.get(TokenCategory::Colors).unwrap();
            let primary = colors.primitive.get(&"primary.900".into()).unwrap();
            assert_eq!(primary.value.to_string(), "#0A1F44");

            let resolution = resolve_store(&loaded.store);
            assert!(resolution.is_clean(), "{:?}", resolution.warnings);
        });
    }

    #[test]
    fn test_studio_push_and_pull_on_disk() {
        let rt = runtime();
        rt.block_on(async {
            let temp = project_with_bundled_tokens();
            let backend = FileSystemStorageBackend::new(temp.path());
            let config = SyncConfig::default();
            let session = SyncSession::new(&config, &backend);

            let push = session.studio_push().await.unwrap();
            assert_eq!(push.run.phase(), SyncPhase::Succeeded);
            assert!(temp.path().join("tokens/tokens-studio/core/colors.json").is_file());
            assert!(temp.path().join("tokens/tokens-studio/component/motion.json").is_file());

            let diff = session.diff_studio().await.unwrap();
            assert!(diff.diff.is_empty(), "unexpected diff: {:?}", diff.diff);

            let pull = session.studio_pull(false).await.unwrap();
            assert_eq!(pull.counts.len(), 5);
            let module = std::fs::read_to_string(temp.path().join("generated/colors.ts")).unwrap();
            assert!(module.contains("export const semanticColors = {"));
            assert!(module.contains("primary: '#0A1F44',"));
        });
    }
}
