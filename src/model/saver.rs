//! Model saving functionality
//!
//! Writes category sources, generated TypeScript modules and leaf-format
//! documents through a storage backend.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::export::studio::StudioDocument;
use crate::export::typescript::TypeScriptExporter;
use crate::models::{CategoryTokens, TokenCategory};
use crate::storage::{StorageBackend, StorageError, join_path};

/// Model saver that uses a storage backend
pub struct ModelSaver<'a, B: StorageBackend + ?Sized> {
    storage: &'a B,
}

impl<'a, B: StorageBackend + ?Sized> ModelSaver<'a, B> {
    /// Create a new model saver with the given storage backend
    pub fn new(storage: &'a B) -> Self {
        Self { storage }
    }

    /// Write `<tokens_dir>/<category>.json` and return its path
    pub async fn save_category(
        &self,
        tokens_dir: &str,
        category: TokenCategory,
        tokens: &CategoryTokens,
    ) -> Result<String, StorageError> {
        let path = join_path(tokens_dir, &category.file_name());
        self.storage.write_json(&path, &tokens.to_source_json()).await?;
        info!("Saved {} tokens to {}", tokens.token_count(), path);
        Ok(path)
    }

    /// Write the generated module `<generated_dir>/<category>.ts`
    pub async fn save_module(
        &self,
        generated_dir: &str,
        category: TokenCategory,
        tokens: &CategoryTokens,
        generated_at: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let path = join_path(generated_dir, &format!("{}.ts", category.as_str()));
        let source = TypeScriptExporter::export_category(category, tokens, generated_at);
        self.storage.write_file(&path, source.as_bytes()).await?;
        info!("Generated {}", path);
        Ok(path)
    }

    /// Write leaf-format documents under `studio_dir`
    pub async fn save_studio(
        &self,
        studio_dir: &str,
        documents: &[StudioDocument],
    ) -> Result<Vec<String>, StorageError> {
        let mut written = Vec::with_capacity(documents.len());
        for document in documents {
            let path = join_path(studio_dir, &document.relative_path());
            self.storage.write_json(&path, &document.content).await?;
            written.push(path);
        }
        info!("Saved {} leaf-format documents to {}", written.len(), studio_dir);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Token, TokenType, TokenValue};
    use crate::storage::memory::MemoryStorageBackend;

    #[tokio::test]
    async fn test_save_category_and_module() {
        let storage = MemoryStorageBackend::new();
        let saver = ModelSaver::new(&storage);

        let mut tokens = CategoryTokens::default();
        tokens.primitive.insert(
            &"duration.fast".into(),
            Token::new(TokenValue::text("150ms"), TokenType::Duration),
        );

        let source = saver
            .save_category("tokens", TokenCategory::Motion, &tokens)
            .await
            .unwrap();
        let module = saver
            .save_module("generated", TokenCategory::Motion, &tokens, Utc::now())
            .await
            .unwrap();

        assert_eq!(source, "tokens/motion.json");
        assert_eq!(module, "generated/motion.ts");
        assert_eq!(storage.write_count(), 2);
        let json = storage.contents("tokens/motion.json").unwrap();
        assert!(json.contains("\"fast\": \"150ms\""));
        assert!(json.ends_with('\n'));
        assert!(storage.contents("generated/motion.ts").unwrap().contains("primitiveMotion"));
    }
}
