//! Received contact messages, appended to a JSON-lines file
//!
//! Only the most recent messages are mirrored in memory for the inbox
//! endpoint; the file keeps the full history.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uplink_core::StoredMessage;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Message store, oldest first
pub struct MessageStore {
    path: Option<PathBuf>,
    retain: usize,
    messages: RwLock<VecDeque<StoredMessage>>,
}

fn push_bounded(messages: &mut VecDeque<StoredMessage>, message: StoredMessage, retain: usize) {
    if retain == 0 {
        return;
    }
    while messages.len() >= retain {
        messages.pop_front();
    }
    messages.push_back(message);
}

impl MessageStore {
    /// Store that never touches disk, keeping the last `retain` messages
    pub fn in_memory(retain: usize) -> Self {
        Self {
            path: None,
            retain,
            messages: RwLock::new(VecDeque::new()),
        }
    }

    /// Open a file-backed store, loading the last `retain` messages already
    /// on disk.
    ///
    /// Lines that fail to parse are skipped with a warning.
    pub fn open(path: &Path, retain: usize) -> Result<Self, StoreError> {
        let mut messages = VecDeque::new();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            for (number, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<StoredMessage>(line) {
                    Ok(message) => push_bounded(&mut messages, message, retain),
                    Err(e) => warn!(path = %path.display(), line = number + 1, error = %e, "Skipping malformed message"),
                }
            }
        }

        info!(path = %path.display(), count = messages.len(), "Opened message store");

        Ok(Self {
            path: Some(path.to_path_buf()),
            retain,
            messages: RwLock::new(messages),
        })
    }

    /// Persist and record a message
    pub async fn append(&self, message: StoredMessage) -> Result<StoredMessage, StoreError> {
        // Held across the file write so disk order matches memory order
        let mut messages = self.messages.write().await;

        if let Some(path) = &self.path {
            let mut line = serde_json::to_string(&message)?;
            line.push('\n');

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
        }

        push_bounded(&mut messages, message.clone(), self.retain);
        Ok(message)
    }

    /// Retained messages, oldest first
    pub async fn list(&self) -> Vec<StoredMessage> {
        self.messages.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uplink_core::ContactMessage;

    fn message(name: &str) -> StoredMessage {
        StoredMessage::new(ContactMessage {
            name: name.to_string(),
            email: format!("{}@grid.net", name.to_lowercase()),
            message: "Requesting uplink".to_string(),
        })
    }

    #[tokio::test]
    async fn test_messages_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inbox").join("messages.jsonl");

        let store = MessageStore::open(&path, 10).unwrap();
        let first = store.append(message("Trinity")).await.unwrap();
        let second = store.append(message("Morpheus")).await.unwrap();
        assert_eq!(store.len().await, 2);

        let reopened = MessageStore::open(&path, 10).unwrap();
        let listed = reopened.list().await;
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.jsonl");
        let good = message("Niobe");
        std::fs::write(
            &path,
            format!("not json\n\n{}\n", serde_json::to_string(&good).unwrap()),
        )
        .unwrap();

        let store = MessageStore::open(&path, 10).unwrap();
        assert_eq!(store.list().await, vec![good]);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = MessageStore::in_memory(10);
        store.append(message("Tank")).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_keeps_only_recent_messages() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.jsonl");

        let store = MessageStore::open(&path, 2).unwrap();
        for name in ["Dozer", "Apoc", "Mouse"] {
            store.append(message(name)).await.unwrap();
        }
        let names: Vec<String> = store.list().await.into_iter().map(|m| m.message.name).collect();
        assert_eq!(names, ["Apoc", "Mouse"]);

        // The file still holds all three
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        let reopened = MessageStore::open(&path, 1).unwrap();
        assert_eq!(reopened.len().await, 1);
        assert_eq!(reopened.list().await[0].message.name, "Mouse");
    }
}
