use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::pipeline::schema::Recap;

use super::{SessionStore, StoreError};

/// One pretty-printed JSON file per session under a configured directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(session_id)))
    }
}

/// Session ids come from callers or the oracle and may contain path
/// separators or other hostile characters. Only a conservative character
/// set reaches the filesystem.
fn sanitize_key(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl SessionStore for FileStore {
    fn put(&self, session_id: &str, recap: &Recap) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string_pretty(recap)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(self.path_for(session_id), body)?;
        tracing::debug!(session_id = %session_id, "recap persisted");
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<Recap, StoreError> {
        let body = fs::read_to_string(self.path_for(session_id)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(session_id.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        serde_json::from_str(&body).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recap(summary: &str) -> Recap {
        Recap {
            session_id: "s1".into(),
            summary: summary.into(),
            ..Recap::default()
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        let r = recap("persisted");
        store.put("s1", &r).unwrap();
        assert_eq!(store.get("s1").unwrap(), r);
    }

    #[test]
    fn put_overwrites_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.put("s1", &recap("first")).unwrap();
        store.put("s1", &recap("second")).unwrap();
        assert_eq!(store.get("s1").unwrap().summary, "second");
    }

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.get("absent"),
            Err(StoreError::NotFound(id)) if id == "absent"
        ));
    }

    #[test]
    fn hostile_session_ids_stay_inside_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.put("../../etc/passwd", &recap("contained")).unwrap();
        assert_eq!(store.get("../../etc/passwd").unwrap().summary, "contained");
        // Everything written landed under the store directory.
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
