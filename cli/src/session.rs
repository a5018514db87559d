//! JSON-file session store so a token survives between CLI invocations.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use storefront::SessionStore;

/// [`SessionStore`] persisted as a flat JSON object on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        read_items(&self.path).remove(key)
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let Ok(_guard) = self.lock.lock() else {
            return;
        };
        let mut items = read_items(&self.path);
        apply(&mut items);
        let result = serde_json::to_string_pretty(&items)
            .map_err(std::io::Error::other)
            .and_then(|body| std::fs::write(&self.path, body));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "session file write failed");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn set_item(&self, key: &str, value: &str) {
        self.update(|items| {
            items.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove_item(&self, key: &str) {
        self.update(|items| {
            items.remove(key);
        });
    }
}

/// Missing or unreadable files read as empty.
fn read_items(path: &Path) -> BTreeMap<String, String> {
    let Ok(body) = std::fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    serde_json::from_str(&body).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring malformed session file");
        BTreeMap::new()
    })
}
