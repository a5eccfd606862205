//! In-memory store for command tests

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use s3c_core::{Error, ListPage, ObjectInfo, ObjectKey, ObjectStore, Result, Settings};

pub(crate) fn settings() -> Settings {
    Settings::from_toml_str(
        r#"
        bucket = "test"
        returnurl = "https://cdn.example.com"
        "#,
    )
    .unwrap()
}

/// Bucket kept in a map; every remote call is counted
#[derive(Default)]
pub(crate) struct FakeStore {
    objects: Mutex<BTreeMap<String, i64>>,
    fail: bool,
    calls: AtomicUsize,
    puts: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn with_keys(keys: &[&str]) -> Self {
        let store = Self::default();
        store
            .objects
            .lock()
            .unwrap()
            .extend(keys.iter().map(|k| (k.to_string(), 1)));
        store
    }

    /// Store whose every call fails
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Remote("service unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn object_exists(&self, key: &ObjectKey) -> Result<bool> {
        self.record()?;
        Ok(self.objects.lock().unwrap().contains_key(key.as_str()))
    }

    async fn put_file(&self, key: &ObjectKey, path: &Path) -> Result<()> {
        self.record()?;
        self.puts.fetch_add(1, Ordering::SeqCst);
        let size = std::fs::metadata(path)?.len() as i64;
        self.objects
            .lock()
            .unwrap()
            .insert(key.as_str().to_string(), size);
        Ok(())
    }

    async fn list_page(&self, _continuation_token: Option<String>) -> Result<ListPage> {
        self.record()?;
        let items = self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|(k, size)| ObjectInfo::new(k.clone(), *size))
            .collect();
        Ok(ListPage {
            items,
            next_token: None,
        })
    }

    async fn delete_object(&self, key: &ObjectKey) -> Result<()> {
        self.record()?;
        self.objects.lock().unwrap().remove(key.as_str());
        Ok(())
    }

    async fn wait_absent(&self, key: &ObjectKey, _timeout: Duration) -> Result<()> {
        self.record()?;
        if self.objects.lock().unwrap().contains_key(key.as_str()) {
            return Err(Error::WaitTimeout(key.to_string()));
        }
        Ok(())
    }
}
