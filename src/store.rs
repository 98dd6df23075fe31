use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Raw and clean output directories for one run. Two files are written per
/// run: the API response as received and the mapped projection.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    raw_dir: PathBuf,
    clean_dir: PathBuf,
}

impl ResponseStore {
    /// Create `raw/` and `clean/` under the base directory. Idempotent.
    pub fn create(base: &Path) -> Result<Self> {
        let raw_dir = base.join("raw");
        let clean_dir = base.join("clean");
        fs::create_dir_all(&raw_dir)
            .with_context(|| format!("creating {}", raw_dir.display()))?;
        fs::create_dir_all(&clean_dir)
            .with_context(|| format!("creating {}", clean_dir.display()))?;
        Ok(Self { raw_dir, clean_dir })
    }

    /// Local-time stamp embedded in the output filenames, second resolution.
    pub fn stamp() -> String {
        Local::now().format("%Y_%m_%d__%H-%M-%S").to_string()
    }

    pub fn write_raw<T: Serialize>(&self, stamp: &str, payload: &T) -> Result<PathBuf> {
        let path = self.raw_dir.join(format!("{stamp}_orders.json"));
        write_pretty_json(&path, payload)?;
        Ok(path)
    }

    pub fn write_clean<T: Serialize>(&self, stamp: &str, payload: &T) -> Result<PathBuf> {
        let path = self.clean_dir.join(format!("clean_{stamp}_orders.json"));
        write_pretty_json(&path, payload)?;
        Ok(path)
    }
}

/// Pretty-printed UTF-8 JSON; serde_json leaves non-ASCII characters intact.
fn write_pretty_json<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(payload).context("serializing payload to JSON")?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creates_directories_idempotently() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("responses");

        ResponseStore::create(&base).unwrap();
        let store = ResponseStore::create(&base).unwrap();

        assert!(base.join("raw").is_dir());
        assert!(base.join("clean").is_dir());

        let path = store.write_raw("2024_01_02__03-04-05", &json!({"ok": true})).unwrap();
        assert!(path.ends_with("raw/2024_01_02__03-04-05_orders.json"));
    }

    #[test]
    fn writes_pretty_json_preserving_non_ascii() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResponseStore::create(tmp.path()).unwrap();

        let payload = json!([{ "order_source_name": "Zamówienie promocyjne" }]);
        let path = store.write_clean("stamp", &payload).unwrap();
        assert!(path.ends_with("clean/clean_stamp_orders.json"));

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("Zamówienie promocyjne"));
        assert!(!body.contains("\\u"));
        assert!(body.contains('\n'));
    }

    #[test]
    fn stamp_has_second_resolution() {
        let stamp = ResponseStore::stamp();
        // e.g. 2024_01_02__03-04-05
        assert_eq!(stamp.len(), "2024_01_02__03-04-05".len());
        assert!(stamp.contains("__"));
    }
}
