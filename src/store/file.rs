//! One JSON file per key inside a data directory

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::Storage;
use crate::error::StoreError;

pub(crate) struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }
}

impl Storage for FileStorage {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Write to a sibling temp file, then rename over the target.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value).map_err(|e| StoreError::io(&tmp, e))?;
        let target = self.path_for(key);
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(target, e));
        }
        Ok(())
    }
}

/// `<data_dir>/tallybook`, falling back to `~/.tallybook`
pub(crate) fn default_data_dir() -> Option<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Some(dir.join(crate::consts::APP_NAME));
    }
    let home = dirs::home_dir()?;
    Some(home.join(format!(".{}", crate::consts::APP_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("simpleTrackerData").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut storage = FileStorage::new(&nested);
        assert!(!nested.is_dir());

        storage.set_item("k", "first").unwrap();
        storage.set_item("k", "second").unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
        assert_eq!(fs::read_to_string(nested.join("k.json")).unwrap(), "second");
        assert!(!nested.join("k.json.tmp").exists());
    }

    #[test]
    fn keys_are_independent_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set_item("one", "1").unwrap();
        storage.set_item("two", "2").unwrap();
        assert_eq!(storage.get_item("one").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get_item("two").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        fs::create_dir_all(dir.path().join("k.json")).unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.get_item("k").is_err());
    }

    #[test]
    fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut storage = FileStorage::new(blocker.join("data"));
        assert!(storage.set_item("k", "v").is_err());
    }
}
