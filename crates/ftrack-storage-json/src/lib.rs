use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use ftrack_core::{storage::KeyValueStore, CoreError};
use tracing::{debug, warn};

const ENTRY_EXTENSION: &str = "json";
const BACKUP_DATE_FORMAT: &str = "%Y%m%d";
const BACKUP_TIME_FORMAT: &str = "%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Directory layout used by [`JsonFileStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    /// `data/` and `backups/` under a single application directory.
    pub fn under(root: &Path) -> Self {
        Self {
            data_root: root.join("data"),
            backup_root: root.join("backups"),
        }
    }
}

/// Filesystem key-value store: one JSON file per key, with rolling backups.
///
/// Every save first copies the current file into the key's backup directory and then
/// replaces the file through a temp file and rename. At most `retention` backups are kept
/// per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_root: PathBuf,
    backup_root: PathBuf,
    retention: usize,
}

/// A stored backup of one key's previous blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    /// File name of the backup; pass it back to [`JsonFileStore::restore_backup`].
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl JsonFileStore {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            data_root: paths.data_root,
            backup_root: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.data_root
            .join(format!("{}.{}", canonical_name(key), ENTRY_EXTENSION))
    }

    pub fn backup_path(&self, key: &str, backup_id: &str) -> PathBuf {
        self.backup_dir(key).join(backup_id)
    }

    /// Backups for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(key);
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION)
            {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            entries.push(BackupInfo {
                key: slug.clone(),
                id: file_name.to_string(),
                created_at: parse_backup_timestamp(file_name),
                size_bytes,
                path: path.clone(),
            });
        }
        entries.sort_by(|a, b| {
            Reverse(a.created_at)
                .cmp(&Reverse(b.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// Replaces the current blob for `key` with the contents of a backup.
    ///
    /// The blob being replaced is itself backed up first, so a restore can be undone.
    pub fn restore_backup(&self, key: &str, backup_id: &str) -> Result<String, CoreError> {
        let source = self.backup_path(key, backup_id);
        if !source.is_file() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found for `{}`",
                backup_id, key
            )));
        }
        let blob = fs::read_to_string(&source)?;
        self.write_entry(key, &blob)?;
        debug!(key, backup = backup_id, "backup restored");
        Ok(blob)
    }

    pub fn delete_backup(&self, key: &str, backup_id: &str) -> Result<(), CoreError> {
        let path = self.backup_path(key, backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backup_root.join(canonical_name(key))
    }

    fn write_entry(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        let path = self.entry_path(key);
        if path.exists() {
            self.backup_existing_file(key, &path)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<(), CoreError> {
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir)?;
        let slug = canonical_name(key);
        let mut stamp = Utc::now();
        let mut target = dir.join(backup_file_name(&slug, stamp));
        while target.exists() {
            stamp += Duration::milliseconds(1);
            target = dir.join(backup_file_name(&slug, stamp));
        }
        fs::copy(path, &target)?;
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        for entry in self.list_backups(key)?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                warn!(key, backup = %entry.id, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        self.write_entry(key, blob)
    }
}

fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}

fn backup_file_name(slug: &str, stamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{}",
        slug,
        stamp.format(BACKUP_DATE_FORMAT),
        stamp.format(BACKUP_TIME_FORMAT),
        ENTRY_EXTENSION
    )
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", ENTRY_EXTENSION))?;
    let mut segments = trimmed.rsplitn(3, '_');
    let time = segments.next()?;
    let date = segments.next()?;
    segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 9) {
        return None;
    }
    let (clock, millis) = time.split_at(6);
    let millis: i64 = millis.parse().ok()?;
    let raw = format!("{}{}", date, clock);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| {
            DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::milliseconds(millis)
        })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn canonical_names_keep_dashes() {
        assert_eq!(
            canonical_name("finance-tracker-transactions"),
            "finance-tracker-transactions"
        );
        assert_eq!(canonical_name("My Key!"), "my_key_");
        assert_eq!(canonical_name("  "), "entry");
    }

    #[test]
    fn backup_names_parse_back_to_their_timestamp() {
        let stamp = Utc.with_ymd_and_hms(2024, 7, 9, 13, 45, 2).unwrap()
            + Duration::milliseconds(37);
        let name = backup_file_name("finance-tracker-transactions", stamp);
        assert_eq!(name, "finance-tracker-transactions_20240709_134502037.json");
        assert_eq!(parse_backup_timestamp(&name), Some(stamp));
        assert_eq!(parse_backup_timestamp("notes.json"), None);
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/finance-tracker-dark-mode.json"));
        assert_eq!(tmp, PathBuf::from("/data/finance-tracker-dark-mode.json.tmp"));
    }
}
