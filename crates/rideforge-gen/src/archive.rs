//! Cloud archive clients
//!
//! Archiving is best-effort: an absent or failing archive never fails a
//! generation attempt, it only downgrades the record to local-only storage.
//! Folder hierarchies are looked up or created on demand, so repeated
//! uploads into the same folder path are idempotent on the folder side.

use crate::config::ForgeConfig;
use crate::providers::openai::build_agent;
use rideforge_core::{ForgeError, Result};
use std::path::PathBuf;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// A stored object in the archive
#[derive(Debug, Clone)]
pub struct ArchiveObject {
    pub id: String,
    pub link: Option<String>,
}

/// Trait implemented by each archive backend (Drive, local directory)
pub trait ArchiveProvider: Send {
    /// Provider name (e.g. "drive", "dir")
    fn name(&self) -> &str;

    /// Store bytes as `file_name` under the nested `folders` path,
    /// creating missing folders along the way.
    fn upload(&self, bytes: &[u8], file_name: &str, folders: &[String]) -> Result<ArchiveObject>;
}

/// Create an archive backend by name with configuration
pub fn create_archive(name: &str, config: &ForgeConfig) -> Result<Box<dyn ArchiveProvider>> {
    match name {
        "drive" => Ok(Box::new(DriveArchive::from_config(config)?)),
        "dir" => Ok(Box::new(DirArchive::from_config(config))),
        _ => Err(ForgeError::ArchiveError(format!(
            "Unknown archive '{}'. Available: drive, dir",
            name
        ))),
    }
}

/// Google Drive archive via the v3 REST API
#[derive(Debug)]
pub struct DriveArchive {
    token: String,
    files_url: String,
    upload_url: String,
}

impl DriveArchive {
    /// Create a new DriveArchive from config; the api_key holds an OAuth
    /// bearer token
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let token = config
            .api_key("drive")
            .ok_or_else(|| {
                ForgeError::ArchiveError(
                    "Drive token not configured. Set RIDEFORGE_DRIVE_API_KEY or add to .rideforge/config.toml".to_string(),
                )
            })?
            .to_string();

        let files_url = config
            .api_url("drive")
            .unwrap_or(DRIVE_FILES_URL)
            .to_string();

        Ok(Self {
            token,
            files_url,
            upload_url: DRIVE_UPLOAD_URL.to_string(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Find an existing folder by name under an optional parent
    fn find_folder(&self, name: &str, parent: Option<&str>) -> Result<Option<String>> {
        let mut query = format!("name='{}' and mimeType='{}'", name.replace('\'', "\\'"), FOLDER_MIME);
        if let Some(parent_id) = parent {
            query.push_str(&format!(" and '{}' in parents", parent_id));
        }

        let agent = build_agent();
        let mut response = agent
            .get(&self.files_url)
            .query("q", &query)
            .query("fields", "files(id, name)")
            .header("Authorization", &self.bearer())
            .call()
            .map_err(|e| ForgeError::ArchiveError(format!("folder lookup failed: {}", e)))?;

        let body: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            ForgeError::ArchiveError(format!("failed to parse folder lookup response: {}", e))
        })?;

        Ok(body
            .get("files")
            .and_then(|files| files.as_array())
            .and_then(|arr| arr.first())
            .and_then(|folder| folder.get("id"))
            .and_then(|id| id.as_str())
            .map(|s| s.to_string()))
    }

    /// Create a folder under an optional parent and return its id
    fn create_folder(&self, name: &str, parent: Option<&str>) -> Result<String> {
        let mut metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME,
        });
        if let Some(parent_id) = parent {
            metadata["parents"] = serde_json::json!([parent_id]);
        }

        let agent = build_agent();
        let mut response = agent
            .post(&format!("{}?fields=id", self.files_url))
            .header("Authorization", &self.bearer())
            .header("Content-Type", "application/json")
            .send_json(&metadata)
            .map_err(|e| ForgeError::ArchiveError(format!("folder create failed: {}", e)))?;

        let body: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            ForgeError::ArchiveError(format!("failed to parse folder create response: {}", e))
        })?;

        body.get("id")
            .and_then(|id| id.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ForgeError::ArchiveError("no folder id in response".to_string()))
    }

    /// Lookup-or-create one folder level
    fn ensure_folder(&self, name: &str, parent: Option<&str>) -> Result<String> {
        if let Some(existing) = self.find_folder(name, parent)? {
            return Ok(existing);
        }
        self.create_folder(name, parent)
    }

    /// Walk the folder path, creating levels as needed
    fn ensure_folder_path(&self, folders: &[String]) -> Result<Option<String>> {
        let mut parent: Option<String> = None;
        for name in folders {
            let id = self.ensure_folder(name, parent.as_deref())?;
            parent = Some(id);
        }
        Ok(parent)
    }
}

impl ArchiveProvider for DriveArchive {
    fn name(&self) -> &str {
        "drive"
    }

    fn upload(&self, bytes: &[u8], file_name: &str, folders: &[String]) -> Result<ArchiveObject> {
        let folder_id = self.ensure_folder_path(folders)?;

        let mut metadata = serde_json::json!({ "name": file_name });
        if let Some(parent) = &folder_id {
            metadata["parents"] = serde_json::json!([parent]);
        }

        // multipart/related body: JSON metadata part, then the media part
        let boundary = format!("rideforge-{}", uuid::Uuid::new_v4());
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{}\r\n",
                boundary, metadata
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{}\r\nContent-Type: image/png\r\n\r\n", boundary).as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--", boundary).as_bytes());

        let agent = build_agent();
        let mut response = agent
            .post(&format!(
                "{}?uploadType=multipart&fields=id,webViewLink",
                self.upload_url
            ))
            .header("Authorization", &self.bearer())
            .header(
                "Content-Type",
                &format!("multipart/related; boundary={}", boundary),
            )
            .send(&body[..])
            .map_err(|e| ForgeError::ArchiveError(format!("upload failed: {}", e)))?;

        let parsed: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            ForgeError::ArchiveError(format!("failed to parse upload response: {}", e))
        })?;

        let id = parsed
            .get("id")
            .and_then(|id| id.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ForgeError::ArchiveError("no file id in upload response".to_string()))?;
        let link = parsed
            .get("webViewLink")
            .and_then(|l| l.as_str())
            .map(|s| s.to_string());

        Ok(ArchiveObject { id, link })
    }
}

/// Local directory archive: mirrors the folder hierarchy on disk.
///
/// Doubles as the test backend and as a credential-free archive target.
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root comes from the drive-less `archive` settings; defaults to
    /// `.rideforge/archive`
    pub fn from_config(config: &ForgeConfig) -> Self {
        let root = config
            .api_url("dir")
            .unwrap_or(".rideforge/archive")
            .to_string();
        Self::new(root)
    }
}

impl ArchiveProvider for DirArchive {
    fn name(&self) -> &str {
        "dir"
    }

    fn upload(&self, bytes: &[u8], file_name: &str, folders: &[String]) -> Result<ArchiveObject> {
        let mut dir = self.root.clone();
        for folder in folders {
            dir = dir.join(folder);
        }
        std::fs::create_dir_all(&dir)?;

        let target = dir.join(file_name);
        std::fs::write(&target, bytes)?;

        let mut id = folders.join("/");
        if !id.is_empty() {
            id.push('/');
        }
        id.push_str(file_name);

        Ok(ArchiveObject {
            id,
            link: Some(format!("file://{}", target.display())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("rideforge_archive_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_dir_archive_creates_folder_hierarchy() {
        let root = temp_dir();
        let archive = DirArchive::new(&root);

        let folders = vec!["Rideforge_Collection".to_string(), "Honoraries".to_string()];
        let object = archive
            .upload(b"png-bytes", "honorary_x_v01.png", &folders)
            .unwrap();

        assert_eq!(object.id, "Rideforge_Collection/Honoraries/honorary_x_v01.png");
        let stored = root
            .join("Rideforge_Collection")
            .join("Honoraries")
            .join("honorary_x_v01.png");
        assert_eq!(std::fs::read(&stored).unwrap(), b"png-bytes");

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_dir_archive_upload_is_idempotent_on_folders() {
        let root = temp_dir();
        let archive = DirArchive::new(&root);
        let folders = vec!["Rideforge_Collection".to_string()];

        archive.upload(b"one", "a.png", &folders).unwrap();
        archive.upload(b"two", "b.png", &folders).unwrap();

        assert!(root.join("Rideforge_Collection").join("a.png").exists());
        assert!(root.join("Rideforge_Collection").join("b.png").exists());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_unknown_archive_name() {
        let config = ForgeConfig::empty();
        assert!(create_archive("ftp", &config).is_err());
    }

    #[test]
    fn test_drive_requires_token() {
        let config = ForgeConfig::empty();
        let err = DriveArchive::from_config(&config).unwrap_err();
        assert!(matches!(err, ForgeError::ArchiveError(_)));
    }
}
