mod auth;
mod credentials;
mod history;

pub use auth::TokenManager;
pub use credentials::CredentialsManager;
pub use history::HistoryExportManager;

use std::path::Path;

use async_fs::{File, OpenOptions};
use futures::AsyncWriteExt;

use crate::{Res, TraktError};

/// Writes `contents` to `path`, creating parent directories first.
///
/// With `private` the file is created with mode 0600 on unix, and an
/// existing file is narrowed to 0600 before anything is written to it.
async fn write_file(path: &Path, contents: String, private: bool) -> Res<()> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| TraktError::io(parent, e))?;
    }

    let mut file = open_for_write(path, private)
        .await
        .map_err(|e| TraktError::io(path, e))?;

    if private {
        restrict_permissions(path).await?;
    }

    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| TraktError::io(path, e))?;
    file.flush().await.map_err(|e| TraktError::io(path, e))
}

#[cfg(unix)]
async fn open_for_write(path: &Path, private: bool) -> std::io::Result<File> {
    use async_fs::unix::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    if private {
        options.mode(0o600);
    }
    options.open(path).await
}

#[cfg(not(unix))]
async fn open_for_write(path: &Path, _private: bool) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Res<()> {
    use std::os::unix::fs::PermissionsExt;
    async_fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(|e| TraktError::io(path, e))
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Res<()> {
    Ok(())
}

/// Reads `path`, mapping a missing file to `None`.
async fn read_file(path: &Path) -> Res<Option<String>> {
    match async_fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TraktError::io(path, e)),
    }
}
