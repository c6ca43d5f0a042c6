use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_TEMP_ID: AtomicUsize = AtomicUsize::new(0);

/// Writes a file through a temporary sibling and a rename, so readers never
/// observe a half-written file
pub struct AtomicFile {
    path: PathBuf,
    temp_path: PathBuf,
}

impl AtomicFile {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let temp_path = Self::temp_path(&path)?;

        Ok(Self { path, temp_path })
    }

    fn temp_path(path: &Path) -> io::Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

        // Unique per writer, even for two writers of the same path
        let temp_name = format!(
            ".{}.whitespace-format.{}.{}",
            file_name.to_string_lossy(),
            std::process::id(),
            NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed)
        );

        Ok(path.with_file_name(temp_name))
    }

    /// Replace the file's content, keeping its permissions
    pub fn write(&self, content: &[u8]) -> io::Result<()> {
        let permissions = fs::metadata(&self.path).map(|m| m.permissions()).ok();

        let result = self.write_temp(content).and_then(|()| {
            if let Some(permissions) = permissions {
                fs::set_permissions(&self.temp_path, permissions)?;
            }
            fs::rename(&self.temp_path, &self.path)
        });

        if result.is_err() && self.temp_path.exists() {
            let _ = fs::remove_file(&self.temp_path);
        }
        result
    }

    fn write_temp(&self, content: &[u8]) -> io::Result<()> {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)?;

        temp_file.write_all(content)?;
        temp_file.sync_all()
    }
}
