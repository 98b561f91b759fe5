//! Home directory layout for SDK state on this machine.
//!
//! ```text
//! ~/.cio/                         (CioHome, or $CIO_HOME)
//! ├── config.toml                 (user-level configuration)
//! ├── logs/                       (rolling log files)
//! └── preferences/                (one JSON document per storage domain)
//!     ├── io.customer.sdk.<bundle>.<site>.json
//!     └── io.customer.sdk.<bundle>.shared.json
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory.
pub const CIO_HOME_ENV: &str = "CIO_HOME";

/// Root directory for SDK configuration and stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CioHome {
    root: PathBuf,
}

impl CioHome {
    /// Create from an explicit path (useful for testing).
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure `preferences/` and `logs/` exist.
    ///
    /// Both are owner-only (`0o700`) on Unix: they hold profile ids and
    /// device tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or permission setting fails.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.preferences_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(self.root(), perms.clone())?;
            std::fs::set_permissions(self.preferences_dir(), perms.clone())?;
            std::fs::set_permissions(self.logs_dir(), perms)?;
        }
        Ok(())
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// User-level configuration file (`~/.cio/config.toml`).
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Directory holding one document per storage domain.
    #[must_use]
    pub fn preferences_dir(&self) -> PathBuf {
        self.root.join("preferences")
    }

    /// Log directory (`~/.cio/logs/`).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
