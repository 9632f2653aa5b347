//! Per-call loader options.

use std::path::PathBuf;

/// Whether `configure` reports the environment files it resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShowEnvironmentFiles {
    #[default]
    Off,
    On,
    /// Report, tagging the log line with this label.
    Labeled(String),
}

impl ShowEnvironmentFiles {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ShowEnvironmentFiles::Off)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ShowEnvironmentFiles::Labeled(label) => Some(label),
            _ => None,
        }
    }
}

impl From<bool> for ShowEnvironmentFiles {
    fn from(enabled: bool) -> Self {
        if enabled {
            ShowEnvironmentFiles::On
        } else {
            ShowEnvironmentFiles::Off
        }
    }
}

impl From<&str> for ShowEnvironmentFiles {
    fn from(label: &str) -> Self {
        ShowEnvironmentFiles::Labeled(label.to_string())
    }
}

impl From<String> for ShowEnvironmentFiles {
    fn from(label: String) -> Self {
        ShowEnvironmentFiles::Labeled(label)
    }
}

/// Options accepted by [`configure`](crate::configure).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Directory environment files are resolved against. Defaults to the working directory.
    pub base_dir: Option<PathBuf>,
    pub show_environment_files: ShowEnvironmentFiles,
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn with_show_environment_files(mut self, show: impl Into<ShowEnvironmentFiles>) -> Self {
        self.show_environment_files = show.into();
        self
    }
}
