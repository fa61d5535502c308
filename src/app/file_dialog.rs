//! An abstraction layer for native file dialogs to enable testing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which selection kinds an open-dialog request allows.
///
/// Native dialogs offer either a file or a directory picker, not both at
/// once, so `directories` selects the variant and `multiple` widens it to
/// multi-selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PickerOptions {
    /// Pick directories instead of files.
    pub directories: bool,
    /// Allow more than one entry to be selected.
    pub multiple: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            directories: false,
            multiple: true,
        }
    }
}

/// Defines a common interface for file and folder selection dialogs.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Shows an open dialog and resolves with the selected paths.
    /// A dismissed dialog resolves to an empty list.
    async fn pick_paths(&self, options: &PickerOptions) -> Vec<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native
/// OS dialogs.
pub struct NativeDialogService;

#[async_trait]
impl DialogService for NativeDialogService {
    async fn pick_paths(&self, options: &PickerOptions) -> Vec<PathBuf> {
        let dialog = rfd::AsyncFileDialog::new();
        let picked = match (options.directories, options.multiple) {
            (true, true) => dialog.pick_folders().await,
            (true, false) => dialog.pick_folder().await.map(|handle| vec![handle]),
            (false, true) => dialog.pick_files().await,
            (false, false) => dialog.pick_file().await.map(|handle| vec![handle]),
        };
        picked
            .map(|handles| {
                handles
                    .into_iter()
                    .map(|handle| handle.path().to_path_buf())
                    .collect()
            })
            .unwrap_or_default()
    }
}
