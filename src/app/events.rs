//! Defines the events delivered to the shell's event loop.

use std::path::PathBuf;

/// Events sent to the tao event loop from menu activations and background
/// tasks.
#[derive(Debug)]
pub enum UserEvent {
    /// A native menu item was activated; forwarded from muda's channel so
    /// it can be resolved on the loop thread.
    MenuActivated(muda::MenuEvent),
    /// The about panel's visibility flag changed to the contained value.
    AboutDialogToggled(bool),
    /// The file picker resolved with the selected paths (empty when the
    /// user dismissed the dialog).
    FileSelection(Vec<PathBuf>),
    /// The application was asked to terminate.
    QuitRequested,
}
