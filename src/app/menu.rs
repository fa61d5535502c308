//! The application menu: a declarative item tree and the binding pass that
//! equips every leaf with an activation handler.
//!
//! The tree is built once at startup, bound once, and then handed to the
//! native renderer in `crate::platform::menubar`. Nothing mutates it after
//! that.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::commands::{CommandRole, Dispatch};
use super::window::WindowHandle;

/// Callback invoked when the user activates a leaf menu item.
///
/// Receives the activated item and the currently focused window, if any,
/// and reports whether the caller should keep processing the activation.
pub type ActivationHandler =
    Arc<dyn Fn(&MenuItem, Option<&dyn WindowHandle>) -> Dispatch + Send + Sync>;

/// A node in the ordered menu tree.
///
/// An item carrying a `submenu` is a grouping entry; everything else is a
/// leaf the user can activate. The `payload` is opaque here and only
/// interpreted by the command router.
#[derive(Clone)]
pub struct MenuItem {
    /// Display text; may embed a `&` mnemonic marker.
    pub label: String,
    /// The command this item issues when activated. Grouping entries
    /// carry no role.
    pub role: Option<CommandRole>,
    /// Optional role-specific data, passed through to the router verbatim.
    pub payload: Option<Value>,
    /// Platform shortcut description, e.g. `Ctrl+O`. Advisory; the
    /// renderer parses it on a best-effort basis.
    pub accelerator: Option<String>,
    /// Child items. Presence of this field makes the node a grouping entry.
    pub submenu: Option<Vec<MenuItem>>,
    /// Activation callback. Usually attached by [`bind_default_handler`];
    /// a handler set beforehand is left untouched.
    pub handler: Option<ActivationHandler>,
}

impl MenuItem {
    /// A leaf entry bound to `role`.
    pub fn leaf(label: impl Into<String>, role: CommandRole) -> Self {
        Self {
            label: label.into(),
            role: Some(role),
            payload: None,
            accelerator: None,
            submenu: None,
            handler: None,
        }
    }

    /// A grouping entry holding `submenu`.
    pub fn group(label: impl Into<String>, submenu: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            role: None,
            payload: None,
            accelerator: None,
            submenu: Some(submenu),
            handler: None,
        }
    }

    /// Attaches a keyboard shortcut description.
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }

    /// Attaches role-specific payload data.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// `true` for items the user can activate directly.
    pub fn is_leaf(&self) -> bool {
        self.submenu.is_none()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("role", &self.role)
            .field("payload", &self.payload)
            .field("accelerator", &self.accelerator)
            .field("submenu", &self.submenu)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Builds the application menu bar: File, View and Help groups over the
/// fixed command set.
///
/// `translate` is applied to every label so a localisation layer can be
/// slotted in by the caller; pass the identity closure for untranslated
/// labels. Pure data assembly, cannot fail.
pub fn menubar(translate: &dyn Fn(&str) -> String) -> Vec<MenuItem> {
    let file_menu = vec![
        MenuItem::leaf(translate("&Open..."), CommandRole::OpenFile).with_accelerator("Ctrl+O"),
        MenuItem::leaf(translate("&Quit"), CommandRole::QuitApp).with_accelerator("Shift+Ctrl+Q"),
    ];
    let view_menu = vec![MenuItem::leaf(
        translate("Toggle &Fullscreen"),
        CommandRole::ToggleFullscreen,
    )
    .with_accelerator("F11")];
    let help_menu = vec![MenuItem::leaf(
        translate("&About..."),
        CommandRole::AboutDialog,
    )];

    vec![
        MenuItem::group(translate("&File"), file_menu),
        MenuItem::group(translate("&View"), view_menu),
        MenuItem::group(translate("&Help"), help_menu),
    ]
}

/// Attaches `handler` to every leaf in `items` that does not already carry
/// one.
///
/// Grouping entries are recursed into and never receive a handler
/// themselves, even if they happen to carry a role. Leaves with a handler
/// already set are left untouched, so running the pass twice is a no-op.
/// The traversal is order-preserving and mutates the tree in place.
pub fn bind_default_handler(items: &mut [MenuItem], handler: &ActivationHandler) {
    for item in items {
        if let Some(children) = item.submenu.as_mut() {
            bind_default_handler(children, handler);
        } else if item.handler.is_none() {
            item.handler = Some(Arc::clone(handler));
        }
    }
}
