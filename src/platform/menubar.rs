//! Renders the bound menu tree into the host window manager's native menu
//! bar.
//!
//! Uses `muda`: activations arrive on `muda::MenuEvent::receiver()` and are
//! resolved back to the originating tree leaf here. Per platform the bar is
//! installed on the NSApp (macOS), the window's HWND (Windows) or the GTK
//! window tao wraps (Linux).

use std::collections::HashMap;

use thiserror::Error;

use crate::app::commands::Dispatch;
use crate::app::menu::MenuItem;
use crate::app::window::WindowHandle;

/// Errors raised while building or installing the native menu bar.
#[derive(Debug, Error)]
pub enum MenuBarError {
    #[error("failed to build native menu: {0}")]
    Build(#[from] muda::Error),
}

/// The installed native menu bar plus the mapping from native item ids
/// back to the menu tree's leaves.
pub struct NativeMenuBar {
    // Keep the muda menu alive; dropping it removes the bar from the window.
    _menu: muda::Menu,
    leaves: HashMap<muda::MenuId, MenuItem>,
}

impl NativeMenuBar {
    /// Builds the native menu from the bound tree and attaches it to the
    /// window. Leaves are cloned into the id lookup table; the handler
    /// `Arc`s are shared, not duplicated.
    pub fn attach(
        items: &[MenuItem],
        window: &tao::window::Window,
    ) -> Result<Self, MenuBarError> {
        let menu = muda::Menu::new();
        let mut leaves = HashMap::new();

        for item in items {
            match &item.submenu {
                Some(children) => {
                    let submenu = muda::Submenu::new(&item.label, true);
                    Self::append_children(&submenu, children, &mut leaves)?;
                    menu.append(&submenu)?;
                }
                None => {
                    let native = Self::native_item(item);
                    leaves.insert(native.id().clone(), item.clone());
                    menu.append(&native)?;
                }
            }
        }

        #[cfg(target_os = "macos")]
        {
            let _ = window;
            menu.init_for_nsapp();
        }

        #[cfg(target_os = "windows")]
        {
            use tao::platform::windows::WindowExtWindows;
            unsafe {
                menu.init_for_hwnd(window.hwnd() as isize)?;
            }
        }

        #[cfg(target_os = "linux")]
        {
            use gtk::prelude::*;
            use tao::platform::unix::WindowExtUnix;
            let gtk_window = window.gtk_window();
            menu.init_for_gtk_window(gtk_window.upcast_ref::<gtk::Window>(), None::<&gtk::Box>)?;
        }

        Ok(Self {
            _menu: menu,
            leaves,
        })
    }

    fn append_children(
        submenu: &muda::Submenu,
        items: &[MenuItem],
        leaves: &mut HashMap<muda::MenuId, MenuItem>,
    ) -> Result<(), MenuBarError> {
        for item in items {
            match &item.submenu {
                Some(children) => {
                    let nested = muda::Submenu::new(&item.label, true);
                    Self::append_children(&nested, children, leaves)?;
                    submenu.append(&nested)?;
                }
                None => {
                    let native = Self::native_item(item);
                    leaves.insert(native.id().clone(), item.clone());
                    submenu.append(&native)?;
                }
            }
        }
        Ok(())
    }

    fn native_item(item: &MenuItem) -> muda::MenuItem {
        let accelerator = item.accelerator.as_ref().and_then(|a| a.parse().ok());
        muda::MenuItem::new(&item.label, true, accelerator)
    }

    /// Resolves a native menu event to its leaf and invokes the bound
    /// activation handler with the currently focused window.
    ///
    /// Events for unknown ids or unbound leaves are diagnosed and ignored,
    /// so this never takes the event loop down.
    pub fn activate(
        &self,
        event: &muda::MenuEvent,
        window: Option<&dyn WindowHandle>,
    ) -> Dispatch {
        match self.leaves.get(&event.id) {
            Some(item) => match &item.handler {
                Some(handler) => handler(item, window),
                None => {
                    tracing::warn!("menu item '{}' activated without a handler", item.label);
                    Dispatch::Continue
                }
            },
            None => {
                tracing::warn!("menu event for unknown item id {:?}", event.id);
                Dispatch::Continue
            }
        }
    }
}
