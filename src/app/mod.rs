//! Application glue: the menu tree, its activation handlers and the event
//! plumbing between the native shell and the WebView.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod menu;
pub mod proxy;
pub mod state;
pub mod window;

use std::sync::{Arc, Mutex};

use wry::WebView;

use self::commands::Dispatch;
use self::events::UserEvent;
use self::file_dialog::DialogService;
use self::menu::ActivationHandler;
use self::proxy::EventProxy;
use self::state::AppState;

/// Builds the shared activation handler every leaf menu item receives.
///
/// The handler forwards the item's role and payload to the command router
/// together with the focused window; items without a role are diagnosed
/// and otherwise ignored.
pub fn default_activation_handler<P, D>(
    dialog: Arc<D>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> ActivationHandler
where
    P: EventProxy,
    D: DialogService + ?Sized + 'static,
{
    Arc::new(move |item, window| match &item.role {
        Some(role) => commands::dispatch(
            role,
            item.payload.as_ref(),
            window,
            dialog.clone(),
            proxy.clone(),
            state.clone(),
        ),
        None => {
            tracing::warn!("menu item '{}' has no role to dispatch", item.label);
            Dispatch::Continue
        }
    })
}

/// Applies backend events to the WebView.
///
/// Events that drive the event loop itself (menu activation, quit) are
/// handled in `main` and never reach this function.
pub fn handle_user_event(event: UserEvent, webview: &WebView) {
    match event {
        UserEvent::AboutDialogToggled(visible) => {
            let script = format!("window.setAboutDialogVisible({});", visible);
            if let Err(e) = webview.evaluate_script(&script) {
                tracing::error!("Failed to update about panel: {}", e);
            }
        }
        UserEvent::FileSelection(paths) => {
            // Already reported by the picker continuation; nothing is done
            // with the selection yet.
            tracing::debug!("{} path(s) selected", paths.len());
        }
        UserEvent::MenuActivated(_) | UserEvent::QuitRequested => {}
    }
}
