//! The command router: the single point where a symbolic menu role becomes
//! a concrete side effect against the host environment.
//!
//! Every activation funnels through [`dispatch`], which is total over its
//! inputs: unknown roles are diagnosed and ignored, never propagated.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::events::UserEvent;
use super::file_dialog::{DialogService, PickerOptions};
use super::proxy::EventProxy;
use super::state::AppState;
use super::window::WindowHandle;

/// The closed set of commands the menu can issue.
///
/// Role strings that arrive from data this crate does not control fall into
/// `Other` and are diagnosed at dispatch time instead of being dropped
/// silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRole {
    AboutDialog,
    ToggleFullscreen,
    QuitApp,
    OpenFile,
    Other(String),
}

impl CommandRole {
    /// Parses the wire form of a role. Unknown strings map to `Other`.
    pub fn parse(role: &str) -> Self {
        match role {
            "about-dialog" => Self::AboutDialog,
            "toggle-fulscreen" => Self::ToggleFullscreen,
            "quit-app" => Self::QuitApp,
            "open-file" => Self::OpenFile,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire form of this role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AboutDialog => "about-dialog",
            Self::ToggleFullscreen => "toggle-fulscreen",
            Self::QuitApp => "quit-app",
            Self::OpenFile => "open-file",
            Self::Other(role) => role,
        }
    }
}

/// Outcome of a dispatch.
///
/// `Quit` tells the caller to stop any further handling of the current
/// activation; the actual shutdown request travels separately as
/// [`UserEvent::QuitRequested`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit,
}

/// Executes the side effect for `role`.
///
/// `window` is the currently focused window, if any; window-scoped roles
/// are a no-op without one. The `open-file` picker runs as a background
/// task and resolves through `proxy` after this function has returned;
/// a dismissed picker resolves to an empty selection.
pub fn dispatch<P, D>(
    role: &CommandRole,
    payload: Option<&Value>,
    window: Option<&dyn WindowHandle>,
    dialog: Arc<D>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) -> Dispatch
where
    P: EventProxy,
    D: DialogService + ?Sized + 'static,
{
    match role {
        CommandRole::AboutDialog => {
            let visible = {
                let mut state_guard = state
                    .lock()
                    .expect("Mutex was poisoned. This should not happen.");
                state_guard.toggle_about_dialog()
            };
            proxy.send_event(UserEvent::AboutDialogToggled(visible));
            Dispatch::Continue
        }
        CommandRole::ToggleFullscreen => {
            match window {
                Some(window) => window.set_fullscreen(!window.is_fullscreen()),
                None => tracing::debug!("toggle-fulscreen ignored: no focused window"),
            }
            Dispatch::Continue
        }
        CommandRole::QuitApp => {
            proxy.send_event(UserEvent::QuitRequested);
            Dispatch::Quit
        }
        CommandRole::OpenFile => {
            let options = picker_options(payload);
            tokio::spawn(async move {
                let paths = dialog.pick_paths(&options).await;
                tracing::info!("open-file: {:?}", paths);
                proxy.send_event(UserEvent::FileSelection(paths));
            });
            Dispatch::Continue
        }
        CommandRole::Other(role) => {
            tracing::warn!("unhandled menu command: {}", role);
            Dispatch::Continue
        }
    }
}

/// Interprets an opaque payload as picker options, falling back to the
/// default multi-file picker on absent or malformed payloads.
fn picker_options(payload: Option<&Value>) -> PickerOptions {
    payload
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::mpsc;
    use tracing_test::traced_test;

    // A mock EventProxy for capturing events sent to the event loop.
    #[derive(Clone)]
    struct TestEventProxy {
        sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            self.sender.send(event).expect("Test receiver dropped");
        }
    }

    // A mock DialogService that resolves immediately with preset paths.
    struct MockDialogService {
        paths: Vec<PathBuf>,
    }

    #[async_trait::async_trait]
    impl DialogService for MockDialogService {
        async fn pick_paths(&self, _options: &PickerOptions) -> Vec<PathBuf> {
            self.paths.clone()
        }
    }

    // A stand-in for the focused window.
    #[derive(Default)]
    struct TestWindow {
        fullscreen: AtomicBool,
    }

    impl WindowHandle for TestWindow {
        fn is_fullscreen(&self) -> bool {
            self.fullscreen.load(Ordering::SeqCst)
        }

        fn set_fullscreen(&self, fullscreen: bool) {
            self.fullscreen.store(fullscreen, Ordering::SeqCst);
        }
    }

    struct TestHarness {
        state: Arc<Mutex<AppState>>,
        proxy: TestEventProxy,
        event_rx: mpsc::UnboundedReceiver<UserEvent>,
        dialog: Arc<MockDialogService>,
    }

    impl TestHarness {
        fn new() -> Self {
            let (tx, rx) = mpsc::unbounded_channel();
            Self {
                state: Arc::new(Mutex::new(AppState::with_default_config())),
                proxy: TestEventProxy { sender: tx },
                event_rx: rx,
                dialog: Arc::new(MockDialogService { paths: Vec::new() }),
            }
        }

        fn dispatch(&self, role: &CommandRole, window: Option<&dyn WindowHandle>) -> Dispatch {
            dispatch(
                role,
                None,
                window,
                self.dialog.clone(),
                self.proxy.clone(),
                self.state.clone(),
            )
        }
    }

    #[test]
    fn role_strings_round_trip() {
        for role in ["about-dialog", "toggle-fulscreen", "quit-app", "open-file"] {
            let parsed = CommandRole::parse(role);
            assert!(!matches!(parsed, CommandRole::Other(_)));
            assert_eq!(parsed.as_str(), role);
        }
        assert_eq!(
            CommandRole::parse("bogus-role"),
            CommandRole::Other("bogus-role".to_string())
        );
    }

    #[tokio::test]
    async fn about_dialog_toggles_back_to_initial_state() {
        let mut harness = TestHarness::new();
        let initial = harness
            .state
            .lock()
            .unwrap()
            .about_dialog_visible();

        assert_eq!(
            harness.dispatch(&CommandRole::AboutDialog, None),
            Dispatch::Continue
        );
        assert_eq!(
            harness.dispatch(&CommandRole::AboutDialog, None),
            Dispatch::Continue
        );

        assert_eq!(
            harness.state.lock().unwrap().about_dialog_visible(),
            initial
        );
        assert!(matches!(
            harness.event_rx.try_recv(),
            Ok(UserEvent::AboutDialogToggled(true))
        ));
        assert!(matches!(
            harness.event_rx.try_recv(),
            Ok(UserEvent::AboutDialogToggled(false))
        ));
    }

    #[tokio::test]
    async fn toggle_fullscreen_inverts_the_window_flag() {
        let harness = TestHarness::new();
        let window = TestWindow::default();

        harness.dispatch(&CommandRole::ToggleFullscreen, Some(&window));
        assert!(window.is_fullscreen());

        harness.dispatch(&CommandRole::ToggleFullscreen, Some(&window));
        assert!(!window.is_fullscreen());
    }

    #[tokio::test]
    async fn toggle_fullscreen_without_focused_window_is_a_noop() {
        let mut harness = TestHarness::new();
        assert_eq!(
            harness.dispatch(&CommandRole::ToggleFullscreen, None),
            Dispatch::Continue
        );
        assert!(harness.event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn quit_signals_short_circuit_and_requests_termination_once() {
        let mut harness = TestHarness::new();

        assert_eq!(harness.dispatch(&CommandRole::QuitApp, None), Dispatch::Quit);

        assert!(matches!(
            harness.event_rx.try_recv(),
            Ok(UserEvent::QuitRequested)
        ));
        assert!(
            harness.event_rx.try_recv().is_err(),
            "termination must be requested exactly once"
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn unknown_role_is_diagnosed_without_side_effects() {
        let mut harness = TestHarness::new();
        let window = TestWindow::default();
        let role = CommandRole::Other("bogus-role".to_string());

        let outcome = dispatch(
            &role,
            Some(&serde_json::json!({ "x": 1 })),
            Some(&window),
            harness.dialog.clone(),
            harness.proxy.clone(),
            harness.state.clone(),
        );

        assert_eq!(outcome, Dispatch::Continue);
        assert!(!window.is_fullscreen());
        assert!(!harness.state.lock().unwrap().about_dialog_visible());
        assert!(harness.event_rx.try_recv().is_err());
        assert!(logs_contain("unhandled menu command: bogus-role"));
    }

    #[traced_test]
    #[tokio::test]
    async fn open_file_resolves_through_the_proxy_and_reports_the_selection() {
        let mut harness = TestHarness::new();
        harness.dialog = Arc::new(MockDialogService {
            paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        });

        assert_eq!(
            harness.dispatch(&CommandRole::OpenFile, None),
            Dispatch::Continue
        );

        let event = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            harness.event_rx.recv(),
        )
        .await
        .expect("picker result did not arrive")
        .expect("event channel closed");
        match event {
            UserEvent::FileSelection(paths) => {
                assert_eq!(paths, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(logs_contain("open-file:"));
        assert!(logs_contain("/a"));
    }

    #[test]
    fn malformed_payload_falls_back_to_default_picker_options() {
        let options = picker_options(Some(&serde_json::json!("not an object")));
        assert_eq!(options, PickerOptions::default());

        let options = picker_options(Some(&serde_json::json!({ "directories": true })));
        assert!(options.directories);
        assert!(options.multiple);
    }
}
