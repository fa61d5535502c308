use menubar_shell::app;
use menubar_shell::app::file_dialog::NativeDialogService;
use menubar_shell::app::window::WindowHandle;
use menubar_shell::config;
use menubar_shell::platform::menubar::NativeMenuBar;
use std::sync::{Arc, Mutex};
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use wry::WebViewBuilder;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create the event loop and window
    let event_loop = EventLoopBuilder::<app::events::UserEvent>::with_user_event().build();

    let state = Arc::new(Mutex::new(app::state::AppState::default()));
    let initial_config = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.")
        .config
        .clone();
    let (width, height) = initial_config.window_size;
    let (pos_x, pos_y) = initial_config.window_position;

    let window = WindowBuilder::new()
        .with_title("Menubar Shell")
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(480, 320))
        .build(&event_loop)
        .expect("Failed to build Window");

    let window = Arc::new(window);

    // Create the event loop proxy and the dialog service
    let proxy = event_loop.create_proxy();
    let dialog_service = Arc::new(NativeDialogService {});

    // Build the static menu tree, attach the shared activation handler to
    // every leaf, then hand the bound tree to the native renderer. The
    // tree is not touched again after this point.
    let mut menu_tree = app::menu::menubar(&|s| s.to_string());
    let default_handler =
        app::default_activation_handler(dialog_service.clone(), proxy.clone(), state.clone());
    app::menu::bind_default_handler(&mut menu_tree, &default_handler);
    let menubar =
        NativeMenuBar::attach(&menu_tree, &window).expect("Failed to build native menu bar");

    // muda delivers activations on its own channel; forward them onto the
    // event loop so they are handled on the loop thread.
    let menu_proxy = proxy.clone();
    std::thread::spawn(move || {
        while let Ok(event) = muda::MenuEvent::receiver().recv() {
            let _ = menu_proxy.send_event(app::events::UserEvent::MenuActivated(event));
        }
    });

    let webview = WebViewBuilder::new(&*window)
        .with_html(include_str!("ui/index.html"))
        .build()
        .expect("Failed to build WebView");

    let state_for_events = state.clone();
    let window_for_events = window.clone();
    let mut window_focused = true;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Focused(focused) => {
                    window_focused = focused;
                }
                WindowEvent::CloseRequested => {
                    tracing::info!("Close requested. Saving final window state...");
                    save_window_state(&state_for_events, &window_for_events);
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let mut state_guard = state_for_events.lock().unwrap();
                    state_guard.config.window_size = (size.width.into(), size.height.into());
                }
                WindowEvent::Moved(position) => {
                    let mut state_guard = state_for_events.lock().unwrap();
                    state_guard.config.window_position = (position.x.into(), position.y.into());
                }
                _ => (),
            },
            Event::UserEvent(app::events::UserEvent::MenuActivated(menu_event)) => {
                let focused = window_focused.then_some(&*window_for_events as &dyn WindowHandle);
                // A Quit outcome is delivered back as UserEvent::QuitRequested,
                // which is where shutdown actually happens.
                let _ = menubar.activate(&menu_event, focused);
            }
            Event::UserEvent(app::events::UserEvent::QuitRequested) => {
                tracing::info!("Quit requested from menu. Saving final window state...");
                save_window_state(&state_for_events, &window_for_events);
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview);
            }
            _ => (),
        }
    });
}

/// Persists the current window geometry alongside the rest of the config.
fn save_window_state(
    state: &Arc<Mutex<app::state::AppState>>,
    window: &Arc<tao::window::Window>,
) {
    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    if !state_guard.config.remember_window_state {
        return;
    }
    let size = window.inner_size();
    let position = window.outer_position().unwrap_or_default();
    state_guard.config.window_size = (size.width.into(), size.height.into());
    state_guard.config.window_position = (position.x.into(), position.y.into());

    if let Err(e) = config::settings::save_config(&state_guard.config, None) {
        tracing::error!("Failed to save config on exit: {}", e);
    }
}
