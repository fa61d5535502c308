//! An abstraction over the focused window, so window-scoped commands can
//! be exercised in tests without a display server.

/// The subset of window operations menu commands need.
pub trait WindowHandle {
    /// Whether the window currently occupies the full screen.
    fn is_fullscreen(&self) -> bool;

    /// Puts the window into or takes it out of full-screen mode.
    fn set_fullscreen(&self, fullscreen: bool);
}

impl WindowHandle for tao::window::Window {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen().is_some()
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        let mode = fullscreen.then(|| tao::window::Fullscreen::Borderless(None));
        tao::window::Window::set_fullscreen(self, mode);
    }
}
