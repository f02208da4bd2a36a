//! Terminal stand-in for the browser page: notifications go to stderr.

use client_core::{Panel, ScrollBehavior, UiSurface};
use tracing::debug;

pub struct ConsoleSurface;

impl UiSurface for ConsoleSurface {
    fn notify(&self, message: &str) {
        eprintln!("[알림] {message}");
    }

    fn scroll_into_view(&self, panel: Panel, behavior: ScrollBehavior) {
        debug!(?panel, ?behavior, "console: scroll request ignored");
    }
}
