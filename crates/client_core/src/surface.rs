//! Front-end seam: how the controller talks back to whatever shows the panels.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Result,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

pub trait UiSurface: Send + Sync {
    /// Blocking, user-visible notification.
    fn notify(&self, message: &str);
    fn scroll_into_view(&self, panel: Panel, behavior: ScrollBehavior);
}

impl<T> UiSurface for Arc<T>
where
    T: UiSurface + ?Sized,
{
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }

    fn scroll_into_view(&self, panel: Panel, behavior: ScrollBehavior) {
        (**self).scroll_into_view(panel, behavior)
    }
}

pub struct SilentSurface;

impl UiSurface for SilentSurface {
    fn notify(&self, _message: &str) {}

    fn scroll_into_view(&self, _panel: Panel, _behavior: ScrollBehavior) {}
}
