//! Viewport tracking
//!
//! The browser side registers a resize listener at mount and removes it when
//! the subscription is dropped. The tracker itself is plain data.

use crate::Viewport;

/// Latest known viewport size
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    current: Viewport,
    changed: bool,
}

impl ViewportTracker {
    pub fn new(initial: Viewport) -> Self {
        Self {
            current: initial,
            changed: true,
        }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Record a new size. Returns true if it differs from the last one.
    pub fn update(&mut self, viewport: Viewport) -> bool {
        if viewport == self.current {
            return false;
        }
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.current = viewport;
        self.changed = true;
        true
    }

    /// Take the pending-change flag
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{ResizeSubscription, window_viewport};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::Viewport;

    /// Current `innerWidth` x `innerHeight` of the window
    pub fn window_viewport() -> Option<Viewport> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Viewport::new(width as f32, height as f32))
    }

    /// A registered window `resize` listener, removed on drop
    pub struct ResizeSubscription {
        window: web_sys::Window,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl ResizeSubscription {
        /// Register `on_resize` and call it once with the current size
        pub fn register(mut on_resize: impl FnMut(Viewport) + 'static) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

            if let Some(viewport) = window_viewport() {
                on_resize(viewport);
            }

            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(viewport) = window_viewport() {
                    on_resize(viewport);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            log::debug!("Resize listener registered");

            Ok(Self { window, closure })
        }
    }

    impl Drop for ResizeSubscription {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
            log::debug!("Resize listener removed");
        }
    }
}
