use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

const RESIZE_DEBOUNCE_MS: u32 = 250;

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0)
}

/// Window inner width, updated once resizing has paused.
#[hook]
pub fn use_viewport_width() -> f64 {
    let width = use_state(viewport_width);

    {
        let width = width.clone();
        use_effect_with((), move |_| {
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

            let listener = web_sys::window().map(|window| {
                let pending = pending.clone();
                EventListener::new(&window, "resize", move |_| {
                    let width = width.clone();
                    // Replacing the handle cancels the previous timeout
                    *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                        width.set(viewport_width());
                    }));
                })
            });

            move || {
                drop(listener);
                pending.borrow_mut().take();
            }
        });
    }

    *width
}
