use gloo::events::EventListener;
use yew::prelude::*;

/// Forwards the window's `online` and `offline` events to `on_change`.
#[hook]
pub fn use_connectivity(on_change: Callback<bool>) {
    use_effect_with(on_change, move |on_change| {
        let listeners = web_sys::window().map(|window| {
            let on_online = {
                let on_change = on_change.clone();
                EventListener::new(&window, "online", move |_| on_change.emit(true))
            };
            let on_offline = {
                let on_change = on_change.clone();
                EventListener::new(&window, "offline", move |_| on_change.emit(false))
            };
            (on_online, on_offline)
        });
        move || drop(listeners)
    });
}
