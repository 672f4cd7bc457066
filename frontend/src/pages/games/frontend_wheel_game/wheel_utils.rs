use shared::constants::{
    CONNECTIVITY_ERROR_MESSAGE, CONNECTIVITY_ERROR_TITLE, STORAGE_ERROR_MESSAGE, STORAGE_ERROR_TITLE,
};
use shared::shared_wheel_game::bulb_positions;
use shared::wheel_session::FaultKind;
use web_sys::MouseEvent;
use yew::prelude::*;

pub fn fault_copy(kind: FaultKind) -> (&'static str, &'static str) {
    match kind {
        FaultKind::Connectivity => (CONNECTIVITY_ERROR_TITLE, CONNECTIVITY_ERROR_MESSAGE),
        FaultKind::Storage => (STORAGE_ERROR_TITLE, STORAGE_ERROR_MESSAGE),
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub enabled: bool,
    pub label: AttrValue,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_class = if props.enabled {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl animate-pulse-subtle"
    } else {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-50 cursor-not-allowed text-white"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={!props.enabled}
                class="spin-button relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 focus:outline-none focus:ring-4 focus:ring-yellow-300 bg-transparent"
            >
                {props.label.clone()}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or(100)]
    pub z_index: u32,
    #[prop_or_default]
    pub children: Html,
}

/// Modal that closes on its ×, its OK button or a click on the backdrop.
#[function_component(WheelDialog)]
pub fn wheel_dialog(props: &WheelDialogProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div
            class="fixed inset-0 bg-black/70 flex items-center justify-center p-4"
            style={format!("z-index: {};", props.z_index)}
            onclick={close.clone()}
        >
            <div
                role="dialog"
                class="relative w-full max-w-md rounded-2xl bg-gray-900 border-2 border-yellow-400 p-6 text-center text-white shadow-2xl"
                onclick={stop}
            >
                <button
                    class="absolute top-2 right-3 text-2xl text-gray-400 hover:text-white"
                    aria-label="Close"
                    onclick={close.clone()}
                >
                    {"×"}
                </button>
                <h2 class="text-2xl font-bold mb-3 text-yellow-400">{props.title.clone()}</h2>
                <p class="mb-4 text-gray-200">{props.message.clone()}</p>
                {props.children.clone()}
                <button
                    class="modal-btn px-6 py-2 rounded-full bg-gradient-to-r from-yellow-400 to-orange-500 font-bold"
                    onclick={close}
                >
                    {"OK"}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LightBulbsProps {
    pub count: u32,
    pub viewport_width: f64,
}

/// Decorative ring of bulbs around the wheel rim.
#[function_component(LightBulbs)]
pub fn light_bulbs(props: &LightBulbsProps) -> Html {
    html! {
        <div class="absolute inset-0 z-[3] pointer-events-none">
            { for bulb_positions(props.count, props.viewport_width).into_iter().enumerate().map(|(i, (left, top))| {
                let delay = if i % 2 == 0 { "0s" } else { "0.5s" };
                html! {
                    <div
                        key={i}
                        class="light-bulb absolute w-3 h-3 -translate-x-1/2 -translate-y-1/2 rounded-full bg-yellow-200"
                        style={format!("left: {:.3}%; top: {:.3}%; animation-delay: {};", left, top, delay)}
                    />
                }
            }) }
        </div>
    }
}
