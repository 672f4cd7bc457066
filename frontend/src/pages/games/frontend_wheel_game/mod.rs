mod wheel_canvas;
mod wheel_utils;
mod wheel_view;

use shared::constants::{INFO_MESSAGE, INFO_TITLE, REWARD_MESSAGE, REWARD_TITLE};
use shared::wheel_session::WheelSession;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::config::load_wheel_config;
use crate::hooks::{use_connectivity, use_viewport_width};
use crate::storage::WidgetStore;

use wheel_canvas::WheelFaceView;
use wheel_utils::{fault_copy, LightBulbs, SpinButton, WheelDialog};
pub use wheel_view::{BrowserEnvironment, ViewAction, ViewPresenter, ViewRenderer, WheelView};

pub type BrowserWheelSession = WheelSession<WidgetStore, ViewRenderer, ViewPresenter, BrowserEnvironment>;

const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0.4);
    }
    70% {
        transform: scale(1.02);
        box-shadow: 0 0 0 10px rgba(255, 215, 0, 0);
    }
    100% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0);
    }
}

.animate-pulse-subtle {
    animation: pulse-subtle 2s infinite;
}

@keyframes bulb-blink {
    0%, 100% { opacity: 1; box-shadow: 0 0 8px 2px rgba(255, 230, 120, 0.9); }
    50% { opacity: 0.35; box-shadow: none; }
}

.light-bulb {
    animation: bulb-blink 1s infinite;
}
"#;

#[function_component(FrontendWheelGame)]
pub fn frontend_wheel_game() -> Html {
    {
        use_effect_with((), move |_| {
            let style_element = window()
                .and_then(|w| w.document())
                .and_then(|document| {
                    let head = document.head()?;
                    let style = document.create_element("style").ok()?;
                    style.set_text_content(Some(CUSTOM_CSS));
                    head.append_child(&style).ok()?;
                    Some(style)
                });

            move || {
                if let Some(style) = style_element {
                    style.remove();
                }
            }
        });
    }

    let view = use_reducer(WheelView::default);
    let viewport_width = use_viewport_width();

    let session = {
        let dispatcher = view.dispatcher();
        use_memo((), move |_| {
            let config = load_wheel_config();
            let store = WidgetStore::from_config(&config);
            let play_sound = config.play_sound;
            BrowserWheelSession::new(
                config,
                store,
                ViewRenderer::new(dispatcher.clone()),
                ViewPresenter::new(dispatcher, play_sound),
                BrowserEnvironment,
            )
        })
    };

    {
        let session = session.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                session.initialize().await;
            });
            || ()
        });
    }

    let on_connectivity = {
        let session = session.clone();
        use_callback((), move |online: bool, _| session.connectivity_changed(online))
    };
    use_connectivity(on_connectivity);

    let start_spin = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            spawn_local(async move {
                let report = session.request_spin().await;
                log::debug!("Spin request finished: {:?}", report);
            });
        })
    };

    let open_info = {
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            session.show_info();
        })
    };

    let close = |action: ViewAction| {
        let dispatcher = view.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(action.clone()))
    };

    let config = session.config();

    html! {
        <div class="flex flex-col items-center gap-6 w-full max-w-xl mx-auto px-4 py-6">
            <div class="inner-fortune relative w-full aspect-square">
                <div class="roulette-wheel absolute inset-0">
                    <WheelFaceView
                        face={config.face.clone()}
                        rotation={view.rotation}
                        transition_ms={view.transition_ms}
                        {viewport_width}
                    />
                </div>
                <LightBulbs count={config.bulb_count} {viewport_width} />
                // Fixed pointer at twelve o'clock
                <div class="absolute left-1/2 -top-2 z-[4] -translate-x-1/2 w-0 h-0 border-l-[14px] border-r-[14px] border-t-[28px] border-l-transparent border-r-transparent border-t-yellow-400 drop-shadow-lg" />
            </div>

            <div class="w-full max-w-xs">
                <SpinButton
                    enabled={view.spin_enabled}
                    label={view.spin_label.clone()}
                    onclick={start_spin}
                />
            </div>

            <a href="#" class="wheel-info text-sm text-gray-400 underline hover:text-white" onclick={open_info}>
                {"How does it work?"}
            </a>

            if view.reward_open {
                <WheelDialog
                    title={REWARD_TITLE}
                    message={REWARD_MESSAGE}
                    on_close={close(ViewAction::CloseReward)}
                />
            }
            if view.info_open {
                <WheelDialog
                    title={INFO_TITLE}
                    message={INFO_MESSAGE}
                    z_index={110}
                    on_close={close(ViewAction::CloseInfo)}
                />
            }
            if let Some(kind) = view.error {
                <WheelDialog
                    title={fault_copy(kind).0}
                    message={fault_copy(kind).1}
                    z_index={110}
                    on_close={close(ViewAction::CloseError)}
                />
            }
        </div>
    }
}
