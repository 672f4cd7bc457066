use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use shared::constants::{PRIZE_SOUND_PATH, SPIN_LABEL};
use shared::wheel_session::{Environment, FaultKind, Presenter, Renderer};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, HtmlAudioElement};
use yew::prelude::*;

use crate::config::get_asset_url;

/// Everything the wheel page draws, driven by the session through `ViewRenderer`
/// and `ViewPresenter`.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    pub rotation: f64,
    /// Zero while snapping to a rest position
    pub transition_ms: u32,
    pub spin_enabled: bool,
    pub spin_label: String,
    pub reward_open: bool,
    pub info_open: bool,
    pub error: Option<FaultKind>,
}

impl Default for WheelView {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            transition_ms: 0,
            spin_enabled: false,
            spin_label: SPIN_LABEL.to_string(),
            reward_open: false,
            info_open: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    Rest(f64),
    Animate { angle: f64, duration_ms: u32 },
    Availability { enabled: bool, label: String },
    OpenReward,
    CloseReward,
    OpenInfo,
    CloseInfo,
    OpenError(FaultKind),
    CloseError,
}

/// CSS only animates when the target differs from the current transform, so a
/// retried spin with the same target gets extra full turns.
fn forward_target(current: f64, target: f64) -> f64 {
    let mut angle = target;
    while angle <= current {
        angle += 360.0;
    }
    angle
}

impl Reducible for WheelView {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ViewAction::Rest(angle) => {
                next.rotation = angle;
                next.transition_ms = 0;
            }
            ViewAction::Animate { angle, duration_ms } => {
                next.rotation = forward_target(self.rotation, angle);
                next.transition_ms = duration_ms;
            }
            ViewAction::Availability { enabled, label } => {
                next.spin_enabled = enabled;
                next.spin_label = label;
            }
            ViewAction::OpenReward => next.reward_open = true,
            ViewAction::CloseReward => next.reward_open = false,
            ViewAction::OpenInfo => next.info_open = true,
            ViewAction::CloseInfo => next.info_open = false,
            ViewAction::OpenError(kind) => next.error = Some(kind),
            ViewAction::CloseError => next.error = None,
        }
        Rc::new(next)
    }
}

pub struct ViewRenderer {
    dispatcher: UseReducerDispatcher<WheelView>,
}

impl ViewRenderer {
    pub fn new(dispatcher: UseReducerDispatcher<WheelView>) -> Self {
        Self { dispatcher }
    }
}

impl Renderer for ViewRenderer {
    fn set_rest_angle(&self, angle: f64) {
        self.dispatcher.dispatch(ViewAction::Rest(angle));
    }

    fn animate_to(&self, final_angle: f64, duration: Duration) {
        self.dispatcher.dispatch(ViewAction::Animate {
            angle: final_angle,
            duration_ms: duration.as_millis() as u32,
        });
    }
}

pub struct ViewPresenter {
    dispatcher: UseReducerDispatcher<WheelView>,
    play_sound: bool,
}

impl ViewPresenter {
    pub fn new(dispatcher: UseReducerDispatcher<WheelView>, play_sound: bool) -> Self {
        Self { dispatcher, play_sound }
    }
}

fn play_prize_sound() {
    let audio = match HtmlAudioElement::new_with_src(&get_asset_url(PRIZE_SOUND_PATH)) {
        Ok(audio) => audio,
        Err(e) => {
            log::warn!("Could not create prize sound: {:?}", e);
            return;
        }
    };
    audio.set_volume(1.0);

    match audio.play() {
        Ok(promise) => spawn_local(async move {
            // Browsers reject autoplay without a prior user gesture
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("Prize sound did not play: {:?}", e);
            }
        }),
        Err(e) => log::debug!("Prize sound did not play: {:?}", e),
    }
}

impl Presenter for ViewPresenter {
    fn set_spin_availability(&self, enabled: bool, label: &str) {
        self.dispatcher.dispatch(ViewAction::Availability {
            enabled,
            label: label.to_string(),
        });
    }

    fn show_reward(&self) {
        self.dispatcher.dispatch(ViewAction::OpenReward);
        if self.play_sound {
            play_prize_sound();
        }
    }

    fn show_info(&self) {
        self.dispatcher.dispatch(ViewAction::OpenInfo);
    }

    fn show_error(&self, kind: FaultKind) {
        self.dispatcher.dispatch(ViewAction::OpenError(kind));
    }

    fn dismiss_error(&self) {
        self.dispatcher.dispatch(ViewAction::CloseError);
    }
}

pub struct BrowserEnvironment;

impl Environment for BrowserEnvironment {
    fn is_online(&self) -> bool {
        window().map(|w| w.navigator().on_line()).unwrap_or(true)
    }

    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis() as u32).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(view: WheelView, action: ViewAction) -> WheelView {
        (*Rc::new(view).reduce(action)).clone()
    }

    #[test]
    fn test_rest_disables_transition() {
        let view = WheelView { transition_ms: 7000, ..WheelView::default() };
        let view = reduce(view, ViewAction::Rest(360.0));
        assert_eq!(view.rotation, 360.0);
        assert_eq!(view.transition_ms, 0);
    }

    #[test]
    fn test_animate_moves_forward() {
        let view = reduce(WheelView::default(), ViewAction::Rest(360.0));
        let view = reduce(view, ViewAction::Animate { angle: 1680.0, duration_ms: 7000 });
        assert_eq!(view.rotation, 1680.0);
        assert_eq!(view.transition_ms, 7000);

        // Retrying the same target after a rollback still turns the wheel
        let retried = reduce(view, ViewAction::Animate { angle: 1680.0, duration_ms: 7000 });
        assert_eq!(retried.rotation, 2040.0);
        assert_eq!(retried.rotation % 360.0, 1680.0 % 360.0);
    }

    #[test]
    fn test_dialogs_toggle_independently() {
        let view = reduce(WheelView::default(), ViewAction::OpenError(FaultKind::Storage));
        let view = reduce(view, ViewAction::OpenInfo);
        assert_eq!(view.error, Some(FaultKind::Storage));
        assert!(view.info_open);

        let view = reduce(view, ViewAction::CloseError);
        assert_eq!(view.error, None);
        assert!(view.info_open);
        assert!(!view.reward_open);
    }
}
