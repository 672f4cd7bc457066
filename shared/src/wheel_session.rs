//! Spin bookkeeping for one visitor: which outcome each attempt gets, when
//! a spin may start, and how a failed commit is undone.
//!
//! The session is driven from a single-threaded event loop. Every method
//! takes `&self` so a second click can reach `request_spin` while the first
//! spin is still suspended on its timer; the `Spinning` phase turns that
//! second call into a no-op.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{NO_SPINS_LABEL, SPINNING_LABEL, SPIN_LABEL};
use crate::persistence::{load_record, store_record, Persistence, SessionRecord};
use crate::shared_wheel_game::{schedule_outcome, ScheduledOutcome, WheelGeometry, MAX_SPINS, REWARD_SEGMENT};
use crate::wheel_config::WheelConfig;

/// Why a spin could not be committed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Connectivity,
    Storage,
}

/// Draws and turns the wheel
pub trait Renderer {
    fn set_rest_angle(&self, angle: f64);
    fn animate_to(&self, final_angle: f64, duration: Duration);
}

/// Dialogs and the spin button
pub trait Presenter {
    fn set_spin_availability(&self, enabled: bool, label: &str);
    fn show_reward(&self);
    fn show_info(&self);
    fn show_error(&self, kind: FaultKind);
    fn dismiss_error(&self);
}

/// What the host environment offers the session: a connectivity probe and a timer.
#[allow(async_fn_in_trait)]
pub trait Environment {
    fn is_online(&self) -> bool;
    async fn sleep(&self, duration: Duration);
}

impl<T: Renderer + ?Sized> Renderer for Rc<T> {
    fn set_rest_angle(&self, angle: f64) {
        (**self).set_rest_angle(angle)
    }

    fn animate_to(&self, final_angle: f64, duration: Duration) {
        (**self).animate_to(final_angle, duration)
    }
}

impl<T: Presenter + ?Sized> Presenter for Rc<T> {
    fn set_spin_availability(&self, enabled: bool, label: &str) {
        (**self).set_spin_availability(enabled, label)
    }

    fn show_reward(&self) {
        (**self).show_reward()
    }

    fn show_info(&self) {
        (**self).show_info()
    }

    fn show_error(&self, kind: FaultKind) {
        (**self).show_error(kind)
    }

    fn dismiss_error(&self) {
        (**self).dismiss_error()
    }
}

impl<T: Environment> Environment for Rc<T> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    /// Persisted counters not read yet
    Loading,
    Idle,
    Spinning,
    /// Out of spins or prize already claimed
    Locked,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SpinPhase,
    pub spins_used: u32,
    pub prize_claimed: bool,
}

/// What a call to `request_spin` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinReport {
    /// Not eligible; nothing changed and nothing was shown
    Ignored,
    /// Refused before the wheel moved
    Refused(FaultKind),
    /// The wheel turned but the attempt could not be committed and was undone
    RolledBack(FaultKind),
    Settled {
        outcome: ScheduledOutcome,
        rewarded: bool,
    },
}

#[derive(Debug)]
struct SessionState {
    phase: SpinPhase,
    spins_used: u32,
    prize_claimed: bool,
    started: bool,
}

impl SessionState {
    fn limits_reached(&self) -> bool {
        self.spins_used >= MAX_SPINS || self.prize_claimed
    }

    fn can_spin(&self) -> bool {
        self.phase == SpinPhase::Idle && !self.limits_reached()
    }

    fn settle(&mut self) {
        self.phase = if self.limits_reached() {
            SpinPhase::Locked
        } else {
            SpinPhase::Idle
        };
    }

    fn record(&self) -> SessionRecord {
        SessionRecord {
            spins_used: self.spins_used,
            prize_claimed: self.prize_claimed,
        }
    }
}

pub struct WheelSession<S, R, P, E> {
    store: S,
    renderer: R,
    presenter: P,
    env: E,
    config: WheelConfig,
    geometry: WheelGeometry,
    state: RefCell<SessionState>,
}

impl<S, R, P, E> WheelSession<S, R, P, E>
where
    S: Persistence,
    R: Renderer,
    P: Presenter,
    E: Environment,
{
    pub fn new(config: WheelConfig, store: S, renderer: R, presenter: P, env: E) -> Self {
        let geometry = config.geometry();
        Self {
            store,
            renderer,
            presenter,
            env,
            config,
            geometry,
            state: RefCell::new(SessionState {
                phase: SpinPhase::Loading,
                spins_used: 0,
                prize_claimed: false,
                started: false,
            }),
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.borrow();
        SessionSnapshot {
            phase: state.phase,
            spins_used: state.spins_used,
            prize_claimed: state.prize_claimed,
        }
    }

    pub fn can_spin(&self) -> bool {
        self.state.borrow().can_spin()
    }

    /// Rehydrates the counters and puts the wheel and button in their starting state.
    /// Only the first call does anything.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.started {
                return;
            }
            state.started = true;
        }

        let record = load_record(&self.store, &self.config.keys, self.config.claim_policy).await;
        log::info!(
            "Wheel session restored: {} spin(s) used, prize claimed: {}",
            record.spins_used,
            record.prize_claimed
        );

        let replay_reward = {
            let mut state = self.state.borrow_mut();
            state.spins_used = record.spins_used;
            state.prize_claimed = record.prize_claimed;
            state.settle();
            state.prize_claimed
        };

        self.renderer.set_rest_angle(self.geometry.rest_angle(REWARD_SEGMENT));
        self.publish_availability();

        if replay_reward {
            self.presenter.show_reward();
        }
    }

    pub async fn request_spin(&self) -> SpinReport {
        if !self.can_spin() {
            return SpinReport::Ignored;
        }

        if !self.env.is_online() {
            log::warn!("Spin refused: offline");
            self.presenter.show_error(FaultKind::Connectivity);
            return SpinReport::Refused(FaultKind::Connectivity);
        }

        let attempt = {
            let mut state = self.state.borrow_mut();
            state.phase = SpinPhase::Spinning;
            state.spins_used += 1;
            state.spins_used
        };

        let Some(outcome) = schedule_outcome(attempt) else {
            log::error!("No outcome scheduled for attempt {}", attempt);
            let mut state = self.state.borrow_mut();
            state.spins_used -= 1;
            state.settle();
            return SpinReport::Ignored;
        };

        log::info!(
            "Spin {} of {}: landing on '{}' after {} turns",
            attempt,
            MAX_SPINS,
            outcome.label(),
            outcome.full_rotations
        );

        self.publish_availability();
        let duration = self.config.spin_duration();
        self.renderer.animate_to(self.geometry.final_angle(&outcome), duration);

        self.env.sleep(duration).await;

        if !self.env.is_online() {
            log::warn!("Connection lost during spin {}, rolling back", attempt);
            return self.roll_back(FaultKind::Connectivity);
        }

        let record = self.state.borrow().record();
        if let Err(e) = store_record(&self.store, &self.config.keys, &record, self.config.claim_policy).await {
            log::error!("Failed to save spin {}: {}", attempt, e);
            return self.roll_back(FaultKind::Storage);
        }

        self.state.borrow_mut().settle();
        self.publish_availability();

        let rewarded = outcome.is_reward();
        if rewarded {
            self.claim_prize().await;
            self.presenter.show_reward();
        }

        SpinReport::Settled { outcome, rewarded }
    }

    /// Reacts to the browser going on- or offline. Counters are never touched here.
    pub fn connectivity_changed(&self, online: bool) {
        if online {
            log::info!("Connection restored");
            self.presenter.dismiss_error();
        } else {
            log::warn!("Connection lost");
            self.presenter.show_error(FaultKind::Connectivity);
        }
    }

    pub fn show_info(&self) {
        self.presenter.show_info();
    }

    // The counter is already committed at this point, so a failed flag write
    // is logged and the reward is still delivered.
    async fn claim_prize(&self) {
        if !self.config.claim_policy.tracks_claim() {
            return;
        }

        let record = {
            let mut state = self.state.borrow_mut();
            state.prize_claimed = true;
            state.settle();
            state.record()
        };

        if let Err(e) = store_record(&self.store, &self.config.keys, &record, self.config.claim_policy).await {
            log::warn!("Prize claimed but the flag could not be saved: {}", e);
        }
    }

    fn roll_back(&self, kind: FaultKind) -> SpinReport {
        {
            let mut state = self.state.borrow_mut();
            state.spins_used = state.spins_used.saturating_sub(1);
            state.phase = SpinPhase::Idle;
        }
        self.publish_availability();
        self.presenter.show_error(kind);
        SpinReport::RolledBack(kind)
    }

    fn publish_availability(&self) {
        let (enabled, label) = {
            let state = self.state.borrow();
            match state.phase {
                SpinPhase::Spinning => (false, SPINNING_LABEL),
                _ if state.can_spin() => (true, SPIN_LABEL),
                SpinPhase::Loading => (false, SPIN_LABEL),
                _ => (false, NO_SPINS_LABEL),
            }
        };
        self.presenter.set_spin_availability(enabled, label);
    }
}
