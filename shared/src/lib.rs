pub mod constants;
pub mod persistence;
pub mod shared_wheel_game;
pub mod validation;
pub mod wheel_config;
pub mod wheel_session;
