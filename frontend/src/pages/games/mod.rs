pub mod frontend_wheel_game;
