pub const SPINS_USED_KEY: &str = "wheel_spins_used";
pub const PRIZE_CLAIMED_KEY: &str = "prize_opened";
pub const VISITOR_ID_KEY: &str = "wheel_visitor_id";

pub const STORAGE_ENDPOINT: &str = "/api/storage";
pub const HEALTH_ENDPOINT: &str = "/health";

pub const SPIN_LABEL: &str = "Spin";
pub const SPINNING_LABEL: &str = "Spinning...";
pub const NO_SPINS_LABEL: &str = "No spins";

pub const REWARD_TITLE: &str = "Congratulations!";
pub const REWARD_MESSAGE: &str = "You won 500% on your first deposit!";
pub const INFO_TITLE: &str = "How it works";
pub const INFO_MESSAGE: &str = "You have two free spins. Every spin is saved, so reloading the page will not give you more.";
pub const CONNECTIVITY_ERROR_TITLE: &str = "No connection";
pub const CONNECTIVITY_ERROR_MESSAGE: &str = "Your internet connection was lost. Your spin was not counted, please try again once you are back online.";
pub const STORAGE_ERROR_TITLE: &str = "Something went wrong";
pub const STORAGE_ERROR_MESSAGE: &str = "We could not save your spin. It was not counted, please try again.";

pub const PRIZE_SOUND_PATH: &str = "/audio-prize.mp3";
pub const WHEEL_IMAGE_PATH: &str = "/spinning-wheel.webp";

pub const MAX_KEY_LENGTH: usize = 64;
pub const MAX_VALUE_LENGTH: usize = 256;
