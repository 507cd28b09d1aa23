//! Application-level configuration constants.

use log::Level;

// Backend endpoints
pub const STATES_ENDPOINT: &str = "/get-states";
pub const JOBS_ENDPOINT: &str = "/get-jobs";
pub const EXPERIENCE_ENDPOINT: &str = "/get-exp-level";
pub const PREDICT_ENDPOINT: &str = "/predict";

// UI Behavior
pub const MIN_LOADER_DISPLAY_MS: u32 = 2000;
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

// Negotiation bounds
pub const NEGOTIATION_UPPER_FACTOR: f64 = 1.1;
pub const NEGOTIATION_LOWER_FACTOR: f64 = 0.9;
pub const NEGOTIATION_ROUNDING_STEP: f64 = 10_000.0;

// Diagnostics
pub const LOG_LEVEL: Level = Level::Info;
