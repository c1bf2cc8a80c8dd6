//! Runtime configuration for the tournament server.

use once_cell::sync::Lazy;
use std::env;

use crate::game::types::Tiebreak;

#[derive(Debug)]
pub struct Settings {
    /// Wall-clock length of one round (seconds).
    pub round_secs: i64,
    /// Daily cutover round boundaries snap to, seconds past UTC midnight.
    pub cutover_secs: i64,
    /// Window before a round's end during which no fresh turn may open.
    /// Always shorter than a round.
    pub buffer_secs: i64,
    /// Who an undecided tie falls to once the round elapses.
    pub tiebreak: Tiebreak,
}

impl Settings {
    pub fn from_env() -> Self {
        // Floored to 1: the round clock divides by this.
        let round_secs = env::var("ROUND_DURATION_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(86_400)
            .max(1);

        let cutover_secs = env::var("ROUND_CUTOVER_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(18_000); // midnight US-Eastern

        let buffer_secs = env::var("PLAY_BUFFER_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(3_600)
            .min(round_secs - 1);

        let tiebreak = match env::var("TIEBREAK").as_deref() {
            Ok("highest") => Tiebreak::HighestId,
            _ => Tiebreak::LowestId,
        };

        Settings {
            round_secs,
            cutover_secs,
            buffer_secs,
            tiebreak,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
