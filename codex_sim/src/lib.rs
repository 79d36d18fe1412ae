mod game;
mod recording;
pub use game::*;
pub use recording::*;

use codex::Points;

pub struct Config {
    /// The game ends as soon as the placement score reaches this.
    pub end_threshold: Points,
    pub hand_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            end_threshold: 20,
            hand_size: 3,
        }
    }
}
