pub mod clock;
pub mod derived;
pub mod models;
pub mod normalize;
pub mod raw;

pub use clock::{Clock, FixedClock, SystemClock};
pub use models::*;
pub use normalize::{normalize_events, normalize_players, normalize_teams};
