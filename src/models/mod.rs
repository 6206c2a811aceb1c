pub mod user;
pub mod score;
pub mod claim;
pub mod leaderboard;
pub mod error;

pub use user::*;
pub use score::*;
pub use claim::*;
pub use leaderboard::*;
pub use error::*;
