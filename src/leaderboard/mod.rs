pub mod simulator;
pub mod schedule;

pub use simulator::{Leaderboard, TickOutcome};
pub use schedule::{LeaderboardSchedule, ScheduleEvent};
