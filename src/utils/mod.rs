pub mod clock;
pub mod share;

pub use clock::{Clock, ManualClock, OffsetClock, SystemClock};
pub use share::ShareLinks;
