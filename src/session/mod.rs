pub mod connection;
pub mod driver;
pub mod state;

pub use connection::{farcaster_step_label, Connection, ConnectionSkipped};
pub use driver::{load_logo, refresh_content, regenerate_design, run_connection, submit_claim};
pub use state::{ContentRequest, Session, CLAIM_SUCCESS_NOTICE};
