pub mod recording_sender;

pub use recording_sender::{RecordingSender, Sent};
