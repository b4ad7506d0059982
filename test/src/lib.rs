pub mod helpers;
pub mod local_transport;
pub mod test_protocol;

pub use helpers::{RecordingSender, Sent};
pub use local_transport::{LocalTransport, SERVER_ID};
pub use test_protocol::{catalog, Profile, Stamina, PROFILE, STAMINA};
