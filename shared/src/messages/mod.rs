pub mod component_message;
pub mod dispatcher;
pub mod error;
pub mod incoming_queue;
pub mod message_kind;
