pub mod conversation;
pub mod relay;
