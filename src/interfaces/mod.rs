//! Interface adapters between the transport layer and the application core.

pub mod telegram;
