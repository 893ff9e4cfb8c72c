//! Domain layer: the payment ledger, its value objects, and the ports
//! separating the core from storage and from the payment processor.

pub mod ledger;
pub mod payment;
pub mod ports;
