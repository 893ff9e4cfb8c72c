//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PaymentService`, the primary entry point for
//! recording payments, answering status queries, and driving the refund
//! workflow against the payment processor.

pub mod service;
