//! Domain layer: pure business logic with no I/O.

pub mod faq;
pub mod foundation;
pub mod intent;
pub mod pricing;
pub mod session;
