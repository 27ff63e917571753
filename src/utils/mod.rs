//! Utility functions for working with transport types.
//!
//! Helpers for pulling content out of parts and for building agent messages.

pub mod message;
pub mod parts;

pub use message::*;
pub use parts::*;
