//! Core types for ragstream.

pub mod message;
pub mod request;
pub mod stream;

pub use message::*;
pub use request::*;
pub use stream::*;
