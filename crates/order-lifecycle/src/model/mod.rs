//! Plain data types shared by the order actor, its collaborators and its clients.

pub mod address;
pub mod order;

pub use address::*;
pub use order::*;
