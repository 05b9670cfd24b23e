//! The bridge deposit: its identity, its status and the derivation of that status from time.

pub mod id;
pub mod machine;
pub mod score;
pub mod state;
