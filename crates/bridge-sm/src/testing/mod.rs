//! Shared fixtures and strategies for the bridge tests.
//!
//! - [`fixtures`] - ready-made deposits and registries
//! - [`strategies`] - proptest strategies for requests and slots

pub(crate) mod fixtures;
pub(crate) mod strategies;

pub(crate) use fixtures::{deposit_at, registry, DEPOSITOR, RECEIVER, SLOT_DURATION};
