//! Sample champion content for the arena engine.
//!
//! This crate is data: champion stat lines, passives expressed as
//! [`arena_core::EventHooks`] implementations, and skills expressed as
//! [`arena_core::SkillSpec`] records. The engine consumes these through
//! the same contracts a production content pack would use; nothing here
//! adds rules of its own.

pub mod catalog;
pub mod champions;

pub use catalog::{ChampionKit, roster_kit};
pub use champions::{oracle, vanguard, warden};
