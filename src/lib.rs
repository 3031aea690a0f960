//! trailwing_core - Pure no_std mission-execution core for small-vehicle autopilots
//!
//! This crate contains the platform-agnostic heart of an autopilot's mission
//! system: it decides, command by command, which waypoint the vehicle should
//! currently be flying toward, persists and replays that decision across
//! power cycles, and provides the geodesic arithmetic needed to reason about
//! positions on the earth's surface in fixed-point form.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (Storage, MissionParams,
//!   PositionSource)
//! - [`mission`]: Command records, the 15-byte storage codec, and the
//!   three-waypoint sliding-window sequencer
//! - [`geodesy`]: Fixed-point position math (distance, bearing, crossing
//!   detection, dead reckoning, fly-by turn geometry)
//! - [`path`]: Path manager trait and the basic waypoint-radius variant
//!
//! # Failure model
//!
//! Nothing in this crate panics on bad mission data. Invalid or corrupted
//! records degrade to "no valid command here" and drive the fallback-to-home
//! scanning logic; mission completion is a designed terminal state reported
//! by a `false` return, not an error.

#![no_std]

pub mod geodesy;
pub mod mission;
pub mod path;
pub mod traits;
