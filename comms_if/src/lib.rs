//! # Communications interface crate.
//!
//! Provides the message types exchanged between the ball tracker and its
//! collaborators: the detector, the commanding process, and the head.
//! Transport of these messages is not handled here.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommands into the tracker
pub mod tc;

/// Definitions for equipment (the detector and the head)
pub mod eqpt;
