//! Rail toolbar constants
//!
//! Limits and fixed values shared by the toolbar, the pickers and the
//! command packing.

use bevy::prelude::*;

// ============================================================================
// STATION LIMITS
// ============================================================================

/// Largest platform count or platform length selectable in the picker
pub const MAX_STATION_SIZE: u8 = 7;

/// Upper bound of the station spread game setting
pub const MAX_STATION_SPREAD: u8 = 64;

// ============================================================================
// SIGNAL DRAGGING
// ============================================================================

pub const MIN_SIGNAL_DENSITY: u8 = 1;
pub const MAX_SIGNAL_DENSITY: u8 = 20;

// ============================================================================
// COMMAND PARAMETERS
// ============================================================================

/// Transport type tag for rail tunnels and bridges
pub const TRANSPORT_RAIL: u32 = 0;

// ============================================================================
// UI
// ============================================================================

/// Lines kept in the terminal log
pub const TERMINAL_LOG_CAPACITY: usize = 200;

pub const TOOLBAR_BUTTON_SIZE: f32 = 36.0;

pub const TOOLBAR_LOWERED: Color = Color::srgb(0.35, 0.75, 0.35);
pub const TOOLBAR_RAISED: Color = Color::srgb(0.15, 0.15, 0.15);
pub const TOOLBAR_DISABLED: Color = Color::srgb(0.08, 0.08, 0.08);
pub const TOOLBAR_REMOVE_ACTIVE: Color = Color::srgb(0.75, 0.35, 0.35);
