//! This module handles configuration and logging.

// SPDX-License-Identifier: AGPL-3.0-or-later

/// Configuration file parsing and management.
pub mod config;
/// Enumerations used in configuration.
pub mod enums;
/// Logger initialization.
pub mod logger;
