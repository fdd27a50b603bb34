/// Data organization utilities for the UV monitoring service.
///
/// This module provides the grouping and lookup helpers the alerting
/// code builds on. Nothing here classifies or formats; see `alert` for
/// that.
///
/// Submodules:
/// - `groupings` — index runs, calendar-day chunks and timeline lookups.

pub mod groupings;
