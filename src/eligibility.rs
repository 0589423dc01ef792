//! Compatibility and newness gating.
//!
//! Two checks decide whether a catalog release may be offered: the device OS
//! must meet the release's minimum OS requirement, and the release must be
//! strictly newer than the installed version.

use crate::version::VersionIdentifier;

/// Returns `true` when the device OS meets the minimum requirement.
///
/// Equal or greater passes. An incompatible release is reported as the
/// distinct [`Decision::IncompatibleOs`](crate::engine::Decision) outcome,
/// not an error.
pub fn is_compatible(device_os: &VersionIdentifier, minimum_os: &VersionIdentifier) -> bool {
    device_os >= minimum_os
}

/// Returns `true` only when the catalog version is strictly newer than the
/// installed version.
pub fn is_newer(installed: &VersionIdentifier, catalog: &VersionIdentifier) -> bool {
    catalog > installed
}
