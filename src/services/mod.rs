// SPDX-License-Identifier: MIT

//! Clients for external collaborators.

pub mod cleanup;
pub mod strava;

pub use cleanup::CleanupClient;
pub use strava::StravaClient;
