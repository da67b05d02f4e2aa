// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod run;
pub mod user;

pub use run::{NewRun, Run};
pub use user::{NewUser, ReportPeriodicity, User, UserResponse, UserUpdate};
