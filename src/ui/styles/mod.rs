// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for every panel.

pub mod button;
pub mod container;
