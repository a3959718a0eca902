// SPDX-License-Identifier: GPL-3.0-only

//! Device-side collaborators

pub mod camera;
