// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response shapes shared across endpoint surfaces.

use serde::Deserialize;

/// A paginated list response.
///
/// The backend boxes list items under `data` with pagination metadata as
/// siblings, so paginated endpoints parse the bare body into this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}
