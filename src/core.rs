// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod cache;
pub mod weakness;

#[cfg(test)]
pub(crate) mod testing;
