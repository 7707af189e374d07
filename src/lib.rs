// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod entities;
pub mod router;
pub mod storage;
pub mod utils;

pub use catalog::{Catalog, CatalogError};
