// SPDX-License-Identifier: GPL-3.0-only

mod detail_record;
mod list_entry;
mod personal;

pub use detail_record::{DetailRecord, DetailStat};
pub use list_entry::ListEntry;
pub use personal::{Override, Overrides};
