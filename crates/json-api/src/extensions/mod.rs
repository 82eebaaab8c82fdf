//! Extension traits

mod date_time;
mod depot;
mod result;

pub(crate) use date_time::parse_date_time;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
