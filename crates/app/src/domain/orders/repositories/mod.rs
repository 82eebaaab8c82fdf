//! Order Repositories

mod lines;
mod orders;

pub(crate) use lines::PgOrderLinesRepository;
pub(crate) use orders::PgOrdersRepository;
