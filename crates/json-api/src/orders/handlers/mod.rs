//! Order Handlers

pub(crate) mod by_customer;
pub(crate) mod by_status;
pub(crate) mod create;
pub(crate) mod date_range;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;
