//! Product Handlers

pub(crate) mod category;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod low_stock;
pub(crate) mod search;
pub(crate) mod update;
