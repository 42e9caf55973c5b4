//! Request handlers, grouped by entity.

pub(crate) mod pages;
pub(crate) mod sites;
pub(crate) mod themes;
