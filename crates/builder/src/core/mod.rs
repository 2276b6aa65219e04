//! Core module containing the builder and its context

pub mod builder;
pub mod context;
