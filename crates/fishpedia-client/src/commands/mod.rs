//! Command handlers: the only way views change state.
//!
//! Each sub-module groups related commands.  Every handler takes the
//! [`SharedState`](crate::state::SharedState), checks its preconditions,
//! mutates, publishes a [`CatalogEvent`](crate::events::CatalogEvent) and
//! returns.  A refused command leaves state untouched.

pub mod catalog;
pub mod edit;
pub mod facts;
pub mod favorites;
pub mod session;
