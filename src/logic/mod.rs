//! Core logic modules

pub mod markup;
pub mod record;
pub mod scheduler;
pub mod search;
pub mod view;
