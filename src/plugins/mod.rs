//! CLI surfaces, one per independently-runnable component.

pub mod bootstrap;
pub mod checkpoint;
pub mod docs;
pub mod rules;
