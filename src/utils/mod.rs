//! Shared helpers: the parallelism toggle and the work dispatcher.

pub mod parallel;

pub use parallel::{
    any_match, dispatch_keyed, parallelism_enabled, preferred_chunk_size, retain_ordered,
    set_parallelism, ParallelismGuard,
};
