//! Shell command implementations.

pub mod sessions;
pub mod summary;
pub mod timer;
pub mod util;
