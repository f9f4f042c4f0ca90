//! Rail domain vocabulary shared by the toolbar and the placement code.

pub mod railtype;
pub mod signal;
pub mod station;

pub use railtype::*;
pub use signal::*;
pub use station::*;
