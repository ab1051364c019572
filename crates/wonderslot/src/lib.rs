//! wonderslot library: configuration, dispatch and presentation for the
//! slot machine binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod presenter;
pub mod version;
