//! Library surface of the tabsync CLI (logging bootstrap reused by tests).

pub mod logging;
