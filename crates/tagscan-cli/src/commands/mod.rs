pub mod config;
pub mod dispatch;
pub mod merge;
pub mod scan;
