pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod io;

pub use application::{Event, Session};
pub use domain::*;
