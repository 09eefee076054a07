#![deny(warnings)]

pub mod config;
pub mod controller;
pub mod language;
pub mod notify;
pub mod session;
pub mod translate;
