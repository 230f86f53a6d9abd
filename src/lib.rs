//! Simple to use cli for keeping track of job applications. Every application is stored with the
//! day it was submitted on, which makes it possible to see how many days in a row you have been
//! applying and how busy the last weeks were.
//!

pub mod activity;
pub mod cli;
pub mod company;
pub mod fs;
pub mod store;
pub mod utils;
