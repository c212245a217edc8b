#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod app;
pub mod config;
pub mod errors;
pub mod index_element;
pub mod parse_opts;
pub mod routes;
