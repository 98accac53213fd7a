//! HTML parsing for the request board
//!
//! Selectors are compiled once per parser; parsing itself never fails; a
//! page without request cards yields no records.

pub mod config;
pub mod like_count;
pub mod request_list_parser;

pub use config::RequestListSelectors;
pub use like_count::parse_like_count;
pub use request_list_parser::RequestListParser;
