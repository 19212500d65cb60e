//! Regex patterns for rule text and value cleanup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bare coordinate: "T4", "D14"
    pub static ref SINGLE_CELL: Regex = Regex::new(
        r"^([A-Z]+)(\d+)$"
    ).unwrap();

    // Coordinate with a row step: "D24:step20"
    pub static ref STEPPED_COLUMN: Regex = Regex::new(
        r"^([A-Z]+)(\d+)\s*:step\s*(\d+)$"
    ).unwrap();

    // Coordinate with a continuation marker: "F38+"
    pub static ref COLUMN_RUN: Regex = Regex::new(
        r"^([A-Z]+)(\d+)\s*\+$"
    ).unwrap();

    // Whitespace runs, newlines included
    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}
