//! Shared helpers for parser and grammar tests.

#![allow(dead_code)]

pub mod parse_helpers;
