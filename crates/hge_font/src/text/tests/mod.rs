//! Cross-module tests for parsing, measurement and layout

mod scenarios;
