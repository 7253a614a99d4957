//! zingsheet_engine - Spreadsheet formula engine.

pub mod engine;
