/// Single-literal coercion command.
pub mod coerce;
/// Timestamp layout command.
pub mod date;
/// Value tree dump command.
pub mod dump;
/// Shared value tree printer.
pub mod print;
/// Per-key coercion table command.
pub mod table;
/// Shared JSON and input helpers.
pub mod util;
