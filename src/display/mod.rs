//! Export helpers: human-readable report and Graphviz DOT.
pub mod dot;
pub mod report;

pub use dot::to_dot;
pub use report::format_report;
