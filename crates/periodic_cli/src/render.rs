//! Console rendering of repository results.
//!
//! # Invariants
//! - An absent element renders as `Element not found!`, never a blank record.
//! - Atomic mass is shown with four decimals.

use periodic_core::{Block, Element, StatisticsSummary};
use std::fmt::Write;

pub const NOT_FOUND_MESSAGE: &str = "Element not found!";

/// Labeled detail block for one lookup result.
pub fn element_details(element: Option<&Element>) -> String {
    let Some(element) = element else {
        return NOT_FOUND_MESSAGE.to_string();
    };

    let group = element
        .group_number
        .map_or_else(|| "None".to_string(), |group| group.to_string());
    let mut out = String::new();
    let _ = writeln!(out, "=== Element Details ===");
    let _ = writeln!(out, "Name: {}", element.name);
    let _ = writeln!(out, "Symbol: {}", element.symbol);
    let _ = writeln!(out, "Atomic Number: {}", element.atomic_number);
    let _ = writeln!(out, "Atomic Mass: {:.4}", element.atomic_mass);
    let _ = writeln!(out, "Block: {}", element.block);
    let _ = writeln!(out, "Group: {group}");
    let _ = writeln!(out, "Period: {}", element.period);
    let _ = writeln!(
        out,
        "Electron Configuration: {}",
        element.electron_configuration
    );
    out.push_str("=====================");
    out
}

/// `SYMBOL: Name` lines under a heading.
pub fn element_list(heading: &str, elements: &[Element]) -> String {
    let mut out = format!("=== {heading} ===");
    for element in elements {
        let _ = write!(out, "\n{}: {}", element.symbol, element.name);
    }
    out
}

pub fn block_heading(block: Block) -> String {
    format!("Elements in {}-block", block.as_str().to_ascii_uppercase())
}

pub fn period_heading(period: i64) -> String {
    format!("Elements in Period {period}")
}

pub fn statistics(summary: &StatisticsSummary) -> String {
    format!(
        "=== Statistics ===\nTotal Elements: {}\ns-block Elements: {}\np-block Elements: {}\nAverage Atomic Mass: {:.4}",
        summary.total_elements,
        summary.s_block_count,
        summary.p_block_count,
        summary.avg_atomic_mass
    )
}
