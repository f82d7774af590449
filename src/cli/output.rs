//! Output formatting for CLI

use crate::pipeline::MatchResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// "Win = 55.0%, Draw = 30.0%, Loss = 15.0%"
pub fn format_rates(result: &MatchResult) -> String {
    format!(
        "Win = {:.1}%, Draw = {:.1}%, Loss = {:.1}%",
        result.win_rate() * 100.0,
        result.draw_rate() * 100.0,
        result.loss_rate() * 100.0
    )
}
