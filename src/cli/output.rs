//! Output formatting for CLI

use crate::pipeline::EpisodeStats;

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

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the outcome breakdown of a group of episodes
pub fn print_episode_stats(stats: &EpisodeStats) {
    print_kv("Episodes", &format_number(stats.episodes));
    print_kv(
        "Wins",
        &format!("{} ({})", stats.wins, format_percent(stats.win_rate)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", stats.losses, format_percent(stats.loss_rate)),
    );
    print_kv(
        "Timeouts",
        &format!("{} ({})", stats.timeouts, format_percent(stats.timeout_rate)),
    );
    print_kv("Mean score", &format!("{:.2}", stats.mean_score));
    print_kv("Mean length", &format!("{:.1} moves", stats.mean_steps));
}
