//! Output formatting for CLI summaries

use crate::pipeline::{MetricsSummary, TrainingResult};

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

/// Format a fraction as a percentage with one decimal
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print the outcome table of a finished training run
pub fn print_training_result(learner: &str, result: &TrainingResult, metrics: &MetricsSummary) {
    print_section(&format!("Training summary: {learner}"));
    print_stats_table(&[
        ("Episodes", format_number(result.total_episodes)),
        (
            "Wins",
            format!("{} ({})", format_number(result.wins), format_percent(result.win_rate)),
        ),
        (
            "Losses",
            format!(
                "{} ({})",
                format_number(result.losses),
                format_percent(result.loss_rate)
            ),
        ),
        (
            "Draws",
            format!("{} ({})", format_number(result.draws), format_percent(result.draw_rate)),
        ),
        (
            "Cancelled",
            format!(
                "{} ({})",
                format_number(result.cancelled),
                format_percent(result.cancelled_rate)
            ),
        ),
    ]);

    print_subsection("Learning");
    print_stats_table(&[
        ("Recent win rate", format_percent(metrics.recent_win_rate)),
        ("Mean steps", format!("{:.2}", result.mean_steps)),
        ("Mean reward", format!("{:.3}", result.mean_reward)),
        ("Elapsed", format!("{:.2}s", result.elapsed_secs)),
    ]);
}
