//! Display formatting for reaction times and leaderboard rows

/// Result line, three decimals: `220.000 ms`
pub fn format_reaction(ms: f64) -> String {
    format!("{:.3} ms", ms)
}

/// Leaderboard cell, one truncated decimal: `220.5 MS`
pub fn format_leaderboard_time(ms: f64) -> String {
    let whole = ms.floor();
    let tenth = ((ms - whole) * 10.0).floor() as u32;
    format!("{}.{} MS", whole as i64, tenth)
}

/// Podium marker for a zero-based rank
pub fn rank_marker(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("{}.", n + 1),
    }
}
