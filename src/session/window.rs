use super::types::Turn;

/// Number of recent turns rendered into a prompt by default.
pub const DEFAULT_HISTORY_WINDOW: usize = 8;

/// Render the last `k` turns as `"<Speaker>: <text>"` lines, oldest first.
pub fn render_history(turns: &[Turn], k: usize) -> String {
    let start = turns.len().saturating_sub(k);
    turns[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role.speaker_label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}
