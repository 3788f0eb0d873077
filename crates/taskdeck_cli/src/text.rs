//! Plain-text board rendering for terminals.

use taskdeck_core::{BoardView, Partition, PartitionBody, TaskCard};

pub fn render_text(board: &BoardView) -> String {
    let mut out = String::new();
    push_partition(&mut out, "Active", &board.active);
    push_partition(&mut out, "Completed", &board.completed);
    out
}

fn push_partition(out: &mut String, title: &str, partition: &Partition) {
    out.push_str(&format!("{title} ({})\n", partition.count));
    match &partition.body {
        PartitionBody::Empty { message } => out.push_str(&format!("  {message}\n")),
        PartitionBody::Items { cards } => {
            for card in cards {
                out.push_str(&render_line(card));
                out.push('\n');
            }
        }
    }
}

fn render_line(card: &TaskCard) -> String {
    let mark = if card.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "  {mark} {}  {}  ({})",
        card.text, card.category_label, card.id
    );
    if card.has_deadline() {
        line.push_str(&format!("  \u{1F4C5} {}", card.deadline_display));
        if card.is_overdue {
            line.push_str(" OVERDUE");
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use chrono::NaiveDateTime;
    use taskdeck_core::{render_board, Category, Deadline, Task};

    #[test]
    fn renders_counts_placeholders_and_overdue_flag() {
        let now = NaiveDateTime::parse_from_str("2025-02-01T00:00", "%Y-%m-%dT%H:%M").unwrap();
        let task = Task::new(
            "Finish homework",
            Category::Assignment,
            Deadline::parse("2025-01-01T10:00").unwrap(),
        );
        let text = render_text(&render_board(&[task], now));

        assert!(text.starts_with("Active (1)\n"));
        assert!(text.contains("[ ] Finish homework"));
        assert!(text.contains("Jan 1, 10:00 AM OVERDUE"));
        assert!(text.contains("Completed (0)\n  No completed tasks yet.\n"));
    }
}
