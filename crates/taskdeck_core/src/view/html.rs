//! HTML presentation adapter for `BoardView`.
//!
//! # Invariants
//! - Every user-controlled value (text, id) is escaped before output.
//! - Tasks without a deadline render no deadline badge.

use super::board::{BoardView, Partition, PartitionBody, TaskCard};
use std::fmt::Write;

/// Rendered list bodies and counters ready to drop into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlBoard {
    pub active_list: String,
    pub completed_list: String,
    pub active_count: String,
    pub completed_count: String,
}

/// Renders both lists as `<li>` sequences.
pub fn render_html(board: &BoardView) -> HtmlBoard {
    HtmlBoard {
        active_list: render_partition(&board.active),
        completed_list: render_partition(&board.completed),
        active_count: board.active_count().to_string(),
        completed_count: board.completed_count().to_string(),
    }
}

fn render_partition(partition: &Partition) -> String {
    match &partition.body {
        PartitionBody::Empty { message } => {
            format!("<li class=\"empty-state\">{}</li>", escape_html(message))
        }
        PartitionBody::Items { cards } => cards.iter().map(render_card).collect(),
    }
}

fn render_card(card: &TaskCard) -> String {
    let id = escape_html(card.id.as_str());
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<li class=\"task-item\" data-id=\"{id}\">\
         <input type=\"checkbox\" class=\"task-checkbox\"{checked} data-action=\"toggle\" />\
         <div class=\"task-content\">\
         <div class=\"task-text\">{text}</div>\
         <div class=\"task-meta\">\
         <span class=\"task-category {class}\">{label}</span>",
        checked = if card.completed { " checked" } else { "" },
        text = escape_html(&card.text),
        class = card.category_class,
        label = escape_html(card.category_label),
    );

    if card.has_deadline() {
        let overdue = if card.is_overdue { " overdue" } else { "" };
        let _ = write!(
            html,
            "<span class=\"task-deadline{overdue}\">\u{1F4C5} {}</span>",
            escape_html(&card.deadline_display)
        );
    }

    let _ = write!(
        html,
        "</div></div>\
         <div class=\"task-actions\">\
         <button class=\"btn-action btn-edit\" data-action=\"edit\" title=\"Edit\">\u{270F}\u{FE0F}</button>\
         <button class=\"btn-action btn-delete\" data-action=\"delete\" title=\"Delete\">\u{1F5D1}\u{FE0F}</button>\
         </div></li>"
    );
    html
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
