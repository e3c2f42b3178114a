//! Horizontal sub-tab bar used for the metric and window selectors.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// One selectable entry: the hotkey shown before the label, and the label.
pub struct SubTab {
    pub key: char,
    pub label: String,
}

/// Render a tab bar line with the active entry highlighted.
///
/// The active entry is bracketed in Electric Purple; the rest are Dim White
/// with their hotkey in the key-hint style.
pub fn render_sub_tabs(tabs: &[SubTab], active_index: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(tabs.len() * 3);

    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        spans.push(Span::styled(format!("{} ", tab.key), theme::key_hint_key()));

        if i == active_index {
            spans.push(Span::styled(
                format!("[{}]", tab.label),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(tab.label.clone(), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn brackets_only_the_active_tab() {
        let tabs = [
            SubTab { key: 'w', label: "Week".into() },
            SubTab { key: 'm', label: "Month".into() },
        ];
        let line = render_sub_tabs(&tabs, 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "w Week  m [Month]");
    }
}
