//! Slot row widget for ratatui
//!
//! One line per slot: rarity label, search box, skill choice, level choice
//! and the number of visible choices.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::charms::{SlotChoice, SlotView};

/// Editable fields within a slot row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Search,
    Skill,
    Level,
}

/// Widget for rendering one slot's selectors
pub struct SlotRowWidget<'a> {
    index: usize,
    view: &'a SlotView,
    search: &'a str,
    choice: &'a SlotChoice,
    level: Option<u32>,
    focus: Option<SlotField>,
}

impl<'a> SlotRowWidget<'a> {
    pub fn new(index: usize, view: &'a SlotView, choice: &'a SlotChoice) -> Self {
        Self {
            index,
            view,
            search: "",
            choice,
            level: None,
            focus: None,
        }
    }

    pub fn search(mut self, search: &'a str) -> Self {
        self.search = search;
        self
    }

    pub fn level(mut self, level: Option<u32>) -> Self {
        self.level = level;
        self
    }

    pub fn focus(mut self, focus: Option<SlotField>) -> Self {
        self.focus = focus;
        self
    }

    fn field_style(&self, field: SlotField) -> Style {
        if self.focus == Some(field) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50))
        }
    }

    /// Text shown in the level box
    fn level_text(&self) -> String {
        match self.level {
            Some(level) => level.to_string(),
            None if self.view.levels.is_empty() => "-".to_string(),
            None => "any".to_string(),
        }
    }

    pub fn to_line(&self) -> Line<'static> {
        let skill = match self.choice {
            SlotChoice::Unset => "(any skill)".to_string(),
            other => other.to_string(),
        };
        let level_style = if self.view.levels.is_empty() && self.focus != Some(SlotField::Level) {
            Style::default().fg(Color::DarkGray)
        } else {
            self.field_style(SlotField::Level)
        };

        Line::from(vec![
            Span::styled(
                format!("Slot {}: ", self.index + 1),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("(rarity: {}) ", self.view.rarity_label),
                Style::default().fg(Color::Rgb(110, 110, 110)),
            ),
            Span::styled(format!("[{:<12}]", self.search), self.field_style(SlotField::Search)),
            Span::raw(" "),
            Span::styled(format!("[{:<28}]", skill), self.field_style(SlotField::Skill)),
            Span::raw(" Level: "),
            Span::styled(format!("[{:>3}]", self.level_text()), level_style),
            Span::styled(
                format!(" {} choices", self.view.visible_options.len()),
                Style::default().fg(Color::Gray),
            ),
        ])
    }
}

impl<'a> Widget for SlotRowWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &self.to_line(), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charms::SlotOption;

    fn view(levels: Vec<u32>) -> SlotView {
        SlotView {
            rarity_label: "4 | none".to_string(),
            options: vec![SlotOption::Empty, SlotOption::Named("Guard".into())],
            visible_options: vec![SlotOption::Named("Guard".into())],
            levels,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_text() {
        let view = view(vec![2, 3]);
        let choice = SlotChoice::named("Guard");
        let line = SlotRowWidget::new(0, &view, &choice)
            .search("gu")
            .level(Some(3))
            .to_line();
        let text = text(&line);
        assert!(text.starts_with("Slot 1: (rarity: 4 | none) [gu"));
        assert!(text.contains("[Guard"));
        assert!(text.contains("Level: [  3]"));
        assert!(text.ends_with(" 1 choices"));
    }

    #[test]
    fn test_level_placeholders() {
        let unset = SlotChoice::Unset;
        let without_levels = view(vec![]);
        let line = SlotRowWidget::new(1, &without_levels, &unset).to_line();
        assert!(text(&line).contains("Level: [  -]"));
        assert!(text(&line).contains("(any skill)"));

        let with_levels = view(vec![1]);
        let line = SlotRowWidget::new(1, &with_levels, &unset).to_line();
        assert!(text(&line).contains("Level: [any]"));
    }

    #[test]
    fn test_empty_choice_label() {
        let view = view(vec![]);
        let choice = SlotChoice::Empty;
        let line = SlotRowWidget::new(0, &view, &choice).to_line();
        assert!(text(&line).contains("— none —"));
    }
}
