//! Main UI Application
//!
//! Owns the selection state for the active rarity tier, turns key presses
//! into selection changes, and renders the latest evaluation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::charms::{Evaluation, Selection, SlotChoice};
use crate::data::{compute_max_slots, Combination, Dataset, RarityTier};

use super::widgets::{SlotField, SlotRowWidget};

/// Shown in the results panel until every used slot has a selection
const NEED_MORE_SELECTIONS: &str =
    "Select every non-empty slot to compute aggregated skill levels.";

/// Which control receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rarity,
    Search,
    Slot(usize, SlotField),
}

/// Open skill picker for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Picker {
    slot: usize,
    cursor: usize,
}

/// Main UI application
pub struct App {
    dataset: Dataset,
    tiers: Vec<RarityTier>,
    /// Index into `tiers`
    tier_index: usize,
    selection: Selection,
    /// Per-slot search boxes; these only narrow the picker, never the filter
    slot_searches: Vec<String>,
    focus: Focus,
    picker: Option<Picker>,
}

impl App {
    /// Create the app on `initial` if the dataset has it, else the lowest tier
    pub fn new(dataset: Dataset, initial: Option<RarityTier>) -> Self {
        let tiers = dataset.tiers();
        let tier_index = initial
            .and_then(|tier| tiers.iter().position(|t| *t == tier))
            .unwrap_or(0);

        if let Some(tier) = initial {
            if tiers.get(tier_index) != Some(&tier) {
                log::warn!("Rarity {} not in dataset, starting with the lowest tier", tier);
            }
        }

        let mut app = Self {
            dataset,
            tiers,
            tier_index,
            selection: Selection::default(),
            slot_searches: Vec::new(),
            focus: Focus::Rarity,
            picker: None,
        };
        app.rebuild_slots();
        app
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn current_tier(&self) -> Option<RarityTier> {
        self.tiers.get(self.tier_index).copied()
    }

    /// Combinations of the active tier
    pub fn combos(&self) -> &[Combination] {
        match self.current_tier() {
            Some(tier) => self.dataset.combos_for_rarity(tier),
            None => &[],
        }
    }

    /// Recompute everything shown on screen
    pub fn evaluation(&self) -> Evaluation<'_> {
        Evaluation::compute(&self.dataset, self.combos(), &self.selection, &self.slot_searches)
    }

    /// Fresh selection rows for the active tier
    fn rebuild_slots(&mut self) {
        let slot_count = compute_max_slots(self.combos());
        self.selection = Selection::new(slot_count);
        self.slot_searches = vec![String::new(); slot_count];
        self.picker = None;
        if matches!(self.focus, Focus::Slot(..)) {
            self.focus = Focus::Rarity;
        }
        if let Some(tier) = self.current_tier() {
            log::info!(
                "Rarity {} selected: {} slots, {} combos",
                tier,
                slot_count,
                self.combos().len()
            );
        }
    }

    /// Switch rarity tier by `step` (wrapping)
    pub fn cycle_tier(&mut self, step: isize) {
        if self.tiers.is_empty() {
            return;
        }
        let len = self.tiers.len() as isize;
        self.tier_index = (self.tier_index as isize + step).rem_euclid(len) as usize;
        self.rebuild_slots();
    }

    /// Clear every filter but stay on the current tier
    pub fn reset_filters(&mut self) {
        self.picker = None;
        if self.selection.is_unconstrained() && self.slot_searches.iter().all(String::is_empty) {
            return;
        }
        self.selection.reset();
        for search in &mut self.slot_searches {
            search.clear();
        }
        log::debug!("Filters reset");
    }

    /// Focus order: rarity, global search, then each slot's fields
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Rarity, Focus::Search];
        for slot in 0..self.selection.slot_count() {
            order.push(Focus::Slot(slot, SlotField::Search));
            order.push(Focus::Slot(slot, SlotField::Skill));
            order.push(Focus::Slot(slot, SlotField::Level));
        }
        order
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => return true,
                KeyCode::Char('r') => self.reset_filters(),
                _ => {}
            }
            return false;
        }

        if self.picker.is_some() {
            self.handle_picker_input(key);
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab => self.move_focus(1),
            KeyCode::BackTab => self.move_focus(-1),
            _ => match self.focus {
                Focus::Rarity => self.handle_rarity_input(key),
                Focus::Search => edit_text(&mut self.selection.search, key),
                Focus::Slot(slot, SlotField::Search) => {
                    if let Some(search) = self.slot_searches.get_mut(slot) {
                        edit_text(search, key);
                    }
                }
                Focus::Slot(slot, SlotField::Skill) => self.handle_skill_input(slot, key),
                Focus::Slot(slot, SlotField::Level) => self.handle_level_input(slot, key),
            },
        }
        false
    }

    fn handle_rarity_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Up => self.cycle_tier(-1),
            KeyCode::Right | KeyCode::Down => self.cycle_tier(1),
            _ => {}
        }
    }

    fn handle_skill_input(&mut self, slot: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.open_picker(slot),
            KeyCode::Backspace | KeyCode::Delete => {
                self.selection.choose_skill(slot, SlotChoice::Unset);
            }
            _ => {}
        }
    }

    fn handle_level_input(&mut self, slot: usize, key: KeyEvent) {
        let step: isize = match key.code {
            KeyCode::Left | KeyCode::Up => -1,
            KeyCode::Right | KeyCode::Down => 1,
            KeyCode::Backspace | KeyCode::Delete => {
                self.selection.choose_level(slot, None);
                return;
            }
            _ => return,
        };

        let levels = match self.evaluation().slots.get(slot) {
            Some(view) => view.levels.clone(),
            None => return,
        };
        if levels.is_empty() {
            return;
        }

        // Cycle through "any" followed by each available level
        let mut choices: Vec<Option<u32>> = vec![None];
        choices.extend(levels.into_iter().map(Some));
        let current = self.selection.level(slot);
        let index = choices.iter().position(|c| *c == current).unwrap_or(0) as isize;
        let next = (index + step).rem_euclid(choices.len() as isize) as usize;
        self.selection.choose_level(slot, choices[next]);
    }

    fn open_picker(&mut self, slot: usize) {
        let eval = self.evaluation();
        let Some(view) = eval.slots.get(slot) else {
            return;
        };
        let current = self.selection.skill(slot);
        let cursor = view
            .visible_options
            .iter()
            .position(|o| SlotChoice::from(o.clone()) == *current)
            .unwrap_or(0);
        self.picker = Some(Picker { slot, cursor });
    }

    fn handle_picker_input(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker else {
            return;
        };
        let options = self
            .evaluation()
            .slots
            .get(picker.slot)
            .map(|v| v.visible_options.clone())
            .unwrap_or_default();

        match key.code {
            KeyCode::Esc => self.picker = None,
            KeyCode::Up | KeyCode::Char('k') => {
                let cursor = picker.cursor.saturating_sub(1);
                self.picker = Some(Picker { cursor, ..picker });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let cursor = (picker.cursor + 1).min(options.len().saturating_sub(1));
                self.picker = Some(Picker { cursor, ..picker });
            }
            KeyCode::Enter => {
                if let Some(option) = options.get(picker.cursor) {
                    log::debug!("Slot {} set to {}", picker.slot + 1, option);
                    self.selection.choose_skill(picker.slot, option.clone().into());
                }
                self.picker = None;
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.selection.choose_skill(picker.slot, SlotChoice::Unset);
                self.picker = None;
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        frame.render_widget(Clear, frame.area());
        let eval = self.evaluation();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(12),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_top_bar(frame, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1]);
        self.render_slots(frame, &eval, middle[0]);
        self.render_matches(frame, &eval, middle[1]);

        self.render_results(frame, &eval, chunks[2]);

        let status = Paragraph::new(eval.status()).style(Style::default().fg(Color::Gray));
        frame.render_widget(status, chunks[3]);

        if let Some(picker) = self.picker {
            self.render_picker(frame, &eval, picker);
        }
    }

    fn render_top_bar(&self, frame: &mut Frame, area: Rect) {
        let highlight = |focus: Focus| {
            if self.focus == focus {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50))
            }
        };
        let tier = self
            .current_tier()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "—".to_string());

        let line = Line::from(vec![
            Span::raw("Rarity: "),
            Span::styled(format!("◄ {:>3} ►", tier), highlight(Focus::Rarity)),
            Span::raw("   Global search: "),
            Span::styled(format!("[{:<24}]", self.selection.search), highlight(Focus::Search)),
            Span::styled(
                "   [Tab] Next  [Enter] Pick  [Ctrl-R] Reset filters  [Esc] Quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Charm Checker ")
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_slots(&self, frame: &mut Frame, eval: &Evaluation<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Selectors ")
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (slot, view) in eval.slots.iter().enumerate() {
            let y = inner.y + (slot as u16) * 2;
            if y >= inner.y + inner.height {
                break;
            }
            let focus = match self.focus {
                Focus::Slot(s, field) if s == slot => Some(field),
                _ => None,
            };
            let row = SlotRowWidget::new(slot, view, self.selection.skill(slot))
                .search(self.slot_searches.get(slot).map(String::as_str).unwrap_or(""))
                .level(self.selection.level(slot))
                .focus(focus);
            frame.render_widget(row, Rect::new(inner.x, y, inner.width, 1));
        }
    }

    fn render_matches(&self, frame: &mut Frame, eval: &Evaluation<'_>, area: Rect) {
        let items: Vec<ListItem> = eval
            .filtered
            .iter()
            .map(|combo| ListItem::new(combo.pattern()))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Matching combinations ")
                .border_style(Style::default().fg(Color::Rgb(100, 100, 120))),
        );
        frame.render_widget(list, area);
    }

    fn render_results(&self, frame: &mut Frame, eval: &Evaluation<'_>, area: Rect) {
        let text = results_text(eval);
        let para = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Aggregated result (when fully selected) ")
                .border_style(Style::default().fg(Color::Rgb(100, 100, 120))),
        );
        frame.render_widget(para, area);
    }

    fn render_picker(&self, frame: &mut Frame, eval: &Evaluation<'_>, picker: Picker) {
        let Some(view) = eval.slots.get(picker.slot) else {
            return;
        };

        let area = centered_rect(40, 60, frame.area());
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = view
            .visible_options
            .iter()
            .map(|o| ListItem::new(o.to_string()))
            .collect();
        let title = format!(" Slot {}: {} choices ", picker.slot + 1, view.visible_options.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_bottom(
                        Line::from(" [↑↓] Select  [Enter] Choose  [Del] Clear  [Esc] Cancel ")
                            .alignment(Alignment::Center),
                    )
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");

        let mut state = ListState::default();
        if !view.visible_options.is_empty() {
            state.select(Some(picker.cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Body of the results panel
pub fn results_text(eval: &Evaluation<'_>) -> String {
    if eval.results.is_empty() {
        return format!("{}\n", NEED_MORE_SELECTIONS);
    }
    let mut text = String::new();
    for (index, result) in eval.results.iter().enumerate() {
        text.push_str(&format!("Result #{}\n{}\n", index + 1, result));
    }
    text
}

/// Apply a key to a text box
fn edit_text(text: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Delete => text.clear(),
        _ => {}
    }
}

/// Create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charms::SlotOption;
    use crate::data::{fixture, SubRarity};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn app() -> App {
        let data = fixture(json!({
            "rarity": {
                "3": [
                    {"combination": [4, null]},
                    {"combination": [5, 6]}
                ],
                "5": [
                    {"combination": [4, 4, 4]}
                ]
            },
            "skills_data": {
                "4": [{"skill_name": "Guard", "skill_level": 2}],
                "5": [{"skill_name": "Attack", "skill_level": 1}],
                "6": [{"skill_name": "Evade", "skill_level": 1}]
            }
        }));
        App::new(data, None)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_input(key(KeyCode::Char(c)));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_starts_on_lowest_tier() {
        let app = app();
        assert_eq!(app.current_tier(), Some(RarityTier(3)));
        assert_eq!(app.selection().slot_count(), 2);
    }

    #[test]
    fn test_initial_tier_and_cycling() {
        let data = app().dataset.clone();
        let mut app = App::new(data, Some(RarityTier(5)));
        assert_eq!(app.current_tier(), Some(RarityTier(5)));
        assert_eq!(app.selection().slot_count(), 3);

        app.handle_input(key(KeyCode::Right));
        assert_eq!(app.current_tier(), Some(RarityTier(3)));
        assert_eq!(app.selection().slot_count(), 2);
    }

    #[test]
    fn test_unknown_initial_tier_falls_back() {
        let data = app().dataset.clone();
        let app = App::new(data, Some(RarityTier(99)));
        assert_eq!(app.current_tier(), Some(RarityTier(3)));
    }

    #[test]
    fn test_pick_skill_through_picker() {
        let mut app = app();
        // Rarity -> Search -> Slot 1 search -> Slot 1 skill
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Tab));
        }
        assert_eq!(app.focus(), Focus::Slot(0, SlotField::Skill));

        app.handle_input(key(KeyCode::Enter));
        app.handle_input(key(KeyCode::Down));
        app.handle_input(key(KeyCode::Enter));
        assert_eq!(app.selection().skill(0), &SlotChoice::named("Guard"));

        let eval = app.evaluation();
        assert_eq!(eval.filtered.len(), 1);
        assert_eq!(eval.filtered[0].slot(0), Some(SubRarity(4)));
        assert!(eval.ready);
    }

    #[test]
    fn test_slot_search_narrows_picker() {
        let mut app = app();
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Tab));
        // slot 2 search box
        assert_eq!(app.focus(), Focus::Slot(1, SlotField::Search));
        type_text(&mut app, "no");
        app.handle_input(key(KeyCode::Tab));
        app.handle_input(key(KeyCode::Enter));
        app.handle_input(key(KeyCode::Enter));
        assert_eq!(app.selection().skill(1), &SlotChoice::Empty);
        assert_eq!(app.evaluation().filtered.len(), 1);
    }

    #[test]
    fn test_global_search_and_reset() {
        let mut app = app();
        app.handle_input(key(KeyCode::Tab));
        type_text(&mut app, "evade");
        assert_eq!(app.selection().search, "evade");
        assert_eq!(app.evaluation().filtered.len(), 1);

        app.handle_input(key(KeyCode::Backspace));
        assert_eq!(app.selection().search, "evad");

        app.handle_input(ctrl('r'));
        assert!(app.selection().is_unconstrained());
        assert_eq!(app.evaluation().filtered.len(), 2);
    }

    #[test]
    fn test_reset_clears_slot_search_only_state() {
        let mut app = app();
        app.slot_searches[1].push_str("no");
        assert!(app.selection().is_unconstrained());

        app.handle_input(ctrl('r'));
        assert!(app.slot_searches.iter().all(String::is_empty));
        assert_eq!(app.evaluation().slots[1].visible_options.len(), 2);
    }

    #[test]
    fn test_level_cycles_through_available() {
        let mut app = app();
        app.selection.choose_skill(0, SlotChoice::named("Guard"));
        app.focus = Focus::Slot(0, SlotField::Level);

        app.handle_input(key(KeyCode::Right));
        assert_eq!(app.selection().level(0), Some(2));
        app.handle_input(key(KeyCode::Right));
        assert_eq!(app.selection().level(0), None);
        app.handle_input(key(KeyCode::Left));
        assert_eq!(app.selection().level(0), Some(2));
        app.handle_input(key(KeyCode::Delete));
        assert_eq!(app.selection().level(0), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_input(ctrl('q')));
        assert!(app.handle_input(key(KeyCode::Esc)));

        // Esc only closes an open picker
        app.focus = Focus::Slot(0, SlotField::Skill);
        app.handle_input(key(KeyCode::Enter));
        assert!(!app.handle_input(key(KeyCode::Esc)));
        assert!(app.picker.is_none());
    }

    #[test]
    fn test_render_shows_prompt_then_results() {
        let mut app = app();
        let text = screen(&app);
        assert!(text.contains("2 combos match current filters"));
        assert!(text.contains(NEED_MORE_SELECTIONS));
        assert!(text.contains("[5, 6]"));

        app.selection.choose_skill(0, SlotOption::Named("Guard".into()).into());
        let text = screen(&app);
        assert!(text.contains("1 combos match current filters"));
        assert!(text.contains("Result #1"));
        assert!(text.contains("Guard: level 2"));
    }

    #[test]
    fn test_results_text() {
        let mut app = app();
        app.selection.choose_skill(0, SlotChoice::named("Attack"));
        app.selection.choose_skill(1, SlotChoice::named("Evade"));
        let eval = app.evaluation();
        assert_eq!(
            results_text(&eval),
            "Result #1\n  Pattern: [5, 6]\n  Attack: level 1\n  Evade: level 1\n\n"
        );
    }

    #[test]
    fn test_empty_dataset() {
        let mut app = App::new(Dataset::default(), None);
        assert_eq!(app.current_tier(), None);
        assert!(app.combos().is_empty());
        app.handle_input(key(KeyCode::Right));
        let text = screen(&app);
        assert!(text.contains("0 combos match current filters"));
    }
}
