use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use tracing::{debug, error, warn};

use crate::error::{LedgerError, Result};
use crate::fmt::label;
use crate::input::validate_entry;
use crate::models::{Category, Transaction};
use crate::store::LedgerStore;
use crate::tui::{self, View, ViewAction, FOCUSED_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

pub const TITLE: &str = "Personal Expense Tracker";

const MSG_NO_SELECTION: &str = "Please select a transaction to delete.";

// ID, Date, Amount, Category; Description takes the rest.
const ID_WIDTH: u16 = 6;
const DATE_WIDTH: u16 = 10;
const AMOUNT_WIDTH: u16 = 12;
const CATEGORY_WIDTH: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Description,
    Amount,
    Category,
    AddButton,
    History,
    DeleteButton,
}

impl Focus {
    const RING: [Focus; 6] = [
        Focus::Description,
        Focus::Amount,
        Focus::Category,
        Focus::AddButton,
        Focus::History,
        Focus::DeleteButton,
    ];

    fn position(self) -> usize {
        Self::RING.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::RING[(self.position() + 1) % Self::RING.len()]
    }

    fn prev(self) -> Self {
        Self::RING[(self.position() + Self::RING.len() - 1) % Self::RING.len()]
    }
}

/// The ledger window: dashboard labels, the entry form, and the history list.
///
/// All widget state lives here and every handler goes through `&mut self`.
/// After each mutation the whole view is rebuilt from the store.
pub struct LedgerWindow<S: LedgerStore> {
    store: S,
    income_label: String,
    expense_label: String,
    balance_label: String,
    description: String,
    amount: String,
    category: usize,
    rows: Vec<Transaction>,
    table_state: TableState,
    focus: Focus,
    error_dialog: Option<String>,
}

impl<S: LedgerStore> LedgerWindow<S> {
    pub fn new(store: S) -> Result<Self> {
        let mut window = Self {
            store,
            income_label: label("Income", 0.0),
            expense_label: label("Expenses", 0.0),
            balance_label: label("Balance", 0.0),
            description: String::new(),
            amount: String::new(),
            category: Category::default().index(),
            rows: Vec::new(),
            table_state: TableState::default(),
            focus: Focus::Description,
            error_dialog: None,
        };
        window.refresh()?;
        Ok(window)
    }

    /// Reload totals and rows from the store, replacing everything shown.
    pub fn refresh(&mut self) -> Result<()> {
        let totals = self.store.totals()?;
        self.income_label = label("Income", totals.income);
        self.expense_label = label("Expenses", totals.expenses);
        self.balance_label = label("Balance", totals.balance);

        self.rows = self.store.list_all()?;
        self.table_state = TableState::default();
        debug!(rows = self.rows.len(), "window refreshed");
        Ok(())
    }

    fn selected_category(&self) -> Category {
        Category::ALL[self.category]
    }

    fn show_error(&mut self, msg: &str) {
        warn!(reason = msg, "input rejected");
        self.error_dialog = Some(msg.to_string());
    }

    /// A store failure aborts the current action only; the window stays up.
    fn action_failed(&mut self, action: &str, err: LedgerError) {
        error!(action, error = %err, "storage failure");
        self.error_dialog = Some(format!("Could not {action} transaction. {err}"));
    }

    fn handle_add(&mut self) {
        let amount = match validate_entry(&self.description, &self.amount) {
            Ok(v) => v,
            Err(msg) => return self.show_error(msg),
        };

        let category = self.selected_category();
        if let Err(e) = self.store.add(&self.description, amount, category.as_str()) {
            return self.action_failed("add", e);
        }
        self.description.clear();
        self.amount.clear();
        if let Err(e) = self.refresh() {
            self.action_failed("reload", e);
        }
    }

    fn handle_delete(&mut self) {
        let Some(id) = self
            .table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|t| t.id)
        else {
            return self.show_error(MSG_NO_SELECTION);
        };
        if let Err(e) = self.store.delete(id) {
            return self.action_failed("delete", e);
        }
        if let Err(e) = self.refresh() {
            self.action_failed("reload", e);
        }
    }

    fn select_row(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(index.min(self.rows.len() - 1)));
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => match self.table_state.selected() {
                Some(i) => self.select_row(i.saturating_sub(1)),
                None => self.select_row(usize::MAX),
            },
            KeyCode::Down => match self.table_state.selected() {
                Some(i) => self.select_row(i + 1),
                None => self.select_row(0),
            },
            KeyCode::Home => self.select_row(0),
            KeyCode::End => self.select_row(usize::MAX),
            KeyCode::Delete | KeyCode::Char('d') => self.handle_delete(),
            _ => {}
        }
    }

    fn handle_text_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let field = match self.focus {
            Focus::Description => &mut self.description,
            Focus::Amount => &mut self.amount,
            _ => return,
        };
        match code {
            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                field.push(c);
            }
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter => self.handle_add(),
            _ => {}
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let [income, expenses, balance] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let bold = Modifier::BOLD;
        for (text, color, slot) in [
            (&self.income_label, Color::Green, income),
            (&self.expense_label, Color::Red, expenses),
            (&self.balance_label, Color::Blue, balance),
        ] {
            frame.render_widget(
                Paragraph::new(text.as_str())
                    .style(Style::default().fg(color).add_modifier(bold))
                    .centered(),
                slot,
            );
        }
    }

    fn field_style(&self, field: Focus) -> (Style, Style) {
        if self.focus == field {
            (Style::default().add_modifier(Modifier::BOLD), FOCUSED_STYLE)
        } else {
            (Style::default(), Style::default())
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        for (field, caption, value) in [
            (Focus::Description, "Description:", &self.description),
            (Focus::Amount, "Amount (use '-' for expense):", &self.amount),
        ] {
            let (label_style, value_style) = self.field_style(field);
            let cursor = if self.focus == field { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!(" {caption:<30} "), label_style),
                Span::styled(format!("{value}{cursor}"), value_style),
            ]));
        }

        let (label_style, value_style) = self.field_style(Focus::Category);
        let arrows = if self.focus == Focus::Category { ("< ", " >") } else { ("  ", "  ") };
        let picker = format!("{}{}{}", arrows.0, self.selected_category(), arrows.1);

        let button_style = if self.focus == Focus::AddButton {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<30} ", "Category:"), label_style),
            Span::styled(format!("{picker:<20}"), value_style),
            Span::styled("[ Add Transaction ]", button_style),
        ]));

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_history(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus == Focus::History {
            FOCUSED_STYLE
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" History ({}) ", self.rows.len()));

        // Borders and highlight symbol take 2 cells each; 4 gaps separate the columns.
        let fixed = ID_WIDTH + DATE_WIDTH + AMOUNT_WIDTH + CATEGORY_WIDTH + 2 + 2 + 4;
        let desc_width = area.width.saturating_sub(fixed).max(8) as usize;

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|t| {
                let (desc, height) = tui::wrap_text(&t.description, desc_width);
                Row::new(vec![
                    Cell::from(t.id.to_string()),
                    Cell::from(t.date.to_string()),
                    Cell::from(desc),
                    Cell::from(tui::amount_span(t.amount)),
                    Cell::from(t.category.clone()),
                ])
                .height(height)
            })
            .collect();

        let widths = [
            Constraint::Length(ID_WIDTH),
            Constraint::Length(DATE_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(AMOUNT_WIDTH),
            Constraint::Length(CATEGORY_WIDTH),
        ];

        let table = Table::new(rows, widths)
            .header(
                Row::new(["ID", "Date", "Description", "Amount", "Category"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .block(block)
            .column_spacing(1)
            .highlight_symbol("> ")
            .row_highlight_style(SELECTED_STYLE);

        frame.render_stateful_widget(table, area, &mut self.table_state);

        if self.rows.is_empty() && area.height > 4 {
            let inner = Rect::new(area.x + 2, area.y + 3, area.width.saturating_sub(4), 1);
            frame.render_widget(
                Paragraph::new("No transactions yet.").style(FOOTER_STYLE),
                inner,
            );
        }
    }

    fn draw_error_dialog(&self, frame: &mut Frame, msg: &str) {
        let area = tui::centered(frame.area(), 48, 7);
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error ");
        let lines = vec![
            Line::from(""),
            Line::from(msg.to_string()),
            Line::from(""),
            Line::from(Span::styled("Enter=OK", FOOTER_STYLE)),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block).centered().wrap(Wrap { trim: true }),
            area,
        );
    }

    fn hints(&self) -> &'static str {
        match self.focus {
            Focus::Description | Focus::Amount => " Tab=next field  Enter=add  Esc=quit",
            Focus::Category => " Left/Right=change category  Enter=add  Tab=next  Esc=quit",
            Focus::AddButton => " Enter=add transaction  Tab=next  Esc=quit",
            Focus::History => " Up/Down=select  d=delete selected  Tab=next  Esc=quit",
            Focus::DeleteButton => " Enter=delete selected  Tab=next  Esc=quit",
        }
    }
}

impl<S: LedgerStore> View for LedgerWindow<S> {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep, dashboard_area, _, form_area, history_area, delete_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(Paragraph::new(format!(" {TITLE}")).style(HEADER_STYLE), header_area);

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        self.draw_dashboard(frame, dashboard_area);
        self.draw_form(frame, form_area);
        self.draw_history(frame, history_area);

        let delete_style = if self.focus == Focus::DeleteButton {
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Span::styled("[ Delete Selected ]", delete_style)).centered(),
            delete_area,
        );

        frame.render_widget(Paragraph::new(self.hints()).style(FOOTER_STYLE), hints_area);

        if let Some(msg) = &self.error_dialog {
            self.draw_error_dialog(frame, msg);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<ViewAction> {
        if self.error_dialog.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.error_dialog = None;
            }
            return Ok(ViewAction::Continue);
        }

        match key.code {
            KeyCode::Esc => return Ok(ViewAction::Close),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            code => match self.focus {
                Focus::Description | Focus::Amount => self.handle_text_key(code, key.modifiers),
                Focus::Category => match code {
                    KeyCode::Left => {
                        self.category = (self.category + Category::ALL.len() - 1) % Category::ALL.len();
                    }
                    KeyCode::Right => {
                        self.category = (self.category + 1) % Category::ALL.len();
                    }
                    KeyCode::Enter => self.handle_add(),
                    _ => {}
                },
                Focus::AddButton => {
                    if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.handle_add();
                    }
                }
                Focus::History => self.handle_history_key(code),
                Focus::DeleteButton => {
                    if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.handle_delete();
                    }
                }
            },
        }
        Ok(ViewAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::input::{MSG_BAD_AMOUNT, MSG_REQUIRED};
    use crate::models::Totals;
    use crate::store::memory::MemoryStore;

    fn window() -> LedgerWindow<MemoryStore> {
        LedgerWindow::new(MemoryStore::default()).unwrap()
    }

    fn press(w: &mut LedgerWindow<MemoryStore>, code: KeyCode) {
        w.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(w: &mut LedgerWindow<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(w, KeyCode::Char(c));
        }
    }

    /// Fill the form from the Description field and press Enter on the Add button.
    fn add_via_form(w: &mut LedgerWindow<MemoryStore>, desc: &str, amount: &str) {
        w.focus = Focus::Description;
        type_text(w, desc);
        press(w, KeyCode::Tab);
        type_text(w, amount);
        press(w, KeyCode::Tab);
        press(w, KeyCode::Tab);
        assert_eq!(w.focus, Focus::AddButton);
        press(w, KeyCode::Enter);
    }

    fn screen_text<S: LedgerStore>(w: &mut LedgerWindow<S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|frame| w.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_initial_state() {
        let w = window();
        assert_eq!(w.income_label, "Income: $0.00");
        assert_eq!(w.expense_label, "Expenses: $0.00");
        assert_eq!(w.balance_label, "Balance: $0.00");
        assert_eq!(w.selected_category(), Category::Food);
        assert!(w.rows.is_empty());
        assert!(w.error_dialog.is_none());
    }

    #[test]
    fn test_salary_and_groceries_dashboard() {
        let mut w = window();
        w.category = Category::Income.index();
        add_via_form(&mut w, "Salary", "2000.00");
        w.category = Category::Food.index();
        add_via_form(&mut w, "Groceries", "-45.50");

        assert!(w.error_dialog.is_none());
        assert_eq!(
            w.store.totals().unwrap(),
            Totals { income: 2000.0, expenses: 45.5, balance: 1954.5 }
        );
        assert_eq!(w.income_label, "Income: $2000.00");
        assert_eq!(w.expense_label, "Expenses: $45.50");
        assert_eq!(w.balance_label, "Balance: $1954.50");

        let screen = screen_text(&mut w);
        assert!(screen.contains("Income: $2000.00"));
        assert!(screen.contains("Expenses: $45.50"));
        assert!(screen.contains("Balance: $1954.50"));
        assert!(screen.contains("Groceries"));
        assert!(screen.contains("Salary"));
    }

    #[test]
    fn test_add_clears_inputs_and_keeps_category() {
        let mut w = window();
        w.focus = Focus::Category;
        press(&mut w, KeyCode::Right);
        assert_eq!(w.selected_category(), Category::Transport);

        add_via_form(&mut w, "Bus pass", "-30");

        assert!(w.description.is_empty());
        assert!(w.amount.is_empty());
        assert_eq!(w.selected_category(), Category::Transport);
        assert_eq!(w.rows.len(), 1);
        assert_eq!(w.rows[0].category, "Transport");
        assert_eq!(w.rows[0].amount, -30.0);
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let mut w = window();
        add_via_form(&mut w, "", "12.00");
        assert_eq!(w.error_dialog.as_deref(), Some(MSG_REQUIRED));
        assert_eq!(w.store.len(), 0);
        assert_eq!(w.store.add_calls, 0);
        // Inputs are left as typed.
        assert_eq!(w.amount, "12.00");
    }

    #[test]
    fn test_empty_amount_is_rejected() {
        let mut w = window();
        add_via_form(&mut w, "Coffee", "");
        assert_eq!(w.error_dialog.as_deref(), Some(MSG_REQUIRED));
        assert_eq!(w.store.len(), 0);
    }

    #[test]
    fn test_unparseable_amount_is_rejected() {
        let mut w = window();
        add_via_form(&mut w, "Coffee", "abc");
        assert_eq!(w.error_dialog.as_deref(), Some(MSG_BAD_AMOUNT));
        assert_eq!(w.store.len(), 0);
        assert!(screen_text(&mut w).contains(MSG_BAD_AMOUNT));
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        let mut w = window();
        add_via_form(&mut w, "Mystery", "NaN");
        assert_eq!(w.error_dialog.as_deref(), Some(MSG_BAD_AMOUNT));
        assert_eq!(w.store.len(), 0);
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let mut w = window();
        add_via_form(&mut w, "Free sample", "0");
        assert!(w.error_dialog.is_none());
        assert_eq!(w.store.len(), 1);
        assert_eq!(w.income_label, "Income: $0.00");
        assert_eq!(w.expense_label, "Expenses: $0.00");
    }

    #[test]
    fn test_amount_with_surrounding_spaces_parses() {
        let mut w = window();
        add_via_form(&mut w, "Refund", " 12.5 ");
        assert!(w.error_dialog.is_none());
        assert_eq!(w.rows[0].amount, 12.5);
    }

    #[test]
    fn test_error_dialog_blocks_until_dismissed() {
        let mut w = window();
        add_via_form(&mut w, "", "");
        assert!(w.error_dialog.is_some());

        // Typing is swallowed while the dialog is open.
        let focus = w.focus;
        press(&mut w, KeyCode::Char('x'));
        press(&mut w, KeyCode::Tab);
        assert_eq!(w.focus, focus);
        assert!(w.error_dialog.is_some());

        press(&mut w, KeyCode::Enter);
        assert!(w.error_dialog.is_none());
    }

    #[test]
    fn test_delete_without_selection_is_rejected() {
        let mut w = window();
        add_via_form(&mut w, "Lunch", "-8");
        w.focus = Focus::DeleteButton;
        press(&mut w, KeyCode::Enter);
        assert_eq!(w.error_dialog.as_deref(), Some(MSG_NO_SELECTION));
        assert_eq!(w.store.len(), 1);
        assert_eq!(w.store.delete_calls, 0);
    }

    #[test]
    fn test_delete_selected_row_removes_only_that_row() {
        let mut store = MemoryStore::default();
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
        let jan = store.insert_dated(d(1), "January", -1.0, "Bills");
        let mar = store.insert_dated(d(3), "March", -3.0, "Bills");
        let feb = store.insert_dated(d(2), "February", -2.0, "Bills");
        let mut w = LedgerWindow::new(store).unwrap();

        let ids: Vec<i64> = w.rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![mar.id, feb.id, jan.id]);

        w.focus = Focus::History;
        press(&mut w, KeyCode::Down);
        press(&mut w, KeyCode::Down);
        assert_eq!(w.table_state.selected(), Some(1));
        press(&mut w, KeyCode::Char('d'));

        let ids: Vec<i64> = w.rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![mar.id, jan.id]);
        assert_eq!(w.expense_label, "Expenses: $4.00");
        // Refresh drops the selection.
        assert_eq!(w.table_state.selected(), None);
    }

    #[test]
    fn test_delete_button_uses_history_selection() {
        let mut w = window();
        add_via_form(&mut w, "Cinema", "-15");
        w.focus = Focus::History;
        press(&mut w, KeyCode::End);
        press(&mut w, KeyCode::Tab);
        assert_eq!(w.focus, Focus::DeleteButton);
        press(&mut w, KeyCode::Enter);
        assert!(w.rows.is_empty());
        assert!(w.error_dialog.is_none());
    }

    #[test]
    fn test_history_selection_stays_in_bounds() {
        let mut w = window();
        add_via_form(&mut w, "One", "1");
        add_via_form(&mut w, "Two", "2");
        w.focus = Focus::History;
        press(&mut w, KeyCode::Up);
        assert_eq!(w.table_state.selected(), Some(1));
        press(&mut w, KeyCode::Down);
        assert_eq!(w.table_state.selected(), Some(1));
        press(&mut w, KeyCode::Home);
        press(&mut w, KeyCode::Up);
        assert_eq!(w.table_state.selected(), Some(0));
    }

    #[test]
    fn test_category_picker_wraps() {
        let mut w = window();
        w.focus = Focus::Category;
        press(&mut w, KeyCode::Left);
        assert_eq!(w.selected_category(), Category::Income);
        press(&mut w, KeyCode::Left);
        assert_eq!(w.selected_category(), Category::Others);
        press(&mut w, KeyCode::Right);
        assert_eq!(w.selected_category(), Category::Income);
    }

    #[test]
    fn test_focus_ring_cycles_both_ways() {
        let mut w = window();
        for _ in 0..Focus::RING.len() {
            press(&mut w, KeyCode::Tab);
        }
        assert_eq!(w.focus, Focus::Description);
        w.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(w.focus, Focus::DeleteButton);
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut w = window();
        w.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)).unwrap();
        w.handle_key(KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(w.description, "T");
        press(&mut w, KeyCode::Backspace);
        assert!(w.description.is_empty());
    }

    #[test]
    fn test_escape_closes() {
        let mut w = window();
        let action = w.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert!(matches!(action, ViewAction::Close));
    }

    /// Holds one row but fails every write.
    struct BrokenStore {
        rows: Vec<Transaction>,
    }

    impl BrokenStore {
        fn new() -> Self {
            let rows = vec![Transaction {
                id: 7,
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                description: "Rent".into(),
                amount: -800.0,
                category: "Bills".into(),
            }];
            Self { rows }
        }
    }

    impl LedgerStore for BrokenStore {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }
        fn add(&mut self, _: &str, _: f64, _: &str) -> Result<Transaction> {
            Err(LedgerError::Io(std::io::Error::other("disk full")))
        }
        fn list_all(&self) -> Result<Vec<Transaction>> {
            Ok(self.rows.clone())
        }
        fn delete(&mut self, _: i64) -> Result<()> {
            Err(LedgerError::Io(std::io::Error::other("read-only file system")))
        }
        fn totals(&self) -> Result<Totals> {
            Ok(Totals::from_sums(0.0, -800.0))
        }
    }

    fn key(w: &mut LedgerWindow<BrokenStore>, code: KeyCode) -> ViewAction {
        w.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_failed_add_keeps_window_open_and_inputs() {
        let mut w = LedgerWindow::new(BrokenStore::new()).unwrap();
        for c in "Gym".chars() {
            key(&mut w, KeyCode::Char(c));
        }
        key(&mut w, KeyCode::Tab);
        key(&mut w, KeyCode::Char('5'));
        let action = key(&mut w, KeyCode::Enter);

        assert!(matches!(action, ViewAction::Continue));
        let msg = w.error_dialog.clone().unwrap();
        assert!(msg.starts_with("Could not add transaction."));
        assert!(msg.contains("disk full"));
        assert_eq!(w.description, "Gym");
        assert_eq!(w.amount, "5");
        assert_eq!(w.rows.len(), 1);
        assert_eq!(w.expense_label, "Expenses: $800.00");

        // The window keeps taking input once the dialog is dismissed.
        key(&mut w, KeyCode::Enter);
        assert!(w.error_dialog.is_none());
        key(&mut w, KeyCode::Char('!'));
        assert_eq!(w.amount, "5!");
    }

    #[test]
    fn test_failed_delete_keeps_row() {
        let mut w = LedgerWindow::new(BrokenStore::new()).unwrap();
        w.focus = Focus::History;
        key(&mut w, KeyCode::Down);
        let action = key(&mut w, KeyCode::Delete);

        assert!(matches!(action, ViewAction::Continue));
        assert!(w.error_dialog.as_deref().unwrap().contains("read-only file system"));
        assert_eq!(w.rows.len(), 1);
        assert_eq!(w.rows[0].id, 7);
        assert!(screen_text(&mut w).contains("Could not delete"));
    }
}
