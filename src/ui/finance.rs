// ============================================================================
// Finance - Rendu du registre financier
// ============================================================================
// Dessine les totaux, le tableau des opérations et le formulaire d'ajout
//
// CONCEPTS RATATUI :
// 1. Table + TableState : tableau avec ligne sélectionnée
// 2. Layout : découpage de l'espace en zones (vertical puis horizontal)
// 3. Style : vert pour les revenus, rouge pour les dépenses
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::{Report, ReportField, Totals};
use crate::ui::form::{confirmation_line, field_lines, shortcut, FieldView};

/// Dessine l'écran complet du registre
pub fn render_finance(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Cartes de totaux
            Constraint::Min(0),    // Tableau + formulaire
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    render_header(frame, app, chunks[0]);
    render_totals(frame, &app.totals(), chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    render_reports(frame, app, columns[0]);
    render_report_form(frame, app, columns[1]);
    render_footer(frame, app, chunks[3]);
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Финансовый отчет ")
        .title_alignment(Alignment::Center);

    let mut spans = vec![
        Span::styled("← [b] ", Style::default().fg(Color::Gray)),
        Span::styled(
            "История финансовых операций",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.is_busy() {
        spans.push(Span::styled("  ⟳", Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Cartes : revenus, dépenses, solde
// ============================================================================

fn render_totals(frame: &mut Frame, totals: &Totals, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    render_card(frame, cards[0], "▲ Доходы", totals.income_label(), Color::Green);
    render_card(frame, cards[1], "▼ Расходы", totals.expense_label(), Color::Red);
    render_card(frame, cards[2], "◆ Баланс", totals.balance_label(), balance_color(totals));
}

/// Couleur du solde : vert si positif ou nul, rouge sinon
pub fn balance_color(totals: &Totals) -> Color {
    if totals.is_balance_positive() {
        Color::Green
    } else {
        Color::Red
    }
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tableau des opérations
// ============================================================================

/// Couleur d'une opération : vert pour un revenu, rouge sinon
pub fn operation_color(report: &Report) -> Color {
    if report.operation_type.is_income() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Cellules d'une ligne : date, type, catégorie, description, montant signé
pub fn report_cells(report: &Report) -> [String; 5] {
    let arrow = if report.operation_type.is_income() { "↑" } else { "↓" };
    [
        report.display_date(),
        format!("{} {}", arrow, report.operation_type.label()),
        report.category.clone(),
        report.description.clone(),
        report.signed_amount(),
    ]
}

fn render_reports(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Все операции ");

    // États particuliers : chargement initial, liste vide
    let placeholder = if app.is_loading {
        Some(("Загрузка...", Color::Yellow))
    } else if app.reports.is_empty() {
        Some(("Нет записей. Добавьте первую операцию.", Color::Gray))
    } else {
        None
    };

    if let Some((message, color)) = placeholder {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(color))),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(["Дата", "Тип", "Категория", "Описание", "Сумма"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    // CONCEPT RUST : Iterator chaining
    // - Chaque Report devient une Row de 5 cellules
    // - Le montant est aligné à droite et coloré selon le type
    let rows: Vec<Row> = app
        .reports
        .iter()
        .map(|report| {
            let color = operation_color(report);
            let [date, kind, category, description, amount] = report_cells(report);
            Row::new(vec![
                Cell::from(date),
                Cell::from(kind).style(Style::default().fg(color)),
                Cell::from(category),
                Cell::from(description),
                Cell::from(Line::from(amount).alignment(Alignment::Right))
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Percentage(22),
        Constraint::Min(10),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    // CONCEPT RATATUI : StatefulWidget
    // - Le TableState porte la sélection et le défilement
    // - Il est recréé à chaque frame depuis App::selected_index
    let mut state = TableState::default();
    if app.current_screen == Screen::Finance {
        state.select(Some(app.selected_index));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

// ============================================================================
// Formulaire d'ajout
// ============================================================================

fn render_report_form(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.current_screen == Screen::ReportForm;
    let border_color = if active { Color::Green } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Добавить операцию ");

    let form = &app.report_form;
    let fields: Vec<FieldView> = ReportField::ALL
        .iter()
        .map(|field| FieldView {
            label: field.label(),
            value: form.value(*field),
            placeholder: field.placeholder(),
            focused: form.focus == *field,
            is_choice: *field == ReportField::OperationType,
        })
        .collect();

    let mut lines = vec![
        Line::from(Span::styled(
            "Внесите новую финансовую запись",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(field_lines(&fields, active));
    if !active {
        lines.push(Line::from(vec![
            Span::styled("[a]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" + Добавить"),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Footer : raccourcis
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.current_screen == Screen::ReportForm {
        let mut spans = shortcut("[Tab/↑↓]", "Поле", Color::Yellow);
        spans.extend(shortcut("[Пробел]", "Доход/Расход", Color::Yellow));
        spans.extend(shortcut("[Enter]", "Добавить", Color::Green));
        spans.extend(shortcut("[ESC]", "Отмена", Color::Red));
        Line::from(spans)
    } else if app.is_awaiting_delete_confirmation() {
        let target = app
            .selected_report()
            .map(|report| format!("{} {}", report.display_date(), report.signed_amount()))
            .unwrap_or_else(|| "?".to_string());
        confirmation_line("[d]", format!("чтобы удалить {}, или любую другую клавишу для отмены", target))
    } else if app.is_awaiting_quit_confirmation() {
        confirmation_line("[q]", "чтобы выйти, или любую другую клавишу для отмены".to_string())
    } else {
        let mut spans = shortcut("[q]", "Выход", Color::Yellow);
        spans.extend(shortcut("[↑↓ / j k]", "Навигация", Color::Yellow));
        spans.extend(shortcut("[a]", "Добавить", Color::Green));
        spans.extend(shortcut("[d]", "Удалить", Color::Red));
        spans.extend(shortcut("[b]", "На главную", Color::Cyan));
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationType;
    use chrono::NaiveDate;

    fn report(kind: OperationType, amount: f64) -> Report {
        Report {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            operation_type: kind,
            amount,
            description: "Аренда кабинета".to_string(),
            category: "Кабинет".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_income_row() {
        let income = report(OperationType::Income, 3500.0);
        let cells = report_cells(&income);
        assert_eq!(cells[0], "31.12.2024");
        assert_eq!(cells[1], "↑ Доход");
        assert_eq!(cells[4], "+3500.00 ₽");
        assert_eq!(operation_color(&income), Color::Green);
    }

    #[test]
    fn test_expense_row() {
        let expense = report(OperationType::Expense, 40.0);
        let cells = report_cells(&expense);
        assert_eq!(cells[1], "↓ Расход");
        assert_eq!(cells[4], "-40.00 ₽");
        assert_eq!(operation_color(&expense), Color::Red);
    }

    #[test]
    fn test_balance_color() {
        let positive = Totals { income: 100.0, expense: 40.0 };
        let negative = Totals { income: 10.0, expense: 40.0 };
        assert_eq!(balance_color(&positive), Color::Green);
        assert_eq!(balance_color(&Totals::default()), Color::Green);
        assert_eq!(balance_color(&negative), Color::Red);
    }
}
