// ============================================================================
// Rendu commun des formulaires
// ============================================================================
// Les deux formulaires (demande de consultation, ajout d'opération) partagent
// le même rendu : un libellé, puis la valeur ou le placeholder grisé.
// ============================================================================

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Description d'un champ à afficher
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    /// Le champ reçoit la saisie clavier
    pub focused: bool,
    /// Sélecteur (bascule) plutôt que champ texte
    pub is_choice: bool,
}

/// Construit les lignes d'un formulaire
///
/// CONCEPT RUST : Lifetime 'a
/// - Les Spans empruntent les chaînes du formulaire (pas de copie)
/// - Les lignes ne peuvent pas survivre au formulaire
pub fn field_lines<'a>(fields: &[FieldView<'a>], active: bool) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(fields.len() * 3);

    for field in fields {
        let focused = active && field.focused;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));

        let marker = if focused { "▶ " } else { "  " };
        let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Cyan))];

        if field.is_choice {
            spans.push(Span::styled(
                format!("◀ {} ▶", field.value),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        } else if field.value.is_empty() {
            spans.push(Span::styled(
                field.placeholder,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(field.value, Style::default().fg(Color::White)));
        }

        if focused && !field.is_choice {
            spans.push(Span::styled(
                "█",
                Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines
}

/// Raccourci clavier coloré suivi de son libellé : "[a] Добавить  "
pub fn shortcut<'a>(key: &'a str, label: &'a str, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {}  ", label)),
    ]
}

/// Ligne d'avertissement "appuyez à nouveau" (quit / delete)
pub fn confirmation_line(key: &'static str, message: String) -> Line<'static> {
    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("⚠  Нажмите ", warning),
        Span::styled(
            key,
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::styled(format!(" ещё раз, {} ⚠", message), warning),
    ])
}
