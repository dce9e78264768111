// ============================================================================
// Toast - Notifications en surimpression
// ============================================================================
// Pile de notifications dans le coin supérieur droit, dessinée en dernier
// par-dessus l'écran courant.
//
// CONCEPT RATATUI : Clear
// - Efface la zone avant de dessiner le bloc (sinon l'écran transparaît)
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Toast;

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 4;

/// Zone de la n-ième notification, None si elle ne tient pas à l'écran
pub fn toast_area(screen: Rect, index: usize) -> Option<Rect> {
    let width = TOAST_WIDTH.min(screen.width);
    let offset = u16::try_from(index).ok()?.checked_mul(TOAST_HEIGHT)?;
    let y = screen.y.checked_add(1)?.checked_add(offset)?;

    if y + TOAST_HEIGHT > screen.y + screen.height {
        return None;
    }

    Some(Rect {
        x: screen.x + screen.width - width,
        y,
        width,
        height: TOAST_HEIGHT,
    })
}

/// Dessine les notifications actives, la plus ancienne en haut
pub fn render_toasts(frame: &mut Frame, toasts: &[Toast]) {
    let screen = frame.size();

    for (index, toast) in toasts.iter().enumerate() {
        let Some(area) = toast_area(screen, index) else {
            break;
        };

        let color = if toast.is_destructive() { Color::Red } else { Color::Green };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let lines = vec![
            Line::from(Span::styled(
                toast.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(toast.description.clone()),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_stack_top_right() {
        let screen = Rect::new(0, 0, 120, 40);

        let first = toast_area(screen, 0).unwrap();
        assert_eq!(first.x + first.width, 120);
        assert_eq!(first.y, 1);

        let second = toast_area(screen, 1).unwrap();
        assert_eq!(second.y, first.y + TOAST_HEIGHT);
    }

    #[test]
    fn test_toast_area_small_screen() {
        let screen = Rect::new(0, 0, 30, 6);

        let first = toast_area(screen, 0).unwrap();
        assert_eq!(first.width, 30);
        assert!(toast_area(screen, 1).is_none());
    }
}
