// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching : identifier la touche pressée
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Intervalle entre deux ticks quand aucune touche n'est pressée
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (expiration des notifications, rafraîchissement)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend max TICK_RATE
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on ne garde que Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// CONCEPT RUST : Fonction générique sur un prédicat
/// - Évite de répéter le if let Event::Key(...) dans chaque helper
fn key_matches(event: &Event, predicate: impl Fn(&KeyEvent) -> bool) -> bool {
    match event {
        Event::Key(key) => predicate(key),
        Event::Tick => false,
    }
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    key_matches(event, |key| key.code == KeyCode::Esc)
}

pub fn is_enter_event(event: &Event) -> bool {
    key_matches(event, |key| key.code == KeyCode::Enter)
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_matches(event, |key| key.code == KeyCode::Backspace)
}

/// Tab ou flèche bas : champ suivant dans un formulaire
pub fn is_next_field_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Tab | KeyCode::Down))
}

/// Shift+Tab ou flèche haut : champ précédent
pub fn is_previous_field_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::BackTab | KeyCode::Up))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    key_matches(event, |key| {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    })
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    key_matches(event, |key| {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    })
}

/// Flèche droite ou 'l' : section suivante
pub fn is_next_section_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Right | KeyCode::Char('l')))
}

/// Flèche gauche ou 'h' : section précédente
pub fn is_previous_section_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Left | KeyCode::Char('h')))
}

/// 'r' : "Записаться" (ouvre le formulaire de demande)
pub fn is_booking_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')))
}

/// 'f' : ouvrir le registre financier
pub fn is_finance_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('f') | KeyCode::Char('F')))
}

/// 'b' ou Échap : retour à la page vitrine
pub fn is_back_event(event: &Event) -> bool {
    key_matches(event, |key| {
        matches!(key.code, KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B'))
    })
}

/// 'a' : ajouter une opération
pub fn is_add_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('a') | KeyCode::Char('A')))
}

/// 'd' : supprimer l'opération sélectionnée (two-step)
pub fn is_delete_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('d') | KeyCode::Char('D')))
}

/// Caractère imprimable sans Ctrl/Alt (saisie dans un formulaire)
pub fn is_text_char_event(event: &Event) -> bool {
    key_matches(event, |key| {
        matches!(key.code, KeyCode::Char(c) if !c.is_control())
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    })
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match event {
        Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => Some(*c),
        _ => None,
    }
}

/// Extrait un chiffre 1..=9 (saut direct vers une section)
pub fn get_digit_from_event(event: &Event) -> Option<u32> {
    get_char_from_event(event)
        .and_then(|c| c.to_digit(10))
        .filter(|digit| *digit > 0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_text_char_event() {
        assert!(is_text_char_event(&key(KeyCode::Char('ж'))));
        assert!(is_text_char_event(&key(KeyCode::Char(' '))));
        assert!(!is_text_char_event(&key(KeyCode::Enter)));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!is_text_char_event(&ctrl_c));
    }

    #[test]
    fn test_digit_event() {
        assert_eq!(get_digit_from_event(&key(KeyCode::Char('3'))), Some(3));
        assert_eq!(get_digit_from_event(&key(KeyCode::Char('0'))), None);
        assert_eq!(get_digit_from_event(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_field_navigation_keys() {
        assert!(is_next_field_event(&key(KeyCode::Tab)));
        assert!(is_previous_field_event(&key(KeyCode::BackTab)));
        assert!(is_back_event(&key(KeyCode::Esc)));
    }
}
