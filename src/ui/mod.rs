// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;  // Gestion des événements clavier
pub mod finance; // Registre financier : totaux, tableau, formulaire
pub mod form;    // Rendu commun des formulaires
pub mod landing; // Page vitrine du cabinet
pub mod toast;   // Notifications en surimpression

use ratatui::Frame;

use crate::app::{App, Screen};

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};

/// Point d'entrée du rendu : choisit l'écran, puis les notifications par-dessus
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Landing | Screen::ContactForm => landing::render_landing(frame, app),
        Screen::Finance | Screen::ReportForm => finance::render_finance(frame, app),
    }

    toast::render_toasts(frame, &app.toasts);
}
