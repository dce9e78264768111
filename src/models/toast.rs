// ============================================================================
// Structure : Toast
// ============================================================================
// Notification éphémère affichée en surimpression (coin haut-droit).
// Disparaît d'elle-même après TOAST_LIFETIME.
// ============================================================================

use std::time::{Duration, Instant};

/// Durée d'affichage d'une notification
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Nombre maximum de notifications affichées en même temps
pub const MAX_TOASTS: usize = 3;

/// Style de la notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    /// Information / succès
    Default,
    /// Erreur (affichée en rouge)
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    created_at: Instant,
}

impl Toast {
    pub fn new(title: &str, description: &str, variant: ToastVariant) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant,
            created_at: Instant::now(),
        }
    }

    pub fn success(title: &str, description: &str) -> Self {
        Self::new(title, description, ToastVariant::Default)
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self::new(title, description, ToastVariant::Destructive)
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }

    /// Vieillit artificiellement la notification
    #[cfg(test)]
    pub(crate) fn backdated(mut self, age: Duration) -> Self {
        self.created_at = Instant::now()
            .checked_sub(age)
            .expect("monotonic clock earlier than test age");
        self
    }

    /// CONCEPT RUST : Instant
    /// - Horloge monotone, insensible aux changements d'heure système
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_LIFETIME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration() {
        let toast = Toast::success("Удалено", "Запись удалена из отчета");
        assert!(!toast.is_expired(Instant::now()));
        assert!(toast.is_expired(Instant::now() + TOAST_LIFETIME));
        assert!(!toast.is_destructive());
    }
}
