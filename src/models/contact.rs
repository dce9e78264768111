// ============================================================================
// Formulaire : demande de consultation (page vitrine)
// ============================================================================
// Aucune requête réseau : l'envoi est seulement acquitté localement par une
// notification. La validation reprend les champs obligatoires du formulaire.
// ============================================================================

use anyhow::{bail, Result};

/// Format de consultation choisi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsultationType {
    /// En ligne : Zoom, Skype, WhatsApp
    #[default]
    Online,
    /// En présentiel à Moscou
    Offline,
}

impl ConsultationType {
    pub fn toggle(&self) -> Self {
        match self {
            ConsultationType::Online => ConsultationType::Offline,
            ConsultationType::Offline => ConsultationType::Online,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsultationType::Online => "Онлайн (3 500 ₽)",
            ConsultationType::Offline => "Очно в Москве (5 000 ₽)",
        }
    }

    pub fn details(&self) -> &'static str {
        match self {
            ConsultationType::Online => "Zoom, Skype, WhatsApp",
            ConsultationType::Offline => "м. Тверская, центр города",
        }
    }
}

/// Champs du formulaire, dans l'ordre de navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Phone,
    ConsultationType,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::ConsultationType,
        ContactField::Message,
    ];

    pub fn next(&self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Phone,
            ContactField::Phone => ContactField::ConsultationType,
            ContactField::ConsultationType => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ContactField::Name => ContactField::Message,
            ContactField::Email => ContactField::Name,
            ContactField::Phone => ContactField::Email,
            ContactField::ConsultationType => ContactField::Phone,
            ContactField::Message => ContactField::ConsultationType,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Имя *",
            ContactField::Email => "Email *",
            ContactField::Phone => "Телефон",
            ContactField::ConsultationType => "Формат консультации *",
            ContactField::Message => "Расскажите о запросе",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ContactField::Name => "Как к вам обращаться?",
            ContactField::Email => "your@email.com",
            ContactField::Phone => "+7 (___) ___-__-__",
            ContactField::ConsultationType => "",
            ContactField::Message => "Опишите, с чем вы хотели бы поработать (необязательно)",
        }
    }
}

/// Demande validée, prête à être acquittée
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub consultation_type: ConsultationType,
    pub message: Option<String>,
}

/// Saisie en cours du formulaire de demande
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub consultation_type: ConsultationType,
    pub message: String,
    pub focus: ContactField,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::ConsultationType => self.consultation_type.label(),
            ContactField::Message => &self.message,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            ContactField::Name => Some(&mut self.name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            ContactField::ConsultationType => None,
            ContactField::Message => Some(&mut self.message),
        }
    }

    /// Sur le choix du format, n'importe quel caractère bascule la valeur
    pub fn push_char(&mut self, c: char) {
        match self.focused_text() {
            Some(text) => text.push(c),
            None => self.consultation_type = self.consultation_type.toggle(),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Vérifie les champs obligatoires et construit la demande
    pub fn submit(&self) -> Result<ContactRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            bail!("Nom obligatoire");
        }

        let email = self.email.trim();
        if !looks_like_email(email) {
            bail!("Adresse e-mail invalide : {}", email);
        }

        Ok(ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: non_empty(&self.phone),
            consultation_type: self.consultation_type,
            message: non_empty(&self.message),
        })
    }
}

/// Même règle qu'un <input type="email"> : quelque chose@quelque chose
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
