// ============================================================================
// Formulaire : ajout d'une opération financière
// ============================================================================
// Contient la saisie en cours (texte brut) et la convertit en NewReport
// au moment de l'envoi.
//
// CONCEPTS RUST :
// 1. Enum cyclique : ReportField::next() / previous() (comme un carrousel)
// 2. Result<T> : la conversion peut échouer (date ou montant invalide)
// 3. &mut String : édition du champ qui a le focus
// ============================================================================

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use crate::models::report::{NewReport, OperationType};

/// Champs du formulaire, dans l'ordre de navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Date,
    OperationType,
    Amount,
    Category,
    Description,
}

impl ReportField {
    /// Tous les champs, dans l'ordre d'affichage
    pub const ALL: [ReportField; 5] = [
        ReportField::Date,
        ReportField::OperationType,
        ReportField::Amount,
        ReportField::Category,
        ReportField::Description,
    ];

    /// Champ suivant (Description -> Date)
    pub fn next(&self) -> Self {
        match self {
            ReportField::Date => ReportField::OperationType,
            ReportField::OperationType => ReportField::Amount,
            ReportField::Amount => ReportField::Category,
            ReportField::Category => ReportField::Description,
            ReportField::Description => ReportField::Date,
        }
    }

    /// Champ précédent (Date -> Description)
    pub fn previous(&self) -> Self {
        match self {
            ReportField::Date => ReportField::Description,
            ReportField::OperationType => ReportField::Date,
            ReportField::Amount => ReportField::OperationType,
            ReportField::Category => ReportField::Amount,
            ReportField::Description => ReportField::Category,
        }
    }

    /// Libellé affiché à côté du champ ("*" = obligatoire)
    pub fn label(&self) -> &'static str {
        match self {
            ReportField::Date => "Дата *",
            ReportField::OperationType => "Тип операции *",
            ReportField::Amount => "Сумма *",
            ReportField::Category => "Категория",
            ReportField::Description => "Описание",
        }
    }

    /// Texte grisé quand le champ est vide
    pub fn placeholder(&self) -> &'static str {
        match self {
            ReportField::Date => "ГГГГ-ММ-ДД",
            ReportField::OperationType => "",
            ReportField::Amount => "0.00",
            ReportField::Category => "Услуги, Реклама, и т.д.",
            ReportField::Description => "Дополнительные детали",
        }
    }
}

/// Saisie en cours du formulaire d'ajout
#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    /// Date saisie, "YYYY-MM-DD"
    pub date: String,
    pub operation_type: OperationType,
    /// Montant tel que tapé ("25.50")
    pub amount: String,
    pub category: String,
    pub description: String,
    /// Champ qui reçoit la saisie clavier
    pub focus: ReportField,
}

impl ReportForm {
    /// Formulaire vierge : date du jour (UTC), revenu, champs vides
    pub fn new() -> Self {
        Self {
            date: today(),
            operation_type: OperationType::Income,
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            focus: ReportField::Date,
        }
    }

    /// Remet le formulaire à zéro après un ajout réussi
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Valeur textuelle d'un champ (pour l'affichage)
    pub fn value(&self, field: ReportField) -> &str {
        match field {
            ReportField::Date => &self.date,
            ReportField::OperationType => self.operation_type.label(),
            ReportField::Amount => &self.amount,
            ReportField::Category => &self.category,
            ReportField::Description => &self.description,
        }
    }

    /// CONCEPT RUST : Option<&mut String>
    /// - Le sélecteur de type n'est pas un champ texte -> None
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            ReportField::Date => Some(&mut self.date),
            ReportField::OperationType => None,
            ReportField::Amount => Some(&mut self.amount),
            ReportField::Category => Some(&mut self.category),
            ReportField::Description => Some(&mut self.description),
        }
    }

    /// Ajoute un caractère au champ actif
    ///
    /// Sur le sélecteur de type, n'importe quel caractère bascule la valeur
    pub fn push_char(&mut self, c: char) {
        match self.focused_text() {
            Some(text) => text.push(c),
            None => self.toggle_operation_type(),
        }
    }

    /// Supprime le dernier caractère du champ actif
    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn toggle_operation_type(&mut self) {
        self.operation_type = self.operation_type.toggle();
    }

    /// Convertit la saisie en charge utile pour l'API
    ///
    /// CONCEPT RUST : Validation avec ?
    /// - Chaque étape peut échouer et propage l'erreur avec contexte
    /// - Aucun appel réseau si la saisie est invalide
    pub fn to_new_report(&self) -> Result<NewReport> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .with_context(|| format!("Date invalide : {}", self.date))?;

        let amount = parse_amount(&self.amount)?;

        Ok(NewReport {
            date,
            operation_type: self.operation_type.clone(),
            amount,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
        })
    }
}

impl Default for ReportForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Date du jour au format ISO
fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parse un montant saisi : "25.50" -> 25.5, "25,50" accepté aussi
pub fn parse_amount(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        bail!("Montant obligatoire");
    }

    let amount: f64 = normalized
        .parse()
        .with_context(|| format!("Montant invalide : {}", input))?;

    if !amount.is_finite() || amount < 0.0 {
        bail!("Montant hors limites : {}", input);
    }

    Ok(amount)
}
