// ============================================================================
// Structure : Totals
// ============================================================================
// Totaux dérivés de la liste des opérations : revenus, dépenses, solde.
// Recalculés à chaque rendu, jamais mis en cache.
// ============================================================================

use crate::models::report::{format_amount, OperationType, Report};

/// Totaux du registre financier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Somme des revenus
    pub income: f64,

    /// Somme des dépenses
    pub expense: f64,
}

impl Totals {
    /// Calcule les totaux à partir de la liste courante
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - .filter() garde les opérations du type voulu
    /// - .fold(0.0, ..) additionne les montants (sum() d'un itérateur vide
    ///   donne -0.0, affiché "-0.00 ₽")
    /// - Un type inconnu (OperationType::Other) n'entre dans aucun total
    pub fn from_reports(reports: &[Report]) -> Self {
        Self {
            income: sum_of(reports, &OperationType::Income),
            expense: sum_of(reports, &OperationType::Expense),
        }
    }

    /// Solde = revenus - dépenses
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    /// Le signe du solde ne sert qu'à choisir la couleur
    pub fn is_balance_positive(&self) -> bool {
        self.balance() >= 0.0
    }

    pub fn income_label(&self) -> String {
        format_amount(self.income)
    }

    pub fn expense_label(&self) -> String {
        format_amount(self.expense)
    }

    pub fn balance_label(&self) -> String {
        format_amount(self.balance())
    }
}

fn sum_of(reports: &[Report], kind: &OperationType) -> f64 {
    reports
        .iter()
        .filter(|report| &report.operation_type == kind)
        .fold(0.0, |total, report| total + report.amount)
}
