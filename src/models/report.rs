// ============================================================================
// Structure : Report
// ============================================================================
// Représente une opération financière (revenu ou dépense) telle que renvoyée
// par l'API distante. L'application ne possède pas ces données : elle les
// affiche telles quelles, sans valider leur cohérence.
//
// CONCEPTS RUST :
// 1. #[serde(default)] : champ absent ou null dans le JSON -> valeur par défaut
// 2. #[serde(from / into)] : conversion personnalisée via String
// 3. Enums avec données : Other(String) garde la valeur inconnue
// ============================================================================

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Symbole monétaire utilisé pour tous les montants (roubles)
pub const CURRENCY: &str = "₽";

/// Type d'opération : revenu ou dépense
///
/// CONCEPT RUST : Conversion via String
/// - #[serde(from = "String")] : désérialise d'abord une String, puis From
/// - #[serde(into = "String")] : sérialise via Into<String> (nécessite Clone)
/// - Aucune valeur ne fait échouer le parsing : on fait confiance à l'API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationType {
    /// Revenu ("income")
    #[default]
    Income,
    /// Dépense ("expense")
    Expense,
    /// Valeur inconnue renvoyée par l'API, conservée telle quelle
    Other(String),
}

impl OperationType {
    /// Valeur utilisée sur le fil (JSON)
    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Income => "income",
            OperationType::Expense => "expense",
            OperationType::Other(raw) => raw,
        }
    }

    /// Libellé affiché dans le tableau et le formulaire
    pub fn label(&self) -> &str {
        if self.is_income() {
            "Доход"
        } else {
            "Расход"
        }
    }

    /// Tout ce qui n'est pas un revenu s'affiche comme une dépense
    pub fn is_income(&self) -> bool {
        *self == OperationType::Income
    }

    /// Bascule revenu <-> dépense (sélecteur du formulaire)
    pub fn toggle(&self) -> Self {
        match self {
            OperationType::Income => OperationType::Expense,
            _ => OperationType::Income,
        }
    }
}

impl From<String> for OperationType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "income" => OperationType::Income,
            "expense" => OperationType::Expense,
            _ => OperationType::Other(raw),
        }
    }
}

impl From<OperationType> for String {
    fn from(kind: OperationType) -> Self {
        kind.as_str().to_string()
    }
}

/// Une opération financière enregistrée côté serveur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Identifiant attribué par le serveur
    pub id: i64,

    /// Date de l'opération ("2024-01-15", ou horodatage ISO complet)
    #[serde(deserialize_with = "date_or_timestamp")]
    pub date: NaiveDate,

    /// Revenu ou dépense
    pub operation_type: OperationType,

    /// Montant (toujours positif, le signe vient du type)
    #[serde(deserialize_with = "number_or_string")]
    pub amount: f64,

    /// Description libre (null côté API -> chaîne vide)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Catégorie libre (null côté API -> chaîne vide)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,

    /// Horodatage de création, gardé tel que reçu
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

/// CONCEPT RUST : deserialize_with
/// - #[serde(default)] couvre le champ absent, pas le champ à null
/// - On passe par Option<String> pour accepter les deux
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepte "2024-01-16" comme "2024-01-16T00:00:00" (isoformat() côté serveur)
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_api_date(&raw).ok_or_else(|| de::Error::custom(format!("date invalide : {}", raw)))
}

/// Date de l'API : les 10 premiers caractères au format YYYY-MM-DD
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
}

/// CONCEPT RUST : #[serde(untagged)]
/// - Essaie chaque variante dans l'ordre
/// - Un NUMERIC Postgres peut arriver en nombre ou en chaîne ("100.00")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(amount) => Ok(amount),
        RawAmount::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("montant invalide : {}", text))),
    }
}

impl Report {
    /// Date au format russe : "15.01.2024"
    pub fn display_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    /// Montant signé : "+100.00 ₽" pour un revenu, "-40.00 ₽" sinon
    pub fn signed_amount(&self) -> String {
        let sign = if self.operation_type.is_income() { '+' } else { '-' };
        format!("{}{}", sign, format_amount(self.amount))
    }
}

/// Charge utile envoyée en POST pour créer une opération
///
/// CONCEPT : séparation lecture / écriture
/// - Report contient les champs attribués par le serveur (id, created_at)
/// - NewReport ne contient que ce que le client envoie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub date: NaiveDate,
    pub operation_type: OperationType,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

/// Formate un montant avec deux décimales et le symbole rouble
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} {}", amount, CURRENCY)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserialization() {
        let json = r#"{
            "id": 7,
            "date": "2024-03-05",
            "operation_type": "income",
            "amount": 3500.0,
            "description": "Консультация",
            "category": "Услуги",
            "created_at": "2024-03-05T10:15:00.123456"
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, 7);
        assert_eq!(report.operation_type, OperationType::Income);
        assert_eq!(report.display_date(), "05.03.2024");
        assert_eq!(report.signed_amount(), "+3500.00 ₽");
    }

    #[test]
    fn test_null_optional_fields() {
        let json = r#"{
            "id": 1,
            "date": "2024-01-15",
            "operation_type": "expense",
            "amount": 40,
            "description": null
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.description, "");
        assert_eq!(report.category, "");
        assert_eq!(report.signed_amount(), "-40.00 ₽");
    }

    #[test]
    fn test_timestamp_date_and_text_amount() {
        let json = r#"{
            "id": 3,
            "date": "2024-01-16T00:00:00",
            "operation_type": "income",
            "amount": "1500.50"
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.display_date(), "16.01.2024");
        assert_eq!(report.amount, 1500.5);
    }

    #[test]
    fn test_parse_api_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_api_date("2024-02-29"), expected);
        assert_eq!(parse_api_date("2024-02-29T12:30:00.5"), expected);
        assert_eq!(parse_api_date("29.02.2024"), None);
        assert_eq!(parse_api_date(""), None);
    }

    #[test]
    fn test_default_operation_type() {
        assert_eq!(OperationType::default(), OperationType::Income);
    }

    #[test]
    fn test_unknown_operation_type_is_kept() {
        let kind: OperationType = serde_json::from_str(r#""refund""#).unwrap();
        assert_eq!(kind, OperationType::Other("refund".to_string()));
        assert!(!kind.is_income());
        assert_eq!(kind.label(), "Расход");
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""refund""#);
    }

    #[test]
    fn test_new_report_serialization() {
        let payload = NewReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            operation_type: OperationType::Expense,
            amount: 25.5,
            description: String::new(),
            category: "Реклама".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["operation_type"], "expense");
        assert_eq!(value["amount"], 25.5);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(OperationType::Income.toggle(), OperationType::Expense);
        assert_eq!(OperationType::Expense.toggle(), OperationType::Income);
    }
}
