// ============================================================================
// API Client : rapports financiers
// ============================================================================
// Lit, crée et supprime les opérations sur l'API distante (une seule URL).
//
// Contrat HTTP :
// - GET    <url>          -> {"reports": [...]}  ("reports" absent = liste vide)
// - POST   <url>          -> corps JSON {date, operation_type, amount, description, category}
// - DELETE <url>?id=<id>
//
// Le succès d'un POST ou d'un DELETE se juge uniquement au statut HTTP.
// Pas d'authentification, pas de pagination, pas de retry, pas de timeout.
//
// CONCEPTS RUST AVANCÉS :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Result<T, E> : gestion d'erreurs avec contexte
// 3. Serde : désérialisation JSON automatique
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{NewReport, Report};

/// URL de l'API utilisée quand la configuration n'en fournit pas
pub const DEFAULT_API_URL: &str =
    "https://functions.poehali.dev/465d2879-c05d-493f-8cbe-c3195b5bfeb3";

// ============================================================================
// Structures pour parser la réponse JSON
// ============================================================================

/// Réponse du GET
///
/// CONCEPT RUST : #[serde(default)]
/// - Champ absent -> Default::default() (ici un Vec vide)
/// - Option<Vec<_>> couvre en plus le cas "reports": null
#[derive(Debug, Deserialize)]
struct ReportsResponse {
    #[serde(default)]
    reports: Option<Vec<serde_json::Value>>,
}

// ============================================================================
// Client
// ============================================================================

/// Client HTTP pour l'API des rapports financiers
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne (pool de connexions partagé)
/// - Cloner le client ne duplique pas les connexions
#[derive(Debug, Clone)]
pub struct ReportsClient {
    http: reqwest::Client,
    url: String,
}

impl ReportsClient {
    /// Crée un client pour l'URL donnée
    pub fn new(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("harmonia/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// Récupère la liste complète des opérations
    ///
    /// CONCEPT RUST : #[instrument]
    /// - Ajoute un span tracing avec l'URL
    /// - Tous les logs à l'intérieur héritent de ce contexte
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_reports(&self) -> Result<Vec<Report>> {
        debug!("Sending GET request");
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Échec de la requête HTTP vers l'API des rapports")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "Reports API returned error status");
            anyhow::bail!("L'API des rapports a retourné une erreur : HTTP {}", status);
        }

        let body: ReportsResponse = response
            .json()
            .await
            .context("Échec du parsing JSON de la liste des rapports")?;

        // Une ligne illisible ne doit pas faire perdre toutes les autres
        let reports: Vec<Report> = body
            .reports
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| match Report::deserialize(&raw) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, record = %raw, "Skipping malformed report");
                    None
                }
            })
            .collect();

        info!(count = reports.len(), "Reports fetched");
        Ok(reports)
    }

    /// Crée une opération
    ///
    /// Le corps de la réponse est ignoré : seul le statut compte
    #[instrument(skip(self, report), fields(url = %self.url, amount = report.amount))]
    pub async fn create_report(&self, report: &NewReport) -> Result<()> {
        debug!(?report, "Sending POST request");
        let response = self
            .http
            .post(&self.url)
            .json(report)
            .send()
            .await
            .context("Échec de la requête de création")?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Report creation rejected");
            anyhow::bail!("Création refusée par l'API : HTTP {}", status);
        }

        info!(status = %status, "Report created");
        Ok(())
    }

    /// Supprime une opération par son identifiant
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn delete_report(&self, id: i64) -> Result<()> {
        debug!("Sending DELETE request");
        let response = self
            .http
            .delete(&self.url)
            .query(&[("id", id)])
            .send()
            .await
            .context("Échec de la requête de suppression")?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Report deletion rejected");
            anyhow::bail!("Suppression refusée par l'API : HTTP {}", status);
        }

        info!(status = %status, "Report deleted");
        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// CONCEPT : faux serveur HTTP (wiremock)
// - Démarre un vrai serveur local sur un port libre
// - Chaque Mock décrit une requête attendue et la réponse à renvoyer
// - .expect(n) vérifie le nombre d'appels quand le serveur est détruit
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationType;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_get(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_reports() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            json!({
                "reports": [
                    {
                        "id": 2,
                        "date": "2024-01-16",
                        "operation_type": "expense",
                        "amount": 40.0,
                        "description": "Аренда",
                        "category": "Кабинет",
                        "created_at": "2024-01-16T09:00:00"
                    },
                    {
                        "id": 1,
                        "date": "2024-01-15",
                        "operation_type": "income",
                        "amount": 100.0,
                        "description": "",
                        "category": "",
                        "created_at": "2024-01-15T09:00:00"
                    }
                ]
            }),
        )
        .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        let reports = client.fetch_reports().await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, 2);
        assert_eq!(reports[0].operation_type, OperationType::Expense);
        assert_eq!(reports[1].amount, 100.0);
    }

    #[tokio::test]
    async fn test_missing_reports_field_is_empty() {
        let server = MockServer::start().await;
        mock_get(&server, json!({})).await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        assert!(client.fetch_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_reports_field_is_empty() {
        let server = MockServer::start().await;
        mock_get(&server, json!({ "reports": null })).await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        assert!(client.fetch_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let server = MockServer::start().await;
        mock_get(
            &server,
            json!({
                "reports": [
                    { "id": 1, "date": "2024-01-15", "operation_type": "income", "amount": 100.0 },
                    { "id": 2, "date": "2024-01-16T00:00:00", "operation_type": "expense", "amount": 40.0 },
                    { "id": 3, "date": null, "operation_type": "expense", "amount": null }
                ]
            }),
        )
        .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        let reports = client.fetch_reports().await.unwrap();

        let ids: Vec<i64> = reports.iter().map(|report| report.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Database connection not configured"
            })))
            .mount(&server)
            .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        assert!(client.fetch_reports().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        assert!(client.fetch_reports().await.is_err());
    }

    #[tokio::test]
    async fn test_create_report_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "date": "2024-01-15",
                "operation_type": "income",
                "amount": 25.5,
                "description": "Сессия",
                "category": "Услуги"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "report": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        let payload = NewReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            operation_type: OperationType::Income,
            amount: 25.5,
            description: "Сессия".to_string(),
            category: "Услуги".to_string(),
        };

        client.create_report(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_report_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        let payload = NewReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            operation_type: OperationType::Expense,
            amount: 1.0,
            description: String::new(),
            category: String::new(),
        };

        assert!(client.create_report(&payload).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_report_uses_id_query() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(query_param("id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReportsClient::new(&server.uri()).unwrap();
        client.delete_report(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 9 (discard) : rien n'écoute en local
        let client = ReportsClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.fetch_reports().await.is_err());
    }
}
