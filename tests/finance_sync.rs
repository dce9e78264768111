// ============================================================================
// Tests d'intégration : synchronisation du registre financier
// ============================================================================
// On rejoue le parcours de l'UI sans terminal :
// App produit une commande -> worker::execute -> App::apply_result
// Le serveur est simulé avec wiremock.
// ============================================================================

use harmonia::api::ReportsClient;
use harmonia::app::App;
use harmonia::worker::{execute, AppCommand};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Exécute une commande et applique tous ses résultats, comme la boucle d'événements
async fn dispatch(app: &mut App, client: &ReportsClient, command: AppCommand) {
    for result in execute(client, command).await {
        app.apply_result(result);
    }
}

fn report(id: i64, kind: &str, amount: f64) -> serde_json::Value {
    json!({
        "id": id,
        "date": "2024-01-15",
        "operation_type": kind,
        "amount": amount,
        "description": "Сессия",
        "category": "Консультации",
        "created_at": "2024-01-15T10:00:00"
    })
}

#[test_log::test(tokio::test)]
async fn missing_reports_key_shows_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReportsClient::new(&server.uri()).unwrap();
    let mut app = App::new();
    let command = app.open_finance();
    dispatch(&mut app, &client, command).await;

    assert!(app.reports.is_empty());
    assert!(!app.is_loading);
    assert!(app.toasts.is_empty());

    let totals = app.totals();
    assert_eq!(totals.income_label(), "0.00 ₽");
    assert_eq!(totals.expense_label(), "0.00 ₽");
    assert_eq!(totals.balance_label(), "0.00 ₽");
}

#[test_log::test(tokio::test)]
async fn totals_follow_loaded_reports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report(1, "income", 100.0), report(2, "expense", 40.0)]
        })))
        .mount(&server)
        .await;

    let client = ReportsClient::new(&server.uri()).unwrap();
    let mut app = App::new();
    let command = app.open_finance();
    dispatch(&mut app, &client, command).await;

    assert_eq!(app.reports.len(), 2);
    let totals = app.totals();
    assert_eq!(totals.income_label(), "100.00 ₽");
    assert_eq!(totals.expense_label(), "40.00 ₽");
    assert_eq!(totals.balance_label(), "60.00 ₽");
    assert!(totals.is_balance_positive());
}

#[test_log::test(tokio::test)]
async fn form_amount_is_posted_as_number() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "amount": 25.5, "operation_type": "income" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report(7, "income", 25.5)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReportsClient::new(&server.uri()).unwrap();
    let mut app = App::new();
    app.open_report_form();
    app.report_form.amount = "25.50".to_string();
    app.report_form.category = "Консультации".to_string();

    let command = app.submit_report_form().expect("valid form must produce a command");
    dispatch(&mut app, &client, command).await;

    assert_eq!(app.reports.len(), 1);
    assert_eq!(app.toasts.len(), 1);
    assert_eq!(app.toasts[0].title, "Успешно!");
    // Formulaire remis à zéro après confirmation du serveur
    assert!(app.report_form.amount.is_empty());
}

#[test_log::test(tokio::test)]
async fn invalid_form_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.open_report_form();
    app.report_form.amount = "abc".to_string();

    assert!(app.submit_report_form().is_none());
    assert_eq!(app.toasts.len(), 1);
    assert!(app.toasts[0].is_destructive());
    assert_eq!(app.report_form.amount, "abc");
}

#[test_log::test(tokio::test)]
async fn delete_sends_one_request_then_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report(42, "expense", 40.0)]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let client = ReportsClient::new(&server.uri()).unwrap();
    let mut app = App::new();
    let command = app.open_finance();
    dispatch(&mut app, &client, command).await;
    assert_eq!(app.reports.len(), 1);

    Mock::given(method("DELETE"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reports": [] })))
        .expect(1)
        .mount(&server)
        .await;

    // Two-step : la première pression arme la confirmation
    app.request_delete();
    let command = app.confirm_delete().expect("a row is selected");
    dispatch(&mut app, &client, command).await;

    assert!(app.reports.is_empty());
    assert_eq!(app.toasts.len(), 1);
    assert_eq!(app.toasts[0].title, "Удалено");
}

#[test_log::test(tokio::test)]
async fn unreachable_server_leaves_single_error_toast() {
    // Rien n'écoute sur ce port
    let client = ReportsClient::new("http://127.0.0.1:9").unwrap();
    let mut app = App::new();
    let command = app.open_finance();
    dispatch(&mut app, &client, command).await;

    assert!(app.reports.is_empty());
    assert!(!app.is_loading);
    assert_eq!(app.toasts.len(), 1);
    assert_eq!(app.toasts[0].title, "Ошибка загрузки");
    assert!(app.toasts[0].is_destructive());
}
