// ============================================================================
// Worker : synchronisation de la liste des opérations
// ============================================================================
// Exécute les appels réseau hors du thread UI.
//
// Règles de synchronisation :
// - FetchReports : un GET, la liste locale est remplacée en entier
// - CreateReport : un POST puis, si succès, un GET de rafraîchissement
// - DeleteReport : un DELETE puis, si succès, un GET de rafraîchissement
// - Une mutation en échec ne rafraîchit pas la liste
// - Pas de dédoublonnage ni d'annulation des requêtes en vol
//
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des AppCommand au worker
// - Le worker exécute les tâches async et renvoie des AppResult
// - Communication via mpsc channels (multi-producer, single-consumer)
// ============================================================================

use std::sync::{mpsc, Arc, Mutex};

use tracing::{error, info, warn};

use crate::api::ReportsClient;
use crate::app::App;
use crate::models::{NewReport, Report};

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Recharger la liste complète
    FetchReports,

    /// Créer une opération puis recharger
    CreateReport(NewReport),

    /// Supprimer une opération puis recharger
    DeleteReport { id: i64 },
}

/// Résultats renvoyés par le worker thread
///
/// Les erreurs ne transportent pas de détail : l'utilisateur ne voit qu'une
/// notification générique, le détail part dans les logs.
#[derive(Debug, Clone, PartialEq)]
pub enum AppResult {
    /// Liste rechargée avec succès
    ReportsLoaded(Vec<Report>),

    /// Échec du chargement (réseau, statut HTTP, JSON)
    LoadFailed,

    /// Opération créée
    ReportCreated,

    /// Échec de la création
    CreateFailed,

    /// Opération supprimée
    ReportDeleted { id: i64 },

    /// Échec de la suppression
    DeleteFailed { id: i64 },
}

/// Exécute une commande et retourne les résultats dans l'ordre
///
/// CONCEPT RUST : async fn réutilisable
/// - Le worker thread l'appelle via block_on()
/// - Les tests l'appellent directement avec #[tokio::test]
pub async fn execute(client: &ReportsClient, command: AppCommand) -> Vec<AppResult> {
    match command {
        AppCommand::FetchReports => vec![fetch(client).await],

        AppCommand::CreateReport(report) => match client.create_report(&report).await {
            Ok(()) => vec![AppResult::ReportCreated, fetch(client).await],
            Err(e) => {
                error!(error = ?e, "Failed to create report");
                vec![AppResult::CreateFailed]
            }
        },

        AppCommand::DeleteReport { id } => match client.delete_report(id).await {
            Ok(()) => vec![AppResult::ReportDeleted { id }, fetch(client).await],
            Err(e) => {
                error!(report_id = id, error = ?e, "Failed to delete report");
                vec![AppResult::DeleteFailed { id }]
            }
        },
    }
}

async fn fetch(client: &ReportsClient) -> AppResult {
    match client.fetch_reports().await {
        Ok(reports) => AppResult::ReportsLoaded(reports),
        Err(e) => {
            error!(error = ?e, "Failed to load reports");
            AppResult::LoadFailed
        }
    }
}

// ============================================================================
// Background Worker Thread
// ============================================================================

/// Worker thread qui exécute les commandes en arrière-plan
///
/// CONCEPT RUST : Thread + async runtime
/// - std::thread::spawn() : crée un thread OS
/// - tokio::runtime::Runtime : runtime async dans ce thread
/// - mpsc channels : communication inter-thread
///
/// # Arguments
/// * `command_rx` - Receiver pour recevoir les commandes
/// * `result_tx` - Sender pour envoyer les résultats
/// * `client` - Client HTTP (déplacé dans le thread)
/// * `app` - État partagé, pour l'indicateur de chargement
pub fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    client: ReportsClient,
    app: Arc<Mutex<App>>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        // CONCEPT : Runtime per-thread
        // - current_thread suffit : une commande à la fois
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker exiting");
                return;
            }
        };

        // Boucle de traitement : se termine quand l'UI ferme le channel
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            set_busy(&app, true);
            let results = runtime.block_on(execute(&client, command));
            set_busy(&app, false);

            for result in results {
                if result_tx.send(result).is_err() {
                    warn!("UI disconnected, dropping worker result");
                    return;
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    })
}

/// Active / désactive l'indicateur réseau
///
/// CONCEPT : Lock scope minimisé
/// - Le lock n'est jamais gardé pendant un appel réseau
fn set_busy(app: &Arc<Mutex<App>>, busy: bool) {
    match app.lock() {
        Ok(mut app_lock) => app_lock.set_busy(busy),
        Err(_) => warn!("App state poisoned, skipping busy flag"),
    }
}
