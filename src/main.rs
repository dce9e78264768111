// ============================================================================
// Harmonia - Cabinet de psychologie dans le terminal
// ============================================================================
// Page vitrine du cabinet + registre financier synchronisé avec l'API
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Worker thread : les appels réseau ne bloquent jamais l'UI
// 4. Arc<Mutex<App>> : état partagé entre l'UI et le worker
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use harmonia::api::ReportsClient;
use harmonia::app::{App, Screen};
use harmonia::config::Config;
use harmonia::models::Section;
use harmonia::ui::events::{
    get_char_from_event, get_digit_from_event, is_add_event, is_back_event, is_backspace_event,
    is_booking_event, is_delete_event, is_down_event, is_enter_event, is_escape_event,
    is_finance_event, is_next_field_event, is_next_section_event, is_previous_field_event,
    is_previous_section_event, is_quit_event, is_text_char_event, is_up_event,
};
use harmonia::ui::{landing, render, Event, EventHandler};
use harmonia::worker::{spawn_background_worker, AppCommand, AppResult};

// ============================================================================
// Ligne de commande
// ============================================================================

/// Cabinet de psychologie : page vitrine et registre financier
#[derive(Debug, Parser)]
#[command(name = "harmonia", version, about = "Психологическая практика и финансовый отчет в терминале")]
struct Cli {
    /// URL de l'API des rapports (prioritaire sur le fichier et l'environnement)
    #[arg(long = "api-url")]
    api_url: Option<String>,

    /// Fichier de configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ouvre directement le registre financier
    #[arg(long)]
    finance: bool,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ./logs/harmonia.log.*
/// RUST_LOG=harmonia=trace harmonia
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "harmonia.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour harmonia, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harmonia=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(log_dir = %log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priorité : défauts < fichier < environnement < ligne de commande
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    // Si le logging échoue, on continue sans
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(api_url = %config.api_url, "Harmonia starting up");

    let client = ReportsClient::new(&config.api_url)?;

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let app = Arc::new(Mutex::new(App::new()));

    // command : UI -> worker, result : worker -> UI
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, client, app.clone());

    if cli.finance {
        let command = lock_app(&app)?.open_finance();
        send_command(&command_tx, command);
    }

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Fermer le channel arrête le worker après sa commande en cours
    drop(command_tx);

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Verrouille l'état partagé
///
/// Un mutex empoisonné signifie que le worker a paniqué en le tenant
fn lock_app(app: &Arc<Mutex<App>>) -> Result<MutexGuard<'_, App>> {
    app.lock()
        .map_err(|_| anyhow!("État de l'application corrompu (mutex empoisonné)"))
}

fn send_command(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) {
    debug!(?command, "Sending command to worker");
    if command_tx.send(command).is_err() {
        error!("Worker thread disconnected, command dropped");
    }
}

// ============================================================================
// Event Loop
// ============================================================================
// PATTERN : Game Loop
// 0. RÉSULTATS : applique les réponses du worker
// 1. RENDER : dessine l'interface
// 2. INPUT : traite les événements
// 3. UPDATE : expire les notifications
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    let mut worker_alive = true;

    loop {
        if !lock_app(app)?.is_running() {
            break;
        }

        // ========================================
        // 0. RÉSULTATS : draine tout ce que le worker a produit
        // ========================================
        loop {
            match result_rx.try_recv() {
                Ok(result) => {
                    debug!(?result, "Applying worker result");
                    lock_app(app)?.apply_result(result);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if worker_alive {
                        error!("Worker thread disconnected!");
                        worker_alive = false;
                    }
                    break;
                }
            }
        }

        // ========================================
        // 1. RENDER
        // ========================================
        {
            let mut app_lock = lock_app(app)?;
            terminal.draw(|frame| render(frame, &app_lock))?;

            // Borne du défilement de la page vitrine pour la taille actuelle
            let limit = landing::scroll_limit(terminal.size()?, &app_lock);
            app_lock.set_scroll_limit(limit);
        }

        // ========================================
        // 2. INPUT
        // ========================================
        match events.next() {
            Ok(event) => {
                let command = {
                    let mut app_lock = lock_app(app)?;
                    handle_event(&mut app_lock, &event)
                };
                if let Some(command) = command {
                    send_command(command_tx, command);
                }
            }
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }

        // ========================================
        // 3. UPDATE
        // ========================================
        lock_app(app)?.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Dispatch par écran
// - Un formulaire ouvert capture toutes les touches (même 'q')
// - Sinon : quit two-step, delete two-step, puis touches de l'écran
// - Le lock est pris par l'appelant : on retourne la commande à envoyer
// ============================================================================

fn handle_event(app: &mut App, event: &Event) -> Option<AppCommand> {
    if let Event::Tick = event {
        return None;
    }

    if app.is_in_input_mode() {
        return handle_form_event(app, event);
    }

    // 'q' : première pression -> confirmation, seconde -> quit
    if is_quit_event(event) {
        app.cancel_delete();
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return None;
    }

    // 'd' : première pression -> confirmation, seconde -> DELETE
    if app.is_on_finance() && is_delete_event(event) {
        app.cancel_quit();
        if app.is_awaiting_delete_confirmation() {
            return app.confirm_delete();
        }
        if app.selected_report().is_some() {
            info!("User requested delete (awaiting confirmation)");
            app.request_delete();
        }
        return None;
    }

    // Toute autre touche annule les confirmations en attente
    app.cancel_confirmations();

    match app.current_screen {
        Screen::Landing => handle_landing_event(app, event),
        Screen::Finance => handle_finance_event(app, event),
        Screen::ContactForm | Screen::ReportForm => None,
    }
}

fn handle_landing_event(app: &mut App, event: &Event) -> Option<AppCommand> {
    if is_next_section_event(event) {
        app.next_section();
    } else if is_previous_section_event(event) {
        app.previous_section();
    } else if let Some(section) = get_digit_from_event(event).and_then(Section::from_digit) {
        app.jump_to_section(section);
    } else if is_down_event(event) {
        app.scroll_down();
    } else if is_up_event(event) {
        app.scroll_up();
    } else if is_booking_event(event) {
        info!("User opened consultation form");
        app.open_contact_form();
    } else if is_finance_event(event) {
        info!("User opened finance screen");
        return Some(app.open_finance());
    }
    None
}

fn handle_finance_event(app: &mut App, event: &Event) -> Option<AppCommand> {
    if is_up_event(event) {
        app.navigate_up();
    } else if is_down_event(event) {
        app.navigate_down();
    } else if is_add_event(event) {
        debug!("User opened report form");
        app.open_report_form();
    } else if is_back_event(event) {
        debug!("User returned to landing");
        app.show_landing();
    }
    None
}

/// Saisie dans le formulaire actif (demande de consultation ou opération)
fn handle_form_event(app: &mut App, event: &Event) -> Option<AppCommand> {
    let on_report_form = app.current_screen == Screen::ReportForm;

    if is_escape_event(event) {
        if on_report_form {
            app.close_report_form();
        } else {
            app.close_contact_form();
        }
        return None;
    }

    if is_enter_event(event) {
        if on_report_form {
            let command = app.submit_report_form();
            if command.is_some() {
                info!("User submitted report form");
            }
            return command;
        }
        if app.submit_contact_form() {
            info!("User submitted consultation request");
        }
        return None;
    }

    if is_next_field_event(event) {
        if on_report_form {
            app.report_form.focus_next();
        } else {
            app.contact_form.focus_next();
        }
    } else if is_previous_field_event(event) {
        if on_report_form {
            app.report_form.focus_previous();
        } else {
            app.contact_form.focus_previous();
        }
    } else if is_backspace_event(event) {
        if on_report_form {
            app.report_form.backspace();
        } else {
            app.contact_form.backspace();
        }
    } else if is_text_char_event(event) {
        if let Some(c) = get_char_from_event(event) {
            if on_report_form {
                app.report_form.push_char(c);
            } else {
                app.contact_form.push_char(c);
            }
        }
    }
    None
}

// ============================================================================
// Setup / Restore du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    // Alternate screen : l'écran précédent est restauré à la sortie
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()))
    }

    #[test]
    fn test_finance_key_mounts_screen() {
        let app = Arc::new(Mutex::new(App::new()));
        let command = {
            let mut app_lock = lock_app(&app).unwrap();
            handle_event(&mut app_lock, &key('f'))
        };

        assert!(matches!(command, Some(AppCommand::FetchReports)));
        let app_lock = lock_app(&app).unwrap();
        assert!(app_lock.is_on_finance());
        assert!(app_lock.is_loading);
    }

    #[test]
    fn test_form_captures_quit_key() {
        let mut app = App::new();
        app.open_contact_form();

        assert!(handle_event(&mut app, &key('q')).is_none());
        assert_eq!(app.contact_form.name, "q");
        assert!(!app.is_awaiting_quit_confirmation());
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();
        handle_event(&mut app, &key('q'));
        assert!(app.is_running());
        handle_event(&mut app, &key('q'));
        assert!(!app.is_running());
    }
}
