// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Séparation état / effets : les méthodes retournent des AppCommand,
//    c'est l'appelant qui les envoie au worker
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::toast::MAX_TOASTS;
use crate::models::{ContactForm, Report, ReportForm, Section, Toast, Totals};
use crate::worker::{AppCommand, AppResult};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Représente les différents écrans de l'application
// - Un seul écran actif à la fois
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Page vitrine du cabinet
    Landing,

    /// Page vitrine avec le formulaire de demande ouvert
    ContactForm,

    /// Registre financier : totaux + tableau des opérations
    Finance,

    /// Registre financier avec le formulaire d'ajout actif
    ReportForm,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit : première pression de 'q' -> true, seconde -> quit
    pub confirm_quit: bool,

    // ---------------------------- Page vitrine ----------------------------
    /// Section visée par la navigation
    pub active_section: Section,

    /// Défilement manuel, en lignes, depuis le début de la section active
    pub scroll_offset: u16,

    /// Borne de scroll_offset pour la section active (dépend de la largeur)
    scroll_limit: u16,

    /// Formulaire de demande de consultation
    pub contact_form: ContactForm,

    // -------------------------- Registre financier ------------------------
    /// Opérations, remplacées en entier à chaque rechargement
    pub reports: Vec<Report>,

    /// Index de la ligne sélectionnée dans le tableau
    pub selected_index: usize,

    /// Chargement initial en cours ("Загрузка...")
    pub is_loading: bool,

    /// Une requête réseau est en cours dans le worker
    busy: bool,

    /// Two-step delete : première pression de 'd' -> true, seconde -> DELETE
    pub confirm_delete: bool,

    /// Formulaire d'ajout d'une opération
    pub report_form: ReportForm,

    /// Notifications affichées, de la plus ancienne à la plus récente
    pub toasts: Vec<Toast>,
}

impl App {
    /// Crée l'application sur la page vitrine
    pub fn new() -> Self {
        Self {
            running: true,
            current_screen: Screen::Landing,
            confirm_quit: false,
            active_section: Section::default(),
            scroll_offset: 0,
            scroll_limit: u16::MAX,
            contact_form: ContactForm::new(),
            reports: Vec::new(),
            selected_index: 0,
            is_loading: false,
            busy: false,
            confirm_delete: false,
            report_form: ReportForm::new(),
            toasts: Vec::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Retire les notifications expirées
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    // ========================================================================
    // Quit / confirmations
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Annule toutes les confirmations en attente
    pub fn cancel_confirmations(&mut self) {
        self.confirm_quit = false;
        self.confirm_delete = false;
    }

    // ========================================================================
    // Navigation entre écrans
    // ========================================================================

    pub fn is_on_landing(&self) -> bool {
        self.current_screen == Screen::Landing
    }

    pub fn is_on_finance(&self) -> bool {
        self.current_screen == Screen::Finance
    }

    /// Un formulaire capture actuellement la saisie clavier
    pub fn is_in_input_mode(&self) -> bool {
        matches!(self.current_screen, Screen::ContactForm | Screen::ReportForm)
    }

    /// Retour à la page vitrine
    pub fn show_landing(&mut self) {
        self.cancel_confirmations();
        self.current_screen = Screen::Landing;
    }

    /// Ouvre le registre financier ("montage" de l'écran)
    ///
    /// CONCEPT : Mount
    /// - L'écran repart d'un état vierge
    /// - Retourne la commande de chargement à envoyer au worker
    pub fn open_finance(&mut self) -> AppCommand {
        self.cancel_confirmations();
        self.current_screen = Screen::Finance;
        self.reports.clear();
        self.selected_index = 0;
        self.is_loading = true;
        info!("Finance screen mounted");
        AppCommand::FetchReports
    }

    // ========================================================================
    // Page vitrine
    // ========================================================================

    /// Défile jusqu'à une section
    pub fn jump_to_section(&mut self, section: Section) {
        debug!(section = section.title(), "Jump to section");
        self.active_section = section;
        self.scroll_offset = 0;
    }

    pub fn next_section(&mut self) {
        self.jump_to_section(self.active_section.next());
    }

    pub fn previous_section(&mut self) {
        self.jump_to_section(self.active_section.previous());
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.scroll_limit);
    }

    /// Fixe la borne du défilement, recalculée à chaque rendu de la page
    pub fn set_scroll_limit(&mut self, limit: u16) {
        self.scroll_limit = limit;
        self.scroll_offset = self.scroll_offset.min(limit);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Bouton "Записаться" : section "Запись" + formulaire ouvert
    pub fn open_contact_form(&mut self) {
        self.cancel_confirmations();
        self.jump_to_section(Section::Booking);
        self.current_screen = Screen::ContactForm;
    }

    /// ESC : ferme le formulaire, garde la saisie
    pub fn close_contact_form(&mut self) {
        self.current_screen = Screen::Landing;
    }

    /// Envoi de la demande : acquittement local uniquement
    ///
    /// Retourne true si la demande a été acceptée
    pub fn submit_contact_form(&mut self) -> bool {
        match self.contact_form.submit() {
            Ok(request) => {
                info!(
                    consultation = ?request.consultation_type,
                    has_phone = request.phone.is_some(),
                    "Consultation request acknowledged"
                );
                self.push_toast(Toast::success(
                    "Заявка отправлена!",
                    "Я свяжусь с вами в ближайшее время",
                ));
                self.contact_form.reset();
                self.current_screen = Screen::Landing;
                true
            }
            Err(e) => {
                debug!(error = %e, "Consultation request rejected");
                self.push_toast(Toast::error(
                    "Проверьте форму",
                    "Укажите имя и корректный email",
                ));
                false
            }
        }
    }

    // ========================================================================
    // Registre financier
    // ========================================================================

    /// Totaux recalculés à partir de la liste courante
    pub fn totals(&self) -> Totals {
        Totals::from_reports(&self.reports)
    }

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.reports.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    pub fn selected_report(&self) -> Option<&Report> {
        self.reports.get(self.selected_index)
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    /// Seconde pression de 'd' : commande de suppression de la ligne courante
    pub fn confirm_delete(&mut self) -> Option<AppCommand> {
        self.confirm_delete = false;
        let id = self.selected_report()?.id;
        info!(report_id = id, "User confirmed delete");
        Some(AppCommand::DeleteReport { id })
    }

    pub fn open_report_form(&mut self) {
        self.cancel_confirmations();
        self.current_screen = Screen::ReportForm;
    }

    /// ESC : quitte le formulaire, garde la saisie
    pub fn close_report_form(&mut self) {
        self.current_screen = Screen::Finance;
    }

    /// Valide le formulaire d'ajout
    ///
    /// - Saisie valide : retourne la commande POST (le formulaire est remis à
    ///   zéro seulement quand le serveur confirme)
    /// - Saisie invalide : notification, aucun appel réseau
    pub fn submit_report_form(&mut self) -> Option<AppCommand> {
        match self.report_form.to_new_report() {
            Ok(report) => {
                self.current_screen = Screen::Finance;
                Some(AppCommand::CreateReport(report))
            }
            Err(e) => {
                debug!(error = %e, "Report form rejected");
                self.push_toast(Toast::error("Ошибка", "Проверьте дату и сумму"));
                None
            }
        }
    }

    // ========================================================================
    // Résultats du worker
    // ========================================================================

    /// Applique un résultat du worker à l'état
    ///
    /// Toutes les erreurs se réduisent à une notification générique
    pub fn apply_result(&mut self, result: AppResult) {
        match result {
            AppResult::ReportsLoaded(reports) => {
                debug!(count = reports.len(), "Replacing report list");
                self.reports = reports;
                self.is_loading = false;
                let max_index = self.reports.len().saturating_sub(1);
                self.selected_index = self.selected_index.min(max_index);
            }
            AppResult::LoadFailed => {
                self.is_loading = false;
                self.push_toast(Toast::error(
                    "Ошибка загрузки",
                    "Не удалось загрузить финансовые отчеты",
                ));
            }
            AppResult::ReportCreated => {
                self.push_toast(Toast::success(
                    "Успешно!",
                    "Запись добавлена в финансовый отчет",
                ));
                self.report_form.reset();
            }
            AppResult::CreateFailed => {
                self.push_toast(Toast::error("Ошибка", "Не удалось добавить запись"));
            }
            AppResult::ReportDeleted { id } => {
                debug!(report_id = id, "Report deleted, waiting for refetch");
                self.push_toast(Toast::success("Удалено", "Запись удалена из отчета"));
            }
            AppResult::DeleteFailed { id } => {
                warn!(report_id = id, "Delete failed");
                self.push_toast(Toast::error("Ошибка", "Не удалось удалить запись"));
            }
        }
    }

    /// Ajoute une notification, en gardant les MAX_TOASTS plus récentes
    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
    }

    // ========================================================================
    // Indicateur réseau (écrit par le worker)
    // ========================================================================

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::toast::TOAST_LIFETIME;
    use crate::models::{OperationType, ReportField};
    use chrono::NaiveDate;
    use std::time::Duration;

    fn report(id: i64, kind: OperationType, amount: f64) -> Report {
        Report {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            operation_type: kind,
            amount,
            description: String::new(),
            category: String::new(),
            created_at: String::new(),
        }
    }

    fn finance_app(reports: Vec<Report>) -> App {
        let mut app = App::new();
        app.open_finance();
        app.apply_result(AppResult::ReportsLoaded(reports));
        app
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.is_on_landing());
        assert!(app.reports.is_empty());
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_open_finance_requests_fetch() {
        let mut app = App::new();
        let command = app.open_finance();
        assert!(matches!(command, AppCommand::FetchReports));
        assert!(app.is_on_finance());
        assert!(app.is_loading);
    }

    #[test]
    fn test_initial_load_failure() {
        let mut app = App::new();
        app.open_finance();
        app.apply_result(AppResult::LoadFailed);

        assert!(app.reports.is_empty());
        assert!(!app.is_loading);
        assert_eq!(app.toasts.len(), 1);
        assert!(app.toasts[0].is_destructive());
        assert_eq!(app.totals().balance_label(), "0.00 ₽");
    }

    #[test]
    fn test_reports_replaced_wholesale() {
        let mut app = finance_app(vec![
            report(1, OperationType::Income, 100.0),
            report(2, OperationType::Expense, 40.0),
            report(3, OperationType::Expense, 5.0),
        ]);
        app.selected_index = 2;

        app.apply_result(AppResult::ReportsLoaded(vec![report(
            1,
            OperationType::Income,
            100.0,
        )]));

        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.totals().income_label(), "100.00 ₽");
    }

    #[test]
    fn test_navigation() {
        let mut app = finance_app(vec![
            report(1, OperationType::Income, 1.0),
            report(2, OperationType::Income, 2.0),
        ]);

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 1);

        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_two_step_delete() {
        let mut app = finance_app(vec![report(7, OperationType::Expense, 40.0)]);

        app.request_delete();
        assert!(app.is_awaiting_delete_confirmation());

        let command = app.confirm_delete();
        assert!(matches!(command, Some(AppCommand::DeleteReport { id: 7 })));
        assert!(!app.is_awaiting_delete_confirmation());
    }

    #[test]
    fn test_delete_on_empty_list() {
        let mut app = finance_app(vec![]);
        app.request_delete();
        assert!(app.confirm_delete().is_none());
    }

    #[test]
    fn test_submit_report_form() {
        let mut app = finance_app(vec![]);
        app.open_report_form();
        app.report_form.focus = ReportField::Amount;
        for c in "25.50".chars() {
            app.report_form.push_char(c);
        }

        match app.submit_report_form() {
            Some(AppCommand::CreateReport(payload)) => assert_eq!(payload.amount, 25.5),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(app.is_on_finance());
        // Le formulaire n'est remis à zéro qu'après confirmation du serveur
        assert_eq!(app.report_form.amount, "25.50");

        app.apply_result(AppResult::ReportCreated);
        assert!(app.report_form.amount.is_empty());
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_invalid_report_form() {
        let mut app = finance_app(vec![]);
        app.open_report_form();

        assert!(app.submit_report_form().is_none());
        assert_eq!(app.current_screen, Screen::ReportForm);
        assert!(app.toasts[0].is_destructive());
    }

    #[test]
    fn test_contact_form_flow() {
        let mut app = App::new();
        app.open_contact_form();
        assert_eq!(app.active_section, Section::Booking);
        assert!(app.is_in_input_mode());

        assert!(!app.submit_contact_form());
        assert_eq!(app.current_screen, Screen::ContactForm);

        app.contact_form.name = "Елена".to_string();
        app.contact_form.email = "elena@example.com".to_string();
        assert!(app.submit_contact_form());
        assert!(app.is_on_landing());
        assert!(app.contact_form.name.is_empty());
        assert_eq!(app.toasts.last().unwrap().title, "Заявка отправлена!");
    }

    #[test]
    fn test_toast_limit_and_expiry() {
        let mut app = App::new();
        for _ in 0..5 {
            app.apply_result(AppResult::CreateFailed);
        }
        assert_eq!(app.toasts.len(), MAX_TOASTS);

        app.tick();
        assert_eq!(app.toasts.len(), MAX_TOASTS);
    }

    #[test]
    fn test_tick_removes_expired_toasts() {
        let mut app = App::new();
        app.push_toast(
            Toast::error("Ошибка", "Не удалось удалить запись")
                .backdated(TOAST_LIFETIME + Duration::from_millis(100)),
        );
        app.push_toast(Toast::success("Удалено", "Запись удалена из отчета"));

        app.tick();
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].title, "Удалено");
    }

    #[test]
    fn test_scroll_limit() {
        let mut app = App::new();
        app.jump_to_section(Section::Contacts);
        app.set_scroll_limit(3);
        for _ in 0..200 {
            app.scroll_down();
        }
        assert_eq!(app.scroll_offset, 3);

        // Un seul scroll_up suffit à remonter d'une ligne
        app.scroll_up();
        assert_eq!(app.scroll_offset, 2);

        // Fenêtre agrandie : la borne diminue, l'offset suit
        app.set_scroll_limit(1);
        assert_eq!(app.scroll_offset, 1);
    }

    #[test]
    fn test_section_scroll() {
        let mut app = App::new();
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.scroll_offset, 2);

        app.next_section();
        assert_eq!(app.active_section, Section::About);
        assert_eq!(app.scroll_offset, 0);

        app.scroll_up();
        assert_eq!(app.scroll_offset, 0);
    }
}
