// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod contact;     // Demande de consultation (page vitrine)
pub mod landing;     // Contenu statique de la page vitrine
pub mod report;      // Opération financière renvoyée par l'API
pub mod report_form; // Formulaire d'ajout d'une opération
pub mod summary;     // Totaux revenus / dépenses / solde
pub mod toast;       // Notifications éphémères

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use harmonia::models::report::Report;
// On peut faire : use harmonia::models::Report;
pub use contact::{ConsultationType, ContactField, ContactForm, ContactRequest};
pub use landing::Section;
pub use report::{NewReport, OperationType, Report};
pub use report_form::{ReportField, ReportForm};
pub use summary::Totals;
pub use toast::{Toast, ToastVariant};
