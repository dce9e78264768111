// ============================================================================
// Module : api
// ============================================================================
// Client HTTP de l'API des rapports financiers (liste, création, suppression)
// ============================================================================

pub mod reports; // Client API des rapports financiers

// Re-export du client principal
pub use reports::{ReportsClient, DEFAULT_API_URL};
