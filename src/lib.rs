// ============================================================================
// Harmonia - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Client HTTP de l'API des rapports financiers
pub mod app;       // État de l'application
pub mod config;    // Configuration (fichier, environnement)
pub mod models;    // Structures de données
pub mod ui;        // Interface utilisateur
pub mod worker;    // Synchronisation réseau en arrière-plan
