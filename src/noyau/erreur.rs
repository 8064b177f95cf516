// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau (cinq genres, jamais fusionnés).
// - Le prétraitement n’échoue jamais : tout part de l’évaluateur.
// - Aucune reprise ici : l’appelant (UI) choisit le message.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Expression mal formée (lexique, grammaire, arité, usage d’un nom).
    #[error("syntaxe invalide : {0}")]
    Syntaxe(String),

    /// Identifiant hors liste autorisée (rejet AVANT toute évaluation).
    #[error("usage de '{0}' non autorisé")]
    NomInterdit(String),

    #[error("division par zéro")]
    DivisionParZero,

    /// Fonction appelée hors de son domaine (sqrt(-1), asin(2), fact(-1)…).
    #[error("erreur de domaine : {0}")]
    Domaine(String),

    /// Résultat trop grand pour un f64 (fact(171), exp(1000)…).
    #[error("dépassement : {0}")]
    Depassement(String),
}

impl ErreurCalcul {
    /// L’UI réserve un message dédié à la division par zéro.
    pub fn est_division_par_zero(&self) -> bool {
        matches!(self, ErreurCalcul::DivisionParZero)
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalcul::Syntaxe(msg.into())
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalcul::Domaine(msg.into())
    }

    pub(crate) fn depassement(msg: impl Into<String>) -> Self {
        ErreurCalcul::Depassement(msg.into())
    }
}

pub type Resultat<T> = Result<T, ErreurCalcul>;
