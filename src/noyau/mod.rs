//! Noyau de calcul sandboxé
//!
//! Organisation interne :
//! - pretraitement.rs : saisie brute -> texte canonique (×, ÷, ^, π, %)
//! - jetons.rs        : tokenisation + noms libres
//! - analyse.rs       : descente récursive bornée -> Expr
//! - expr.rs          : AST f64
//! - autorises.rs     : liste autorisée (table littérale, construite une fois)
//! - trig.rs          : mode d’angle + surcouche des six trig
//! - espace.rs        : espace d’évaluation frais par appel
//! - fonctions.rs     : fonctions mathématiques avec erreurs de domaine
//! - eval.rs          : pipeline complet
//! - format.rs        : mise en forme du résultat
//! - erreur.rs        : taxonomie des erreurs

pub mod analyse;
pub mod autorises;
pub mod erreur;
pub mod espace;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod pretraitement;
pub mod trig;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::eval_expression;
pub use format::mettre_en_forme;
pub use trig::ModeAngle;
