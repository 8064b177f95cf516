// src/noyau/espace.rs
//
// Espace d’évaluation (un par appel, jeté ensuite)
// ------------------------------------------------
// = liste autorisée (lecture seule)
// + surcouche des six trig selon le mode d’angle
// + builtins minimaux (abs, round)
//
// Rien d’autre n’est résolvable : pas de portée ambiante.

use super::autorises::{builtin, liste_autorisee, Entree, ListeAutorisee};
use super::trig::{ModeAngle, TrigFn};

#[derive(Clone, Copy)]
pub enum Liaison {
    Entree(Entree),
    Trig(TrigFn, ModeAngle),
}

impl Liaison {
    pub fn est_fonction(&self) -> bool {
        match self {
            Liaison::Entree(e) => e.est_fonction(),
            Liaison::Trig(..) => true,
        }
    }
}

pub struct EspaceEvaluation {
    liste: &'static ListeAutorisee,
    mode: ModeAngle,
}

impl EspaceEvaluation {
    pub fn nouveau(mode: ModeAngle) -> Self {
        Self {
            liste: liste_autorisee(),
            mode,
        }
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    /// Ordre de résolution : surcouche trig, table, builtins.
    pub fn resoudre(&self, nom: &str) -> Option<Liaison> {
        if let Some(f) = TrigFn::depuis_nom(nom) {
            return Some(Liaison::Trig(f, self.mode));
        }
        self.liste
            .get(nom)
            .or_else(|| builtin(nom))
            .map(Liaison::Entree)
    }

    pub fn autorise(&self, nom: &str) -> bool {
        self.resoudre(nom).is_some()
    }
}
