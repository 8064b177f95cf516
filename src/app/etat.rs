//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, erreur, mode d’angle, historique)
//! et offrir des opérations simples (C/DEL/historique) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Historique : plus récent en tête, non borné, vit le temps de la session.

use crate::noyau::ModeAngle;

/// Une ligne d’historique : saisie brute + résultat déjà mis en forme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

impl EntreeHistorique {
    /// Libellé affiché dans le panneau (`expr = résultat`).
    pub fn libelle(&self) -> String {
        format!("{} = {}", self.expression, self.resultat)
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub erreur: String, // message d’erreur (si l’évaluation échoue)
    pub info: String,   // message neutre (ex: aucune sélection)

    // --- paramètres ---
    pub mode: ModeAngle,

    // --- historique ---
    pub historique: Vec<EntreeHistorique>,
    pub selection: Option<usize>,

    // --- fenêtres ---
    pub confirmer_effacement: bool,
    pub a_propos: bool,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
    // Titre de fenêtre à resynchroniser (changement de mode).
    pub titre_a_jour: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            erreur: String::new(),
            info: String::new(),
            mode: ModeAngle::default(),
            historique: Vec::new(),
            selection: None,
            confirmer_effacement: false,
            a_propos: false,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            titre_a_jour: false,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C : effacer l’entrée et les messages.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.info.clear();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère.
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        self.focus_entree = true;
    }

    /// Ajoute un fragment en fin d’entrée (chiffre, opérateur, `sin(`…).
    pub fn inserer(&mut self, fragment: &str) {
        self.entree.push_str(fragment);
        self.focus_entree = true;
    }

    pub fn set_mode(&mut self, mode: ModeAngle) {
        if self.mode != mode {
            self.mode = mode;
            self.titre_a_jour = false;
        }
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur (l’entrée est conservée pour correction).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.info.clear();
        self.focus_entree = true;
    }

    /// Succès : l’entrée devient le résultat, la paire part en tête d’historique.
    pub fn set_resultat(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        let resultat = resultat.into();
        self.erreur.clear();
        self.info.clear();

        self.historique.insert(
            0,
            EntreeHistorique {
                expression: expression.into(),
                resultat: resultat.clone(),
            },
        );
        // les indices ont glissé d’un cran
        self.selection = self.selection.map(|i| i + 1);

        self.entree = resultat;
        self.focus_entree = true;
    }

    /* ------------------------ Historique ------------------------ */

    /// Remet l’expression d’une ligne d’historique dans l’entrée.
    pub fn reutiliser(&mut self, index: usize) {
        if let Some(h) = self.historique.get(index) {
            self.entree = h.expression.clone();
            self.selection = Some(index);
            self.erreur.clear();
            self.info.clear();
            self.focus_entree = true;
        }
    }

    /// “Utiliser la sélection” : sans sélection, simple message d’information.
    pub fn utiliser_selection(&mut self) {
        match self.selection {
            Some(i) if i < self.historique.len() => self.reutiliser(i),
            _ => self.info = "Aucune entrée d’historique sélectionnée.".to_string(),
        }
    }

    /// Première étape : ouvrir la confirmation (rien n’est effacé ici).
    pub fn demander_effacement(&mut self) {
        if !self.historique.is_empty() {
            self.confirmer_effacement = true;
        }
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
        self.selection = None;
        self.confirmer_effacement = false;
        self.focus_entree = true;
    }

    pub fn annuler_effacement(&mut self) {
        self.confirmer_effacement = false;
        self.focus_entree = true;
    }
}
