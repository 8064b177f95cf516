// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), Escape efface (app.rs)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique à droite, plus récent en tête
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + “Enter” virtuel mobile selon navigateur)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::autorises::{liste_autorisee, BUILTINS};
use crate::noyau::{self, ErreurCalcul, ModeAngle};

/// Pavé : 7 lignes x 5 colonnes.
const GRILLE: [[(&str, Touche); 5]; 7] = [
    [
        ("7", Touche::Texte("7")),
        ("8", Touche::Texte("8")),
        ("9", Touche::Texte("9")),
        ("C", Touche::Effacer),
        ("DEL", Touche::Suppr),
    ],
    [
        ("4", Touche::Texte("4")),
        ("5", Touche::Texte("5")),
        ("6", Touche::Texte("6")),
        ("×", Touche::Texte("×")),
        ("^", Touche::Texte("^")),
    ],
    [
        ("1", Touche::Texte("1")),
        ("2", Touche::Texte("2")),
        ("3", Touche::Texte("3")),
        ("-", Touche::Texte("-")),
        ("(", Touche::Texte("(")),
    ],
    [
        (".", Touche::Texte(".")),
        ("0", Touche::Texte("0")),
        ("=", Touche::Egal),
        ("+", Touche::Texte("+")),
        (")", Touche::Texte(")")),
    ],
    [
        ("sin", Touche::Fonction("sin")),
        ("cos", Touche::Fonction("cos")),
        ("tan", Touche::Fonction("tan")),
        ("÷", Touche::Texte("÷")),
        ("sqrt", Touche::Fonction("sqrt")),
    ],
    [
        ("asin", Touche::Fonction("asin")),
        ("acos", Touche::Fonction("acos")),
        ("atan", Touche::Fonction("atan")),
        ("%", Touche::Texte("%")),
        ("gamma", Touche::Fonction("gamma")),
    ],
    [
        ("pi", Touche::Texte("pi")),
        ("e", Touche::Texte("e")),
        ("fact", Touche::Fonction("fact")),
        ("log", Touche::Fonction("log")),
        ("ln", Touche::Fonction("ln")),
    ],
];

const A_PROPOS: &str = "Calculatrice scientifique\n\n\
Opérations : + - × ÷ ^ %, parenthèses\n\
Fonctions : sin cos tan asin acos atan sqrt log ln fact gamma…\n\
Constantes : pi (π), e\n\
Mode d’angle : radians ou degrés\n\n\
Clavier : Entrée évalue, Échap efface.\n\
Seuls les noms de la liste autorisée sont évalués.";

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(format!("Calculatrice ({})", self.mode));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("À propos").clicked() {
                            self.a_propos = true;
                        }
                    });
                });
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                self.ui_mode(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2^10, sin(90), 10%200, sqrt(2)")
                .id_salt("entree_edit")
                .font(egui::TextStyle::Monospace),
        );

        // Si on a cliqué un bouton (pavé / historique / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement depuis le champ) ---
        // Un singleline rend le focus sur Enter : on accepte aussi lost_focus.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp.lost_focus()) {
            self.evaluer_entree();
        }

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        } else if !self.info.is_empty() {
            ui.add_space(6.0);
            ui.label(&self.info);
        }
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        let mut mode = self.mode;
        ui.horizontal(|ui| {
            ui.label("Mode d’angle :");
            ui.radio_value(&mut mode, ModeAngle::Radians, "Rad");
            ui.radio_value(&mut mode, ModeAngle::Degres, "Deg");
        });
        if mode != self.mode {
            self.set_mode(mode);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in GRILLE.iter() {
                    for (label, touche) in ligne.iter() {
                        self.bouton(ui, label, *touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, touche: Touche) {
        let resp = ui.add_sized([58.0, 34.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match touche {
            Touche::Texte(t) => self.inserer(t),
            Touche::Fonction(nom) => self.inserer(&format!("{nom}(")),
            Touche::Effacer => self.clear_entree(),
            Touche::Suppr => self.backspace_entree(),
            Touche::Egal => self.evaluer_entree(),
        }
        self.focus_entree = true;
    }

    /// Panneau d’historique (plus récent en tête).
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.heading("Historique");
        ui.add_space(4.0);

        let mut clic = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - 40.0).max(80.0))
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("(vide)");
                }
                for (i, h) in self.historique.iter().enumerate() {
                    let choisi = self.selection == Some(i);
                    let resp = ui.selectable_label(choisi, h.libelle());
                    if resp.clicked() || resp.double_clicked() {
                        clic = Some(i);
                    }
                }
            });

        // clic = sélection + reprise de l’expression
        if let Some(i) = clic {
            self.reutiliser(i);
        }

        ui.horizontal(|ui| {
            if ui.button("Effacer l’historique").clicked() {
                self.demander_effacement();
            }
            if ui.button("Utiliser la sélection").clicked() {
                self.utiliser_selection();
            }
        });
    }

    /// Fenêtres flottantes : confirmation d’effacement + à propos.
    pub fn ui_fenetres(&mut self, ctx: &egui::Context) {
        if self.confirmer_effacement {
            let mut oui = false;
            let mut non = false;
            egui::Window::new("Effacer l’historique")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Effacer tout l’historique ?");
                    ui.horizontal(|ui| {
                        oui = ui.button("Oui").clicked();
                        non = ui.button("Non").clicked();
                    });
                });
            if oui {
                self.effacer_historique();
            } else if non {
                self.annuler_effacement();
            }
        }

        egui::Window::new("À propos")
            .open(&mut self.a_propos)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(A_PROPOS);
                ui.add_space(6.0);
                ui.label(format!("Noms autorisés : {}", noms_autorises()));
            });
    }

    /// Évalue la saisie via le noyau : succès => résultat + historique, sinon message.
    fn evaluer_entree(&mut self) {
        let expression = self.entree.trim().to_string();
        if expression.is_empty() {
            self.focus_entree = true;
            return;
        }

        match noyau::eval_expression(&expression, self.mode) {
            Ok(v) => self.set_resultat(expression, noyau::mettre_en_forme(v)),
            Err(e) => self.set_erreur(message_erreur(&e)),
        }
    }
}

/// Table + builtins, dans l’ordre alphabétique de la table.
fn noms_autorises() -> String {
    liste_autorisee()
        .noms()
        .chain(BUILTINS.iter().map(|(nom, _)| *nom))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Message utilisateur : la division par zéro a son propre texte.
pub fn message_erreur(e: &ErreurCalcul) -> String {
    if e.est_division_par_zero() {
        "Division par zéro interdite.".to_string()
    } else {
        format!("Expression invalide : {e}")
    }
}

#[derive(Clone, Copy, Debug)]
enum Touche {
    Texte(&'static str),
    Fonction(&'static str),
    Effacer,
    Suppr,
    Egal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_utilisateur() {
        assert_eq!(
            message_erreur(&ErreurCalcul::DivisionParZero),
            "Division par zéro interdite."
        );
        assert!(message_erreur(&ErreurCalcul::NomInterdit("os".into()))
            .starts_with("Expression invalide : "));
    }

    #[test]
    fn a_propos_liste_les_noms() {
        let noms = noms_autorises();
        for n in ["sin", "gamma", "pi", "abs", "round"] {
            assert!(noms.split(' ').any(|x| x == n), "{n} absent");
        }
        assert!(!noms.contains("__"));
    }

    #[test]
    fn grille_complete() {
        let labels: Vec<&str> = GRILLE.iter().flatten().map(|(l, _)| *l).collect();
        assert_eq!(labels.len(), 35);
        for l in ["C", "DEL", "=", "×", "÷", "^", "%", "gamma", "fact", "ln"] {
            assert!(labels.contains(&l), "bouton manquant: {l}");
        }
    }

    #[test]
    fn evaluation_depuis_l_entree() {
        let mut app = AppCalc::default();
        app.inserer("2^10");
        app.evaluer_entree();
        assert_eq!(app.entree, "1024");
        assert_eq!(app.historique[0].libelle(), "2^10 = 1024");

        app.set_mode(ModeAngle::Degres);
        app.clear_entree();
        app.inserer("sin(90)");
        app.evaluer_entree();
        assert_eq!(app.entree, "1");

        app.clear_entree();
        app.inserer("1/0");
        app.evaluer_entree();
        assert_eq!(app.erreur, "Division par zéro interdite.");
        assert_eq!(app.entree, "1/0");
        assert_eq!(app.historique.len(), 2);
    }

    #[test]
    fn entree_vide_ne_fait_rien() {
        let mut app = AppCalc::default();
        app.entree = "   ".into();
        app.evaluer_entree();
        assert!(app.erreur.is_empty());
        assert!(app.historique.is_empty());
    }
}
