// src/app.rs
//
// Calculatrice : module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - Ici : raccourcis globaux, panneaux, titre de fenêtre.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::TITRE_APP;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        // Le titre suit le mode d’angle (sans effet côté web).
        if !self.titre_a_jour {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "{TITRE_APP} ({})",
                self.mode
            )));
            self.titre_a_jour = true;
        }

        egui::SidePanel::right("panneau_historique")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.ui_historique(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        self.ui_fenetres(ctx);
    }
}
