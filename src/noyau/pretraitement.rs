// src/noyau/pretraitement.rs
//
// Prétraitement : syntaxe “humaine” -> syntaxe canonique
// ------------------------------------------------------
// Ordre FIXE (chaque étape dépend de la normalisation précédente) :
// 1) × -> *   ÷ -> /
// 2) ^ -> **
// 3) π -> pi
// 4) “pourcentage de” : 50%200, 50 % (200) -> (50/100)*200, (50/100)*(200)
// 5) pourcentage isolé restant : 50% -> (50/100)
//
// Fonction totale : jamais d’erreur ici. Une entrée malformée échouera plus tard
// (lexique / grammaire / liste autorisée).

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Littéral numérique suivi de `%` (espaces/tabs tolérés avant le `%`).
    static ref POURCENT: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)[ \t]*%").unwrap();

    /// Pourcentage isolé (étape 5).
    static ref POURCENT_ISOLE: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%").unwrap();

    /// Opérande droite d’un “pourcentage de” : littéral ou parenthèse ouvrante.
    static ref OPERANDE_DROITE: Regex =
        Regex::new(r"^[ \t]*(?:([0-9]+(?:\.[0-9]+)?)|\()").unwrap();
}

/// Réécrit la syntaxe de surface en syntaxe canonique.
pub fn pretraiter(brut: &str) -> String {
    let s = brut.replace('×', "*").replace('÷', "/");
    let s = s.replace('^', "**");
    let s = s.replace('π', "pi");
    let s = pourcentage_de(&s);
    POURCENT_ISOLE
        .replace_all(&s, |c: &Captures| format!("({}/100)", &c[1]))
        .into_owned()
}

/// Étape 4 : `a%b` / `a%(…)` -> `(a/100)*b` / `(a/100)*(…)`.
///
/// L’opérande droite n’est pas consommée : elle reste candidate au motif suivant.
/// Pourcentage chaîné (`50%20%`) : pas de réécriture ici, l’évaluation échouera.
fn pourcentage_de(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    let mut dernier = 0usize;

    for c in POURCENT.captures_iter(s) {
        let Some(m) = c.get(0) else { continue };
        let reste = &s[m.end()..];

        let Some(droite) = OPERANDE_DROITE.captures(reste) else {
            continue;
        };

        // opérande littérale elle-même suivie de `%` => pourcentage chaîné, on laisse
        if let Some(lit) = droite.get(1) {
            if reste[lit.end()..].trim_start_matches([' ', '\t']).starts_with('%') {
                continue;
            }
        }

        out.push_str(&s[dernier..m.start()]);
        out.push('(');
        out.push_str(&c[1]);
        out.push_str("/100)*");

        // les espaces entre `%` et l’opérande sont absorbés
        let espaces = reste.len() - reste.trim_start_matches([' ', '\t']).len();
        dernier = m.end() + espaces;
    }

    out.push_str(&s[dernier..]);
    out
}
