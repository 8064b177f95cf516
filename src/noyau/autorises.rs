// src/noyau/autorises.rs
//
// Liste autorisée : table littérale (nom -> constante | fonction)
// --------------------------------------------------------------
// - Construite UNE fois (OnceLock), lecture seule ensuite.
// - Énumérée à la main : auditable, aucune introspection.
// - Aucune entrée n’offre d’E/S, d’accès attribut ou d’import : que du f64 -> f64.
// - Les six trig sont stockées en radians ; le mode d’angle est une surcouche
//   appliquée par EspaceEvaluation, jamais ici.

use std::collections::BTreeMap;
use std::f64::consts::{E, PI, TAU};
use std::sync::OnceLock;

use super::erreur::Resultat;
use super::fonctions;

pub type FnUnaire = fn(f64) -> Resultat<f64>;
pub type FnBinaire = fn(f64, f64) -> Resultat<f64>;
pub type FnUnOuDeux = fn(f64, Option<f64>) -> Resultat<f64>;

#[derive(Clone, Copy)]
pub enum Entree {
    Constante(f64),
    Unaire(FnUnaire),
    Binaire(FnBinaire),
    /// Second argument facultatif : ln(x, base), round(x, n).
    UnOuDeux(FnUnOuDeux),
}

impl Entree {
    pub fn est_fonction(&self) -> bool {
        !matches!(self, Entree::Constante(_))
    }
}

pub struct ListeAutorisee {
    table: BTreeMap<&'static str, Entree>,
}

impl ListeAutorisee {
    pub fn get(&self, nom: &str) -> Option<Entree> {
        self.table.get(nom).copied()
    }

    /// Noms triés (affichage / aide).
    pub fn noms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

/// Builtins minimaux tolérés hors table (valeur absolue + arrondi).
pub const BUILTINS: [(&str, Entree); 2] = [
    ("abs", Entree::Unaire(valeur_absolue)),
    ("round", Entree::UnOuDeux(fonctions::arrondi)),
];

fn valeur_absolue(x: f64) -> Resultat<f64> {
    Ok(x.abs())
}

pub fn builtin(nom: &str) -> Option<Entree> {
    BUILTINS.iter().find(|(n, _)| *n == nom).map(|(_, e)| *e)
}

static LISTE: OnceLock<ListeAutorisee> = OnceLock::new();

/// Liste process-wide (construite au premier appel).
pub fn liste_autorisee() -> &'static ListeAutorisee {
    LISTE.get_or_init(construire)
}

fn construire() -> ListeAutorisee {
    use Entree::*;

    let entrees: [(&'static str, Entree); 49] = [
        // --- constantes ---
        ("pi", Constante(PI)),
        ("e", Constante(E)),
        ("tau", Constante(TAU)),
        ("inf", Constante(f64::INFINITY)),
        ("nan", Constante(f64::NAN)),
        // --- trig (radians ; surcouche du mode ailleurs) ---
        ("sin", Unaire(|x| Ok(x.sin()))),
        ("cos", Unaire(|x| Ok(x.cos()))),
        ("tan", Unaire(|x| Ok(x.tan()))),
        ("asin", Unaire(|x| Ok(x.asin()))),
        ("acos", Unaire(|x| Ok(x.acos()))),
        ("atan", Unaire(|x| Ok(x.atan()))),
        ("atan2", Binaire(|y, x| Ok(y.atan2(x)))),
        ("degrees", Unaire(|x| Ok(x.to_degrees()))),
        ("radians", Unaire(|x| Ok(x.to_radians()))),
        // --- hyperboliques ---
        ("sinh", Unaire(|x| Ok(x.sinh()))),
        ("cosh", Unaire(|x| Ok(x.cosh()))),
        ("tanh", Unaire(|x| Ok(x.tanh()))),
        ("asinh", Unaire(|x| Ok(x.asinh()))),
        ("acosh", Unaire(|x| Ok(x.acosh()))),
        ("atanh", Unaire(fonctions::atanh)),
        // --- puissances / logarithmes ---
        ("sqrt", Unaire(|x| Ok(x.sqrt()))),
        ("cbrt", Unaire(|x| Ok(x.cbrt()))),
        ("exp", Unaire(|x| Ok(x.exp()))),
        ("exp2", Unaire(|x| Ok(x.exp2()))),
        ("expm1", Unaire(|x| Ok(x.exp_m1()))),
        ("pow", Binaire(fonctions::puissance)),
        ("ln", UnOuDeux(fonctions::ln)),
        ("log", Unaire(fonctions::log10)),
        ("log10", Unaire(fonctions::log10)),
        ("log2", Unaire(fonctions::log2)),
        ("log1p", Unaire(fonctions::log1p)),
        // --- arrondis / signe ---
        ("ceil", Unaire(|x| Ok(x.ceil()))),
        ("floor", Unaire(|x| Ok(x.floor()))),
        ("trunc", Unaire(|x| Ok(x.trunc()))),
        ("fabs", Unaire(|x| Ok(x.abs()))),
        ("copysign", Binaire(|x, y| Ok(x.copysign(y)))),
        ("fmod", Binaire(|x, y| Ok(x % y))),
        ("remainder", Binaire(fonctions::reste_ieee)),
        ("hypot", Binaire(|x, y| Ok(x.hypot(y)))),
        ("ldexp", Binaire(fonctions::ldexp)),
        // --- spéciales / entières ---
        ("factorial", Unaire(fonctions::factorielle)),
        ("fact", Unaire(fonctions::factorielle)),
        ("gamma", Unaire(fonctions::gamma)),
        ("lgamma", Unaire(fonctions::lgamma)),
        ("comb", Binaire(fonctions::combinaisons)),
        ("perm", Binaire(fonctions::arrangements)),
        ("gcd", Binaire(fonctions::pgcd)),
        ("lcm", Binaire(fonctions::ppcm)),
        ("isqrt", Unaire(fonctions::racine_entiere)),
    ];

    ListeAutorisee {
        table: entrees.into_iter().collect(),
    }
}
