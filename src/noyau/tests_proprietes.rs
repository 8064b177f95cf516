//! Tests de propriétés (campagne) : le contrat observable du noyau.
//!
//! Chaque test couvre une propriété de bout en bout :
//! saisie brute -> prétraitement -> évaluation -> mise en forme.

use super::erreur::ErreurCalcul;
use super::trig::ModeAngle::{self, Degres, Radians};
use super::pretraitement::pretraiter;
use super::{eval_expression, mettre_en_forme};

fn affiche(expr: &str, mode: ModeAngle) -> String {
    let v = eval_expression(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    mettre_en_forme(v)
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let v = eval_expression(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert!(
        (v - attendu).abs() <= 1e-9,
        "expr={expr:?} mode={mode} : {v} != {attendu}"
    );
}

/* ------------------------ Prétraitement ------------------------ */

#[test]
fn prop_pretraitement_idempotent() {
    for brut in [
        "2 × 3 ÷ 4",
        "2^10",
        "π/2",
        "50%200",
        "50 % (200)",
        "50%",
        "10% + 5",
        "50%20%",
        "50%%",
        "sin(π^2) × 10%3",
        "",
        "  ",
        "os.system('x')",
    ] {
        let une = pretraiter(brut);
        assert_eq!(pretraiter(&une), une, "brut={brut:?}");
    }
}

#[test]
fn prop_pretraitement_total() {
    // jamais de panique, même sur des entrées absurdes
    for brut in ["%%%", "^^^", "×÷", "9999999999999999999999%", "((((", "π%π"] {
        let _ = pretraiter(brut);
    }
}

/* ------------------------ Arithmétique + forme ------------------------ */

#[test]
fn prop_arithmetique_de_base() {
    assert_eq!(affiche("2+2", Radians), "4");
    assert_eq!(affiche("2^10", Radians), "1024");
    assert_eq!(affiche("7 ÷ 2", Radians), "3.5");
    assert_eq!(affiche("3 × 4", Degres), "12");
}

#[test]
fn prop_pourcentages() {
    assert_eq!(affiche("10%200", Radians), "20");
    assert_eq!(affiche("50%", Radians), "0.5");
    assert_eq!(affiche("50 % (200)", Radians), "100");
    assert_eq!(affiche("10% + 5", Radians), "5.1");
}

#[test]
fn prop_forme_du_resultat() {
    assert_eq!(mettre_en_forme(4.0), "4");
    assert_eq!(mettre_en_forme(4.5), "4.5");
    assert_eq!(affiche("8/2", Radians), "4");
    assert_eq!(affiche("9/2", Radians), "4.5");
}

/* ------------------------ Mode d’angle ------------------------ */

#[test]
fn prop_trig_en_degres_et_radians() {
    assert_proche("sin(90)", Degres, 1.0);
    assert_proche("sin(pi/2)", Radians, 1.0);
    assert_proche("sin(π/2)", Radians, 1.0);
    assert_proche("acos(0)", Degres, 90.0);
    assert_proche("tan(45)", Degres, 1.0);
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn prop_division_par_zero_dans_les_deux_modes() {
    for mode in [Radians, Degres] {
        let e = eval_expression("1/0", mode).expect_err("1/0");
        assert_eq!(e, ErreurCalcul::DivisionParZero);
        assert!(e.est_division_par_zero());
    }
}

#[test]
fn prop_noms_hors_liste_refuses() {
    for expr in ["os.system('x')", "__import__('os')"] {
        for mode in [Radians, Degres] {
            assert!(
                matches!(eval_expression(expr, mode), Err(ErreurCalcul::NomInterdit(_))),
                "expr={expr:?}"
            );
        }
    }
}

#[test]
fn prop_erreurs_de_domaine() {
    for expr in ["sqrt(-1)", "fact(-1)"] {
        assert!(
            matches!(eval_expression(expr, Radians), Err(ErreurCalcul::Domaine(_))),
            "expr={expr:?}"
        );
    }
}

#[test]
fn prop_depassement() {
    assert!(matches!(
        eval_expression("exp(1000)", Radians),
        Err(ErreurCalcul::Depassement(_))
    ));
}

#[test]
fn prop_syntaxe_invalide() {
    for expr in ["2 +", "(1", "50%%", "1 2"] {
        assert!(
            matches!(eval_expression(expr, Radians), Err(ErreurCalcul::Syntaxe(_))),
            "expr={expr:?}"
        );
    }
}

/* ------------------------ Isolation entre appels ------------------------ */

#[test]
fn prop_appels_independants() {
    // une erreur ne laisse aucun état derrière elle
    assert!(eval_expression("1/0", Degres).is_err());
    assert!(eval_expression("os.system('x')", Radians).is_err());
    assert_eq!(affiche("2+2", Radians), "4");
    assert_proche("sin(pi/2)", Radians, 1.0);
}
