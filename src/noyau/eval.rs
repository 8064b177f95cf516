//! Noyau : évaluation sandboxée (pipeline réel)
//!
//! texte canonique -> jetons -> noms libres vérifiés -> Expr -> valeur f64
//!
//! La vérification des noms se fait sur TOUS les identifiants (y compris après
//! un `.`) et AVANT la moindre évaluation : un nom refusé n’évalue rien.

use tracing::{debug, warn};

use super::analyse::{analyser, verifier_longueur};
use super::autorises::Entree;
use super::erreur::{ErreurCalcul, Resultat};
use super::espace::{EspaceEvaluation, Liaison};
use super::expr::{Expr, OpBin};
use super::jetons::{format_tokens, noms_libres, tokenize};
use super::pretraitement::pretraiter;
use super::trig::ModeAngle;

/// API publique : évalue une expression CANONIQUE dans le mode d’angle donné.
///
/// Retourne la valeur brute (pas de mise en forme ici).
///
/// Ordre des refus : lexique et longueur, puis noms, puis grammaire, puis calcul.
/// Un nom hors liste l’emporte donc sur une faute de grammaire (`x +` donne
/// `NomInterdit`, pas `Syntaxe`).
pub fn evaluer(canonique: &str, mode: ModeAngle) -> Resultat<f64> {
    // 1) Espace frais pour cet appel
    let espace = EspaceEvaluation::nouveau(mode);

    // 2) Jetons + noms libres
    let jetons = tokenize(canonique)?;
    verifier_longueur(&jetons)?;

    // 3) Liste autorisée : précondition dure
    for nom in noms_libres(&jetons) {
        if !espace.autorise(nom) {
            warn!(nom, "nom refusé par la liste autorisée");
            return Err(ErreurCalcul::NomInterdit(nom.to_string()));
        }
    }

    debug!(jetons = %format_tokens(&jetons), "jetons");

    // 4) AST puis évaluation stricte dans l’espace
    let expr = analyser(jetons)?;
    debug!(%expr, profondeur = expr.profondeur(), mode = %espace.mode(), "évaluation");

    let v = evaluer_expr(&expr, &espace)?;
    debug!(valeur = v, "résultat");
    Ok(v)
}

/// Prétraitement + évaluation (ce que l’UI appelle avec la saisie brute).
pub fn eval_expression(brut: &str, mode: ModeAngle) -> Resultat<f64> {
    let canonique = pretraiter(brut);
    debug!(brut, %canonique, "prétraitement");
    evaluer(&canonique, mode)
}

fn evaluer_expr(expr: &Expr, espace: &EspaceEvaluation) -> Resultat<f64> {
    match expr {
        Expr::Nombre(n) => Ok(*n),

        Expr::Nom(nom) => match resoudre(espace, nom)? {
            Liaison::Entree(Entree::Constante(v)) => Ok(v),
            _ => Err(ErreurCalcul::syntaxe(format!(
                "'{nom}' est une fonction (appel attendu)"
            ))),
        },

        Expr::Neg(x) => Ok(-evaluer_expr(x, espace)?),

        Expr::Bin(op, a, b) => {
            let a = evaluer_expr(a, espace)?;
            let b = evaluer_expr(b, espace)?;
            operation(*op, a, b)
        }

        Expr::Appel(nom, args) => {
            let liaison = resoudre(espace, nom)?;
            if !liaison.est_fonction() {
                return Err(ErreurCalcul::syntaxe(format!(
                    "'{nom}' n’est pas une fonction"
                )));
            }

            let valeurs = args
                .iter()
                .map(|a| evaluer_expr(a, espace))
                .collect::<Resultat<Vec<f64>>>()?;

            let r = appeler(nom, liaison, &valeurs)?;
            classer(nom, r, &valeurs)
        }
    }
}

/// Défense en profondeur : les noms ont déjà été vérifiés sur les jetons.
fn resoudre(espace: &EspaceEvaluation, nom: &str) -> Resultat<Liaison> {
    espace
        .resoudre(nom)
        .ok_or_else(|| ErreurCalcul::NomInterdit(nom.to_string()))
}

fn operation(op: OpBin, a: f64, b: f64) -> Resultat<f64> {
    let r = match op {
        OpBin::Add => a + b,
        OpBin::Sub => a - b,
        OpBin::Mul => a * b,
        OpBin::Div => {
            if b == 0.0 {
                return Err(ErreurCalcul::DivisionParZero);
            }
            a / b
        }
        OpBin::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(ErreurCalcul::DivisionParZero);
            }
            a.powf(b)
        }
    };
    classer(op.symbole(), r, &[a, b])
}

fn appeler(nom: &str, liaison: Liaison, args: &[f64]) -> Resultat<f64> {
    match (liaison, args) {
        (Liaison::Trig(f, mode), [x]) => Ok(f.appliquer(*x, mode)),
        (Liaison::Entree(Entree::Unaire(f)), [x]) => f(*x),
        (Liaison::Entree(Entree::Binaire(f)), [x, y]) => f(*x, *y),
        (Liaison::Entree(Entree::UnOuDeux(f)), [x]) => f(*x, None),
        (Liaison::Entree(Entree::UnOuDeux(f)), [x, y]) => f(*x, Some(*y)),
        (l, _) => Err(ErreurCalcul::syntaxe(format!(
            "{nom}() attend {} argument(s), {} fourni(s)",
            arite(l),
            args.len()
        ))),
    }
}

fn arite(l: Liaison) -> &'static str {
    match l {
        Liaison::Trig(..) | Liaison::Entree(Entree::Unaire(_)) => "1",
        Liaison::Entree(Entree::Binaire(_)) => "2",
        Liaison::Entree(Entree::UnOuDeux(_)) => "1 ou 2",
        Liaison::Entree(Entree::Constante(_)) => "0",
    }
}

/// Classement des résultats non finis :
/// - NaN né d’opérandes sans NaN   => Domaine
/// - ±∞ né d’opérandes tous finis  => Dépassement
fn classer(nom: &str, r: f64, operandes: &[f64]) -> Resultat<f64> {
    if r.is_nan() && !operandes.iter().any(|x| x.is_nan()) {
        return Err(ErreurCalcul::domaine(format!("{nom} : hors domaine")));
    }
    if r.is_infinite() && operandes.iter().all(|x| x.is_finite()) {
        return Err(ErreurCalcul::depassement(format!("{nom} : résultat trop grand")));
    }
    Ok(r)
}
