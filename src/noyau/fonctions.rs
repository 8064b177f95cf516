// src/noyau/fonctions.rs
//
// Fonctions numériques absentes de std (ou dont le domaine doit être explicite).
// Contrat : Ok(NaN) / Ok(±∞) sont classés plus haut (eval.rs) ; ici on ne lève
// que les refus que le flottant ne dit pas tout seul (log(0) = -∞ n’est PAS un
// dépassement, gamma(-2) n’est PAS un pôle “infini”, etc.).

use std::f64::consts::PI;

use num_traits::ToPrimitive;

use super::erreur::{ErreurCalcul, Resultat};

/// Plus grand n tel que n! tient dans un f64.
const FACTORIELLE_MAX: u32 = 170;

/* ------------------------ Entiers (fonctions “entières”) ------------------------ */

/// x doit être un entier exact (2.0 oui, 2.5 non).
fn entier(x: f64, nom: &str) -> Resultat<i64> {
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(ErreurCalcul::domaine(format!("{nom} : argument entier attendu")));
    }
    x.to_i64()
        .ok_or_else(|| ErreurCalcul::depassement(format!("{nom} : entier trop grand")))
}

fn entier_positif(x: f64, nom: &str) -> Resultat<u64> {
    // le signe d’abord : -1e20 est hors domaine, pas un dépassement
    if x < 0.0 {
        return Err(ErreurCalcul::domaine(format!("{nom} : argument négatif")));
    }
    let n = entier(x, nom)?;
    n.to_u64()
        .ok_or_else(|| ErreurCalcul::domaine(format!("{nom} : argument négatif")))
}

pub fn factorielle(x: f64) -> Resultat<f64> {
    let n = entier_positif(x, "factorielle")?;
    if n > u64::from(FACTORIELLE_MAX) {
        return Err(ErreurCalcul::depassement("factorielle : résultat trop grand"));
    }
    Ok((2..=n).fold(1.0, |acc, k| acc * k as f64))
}

/// comb(n, k) = n! / (k! (n-k)!), 0 si k > n.
pub fn combinaisons(n: f64, k: f64) -> Resultat<f64> {
    let n = entier_positif(n, "comb")?;
    let k = entier_positif(k, "comb")?;
    if k > n {
        return Ok(0.0);
    }

    let k = k.min(n - k);
    let mut acc = 1.0f64;
    for i in 0..k {
        acc = acc * (n - i) as f64 / (i + 1) as f64;
        // croissant : une fois infini, inutile de continuer
        if acc.is_infinite() {
            break;
        }
    }
    Ok(acc.round())
}

/// perm(n, k) = n! / (n-k)!, 0 si k > n.
pub fn arrangements(n: f64, k: f64) -> Resultat<f64> {
    let n = entier_positif(n, "perm")?;
    let k = entier_positif(k, "perm")?;
    if k > n {
        return Ok(0.0);
    }

    let mut acc = 1.0f64;
    for i in 0..k {
        acc *= (n - i) as f64;
        if acc.is_infinite() {
            break;
        }
    }
    Ok(acc)
}

pub fn pgcd(a: f64, b: f64) -> Resultat<f64> {
    let (mut a, mut b) = (
        entier(a, "gcd")?.unsigned_abs(),
        entier(b, "gcd")?.unsigned_abs(),
    );
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Ok(a as f64)
}

pub fn ppcm(a: f64, b: f64) -> Resultat<f64> {
    let (ia, ib) = (
        entier(a, "lcm")?.unsigned_abs(),
        entier(b, "lcm")?.unsigned_abs(),
    );
    if ia == 0 || ib == 0 {
        return Ok(0.0);
    }
    let g = pgcd(a, b)? as u64;
    (ia / g)
        .checked_mul(ib)
        .map(|m| m as f64)
        .ok_or_else(|| ErreurCalcul::depassement("lcm : résultat trop grand"))
}

/// Racine carrée entière (plancher).
pub fn racine_entiere(x: f64) -> Resultat<f64> {
    let n = u128::from(entier_positif(x, "isqrt")?);
    let mut r = (n as f64).sqrt() as u128;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    Ok(r as f64)
}

/* ------------------------ Gamma (Lanczos g=7, n=9) ------------------------ */

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Somme de Lanczos pour x (déjà décalé de -1).
fn lanczos_somme(x: f64) -> f64 {
    LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, p)| acc + p / (x + (i + 1) as f64))
}

fn est_pole(x: f64) -> bool {
    x <= 0.0 && x.fract() == 0.0
}

pub fn gamma(x: f64) -> Resultat<f64> {
    if est_pole(x) {
        return Err(ErreurCalcul::domaine("gamma : pôle en entier négatif ou nul"));
    }

    // entiers : produit exact (gamma(5) = 24, pas 23.999…)
    if x.fract() == 0.0 && x <= f64::from(FACTORIELLE_MAX + 1) {
        return factorielle(x - 1.0);
    }

    Ok(gamma_reel(x))
}

fn gamma_reel(x: f64) -> f64 {
    if x < 0.5 {
        // réflexion : Γ(x) Γ(1-x) = π / sin(πx)
        return PI / ((PI * x).sin() * gamma_reel(1.0 - x));
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    // t^(x+1/2) en deux moitiés : évite un ∞ intermédiaire vers x ≈ 143
    let p = t.powf((x + 0.5) / 2.0);
    (2.0 * PI).sqrt() * p * (p * (-t).exp() * lanczos_somme(x))
}

/// ln|Γ(x)|
pub fn lgamma(x: f64) -> Resultat<f64> {
    if est_pole(x) {
        return Err(ErreurCalcul::domaine("lgamma : pôle en entier négatif ou nul"));
    }
    Ok(lgamma_reel(x))
}

fn lgamma_reel(x: f64) -> f64 {
    if x < 0.5 {
        return (PI / (PI * x).sin().abs()).ln() - lgamma_reel(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + lanczos_somme(x).ln()
}

/* ------------------------ Logarithmes (domaine explicite) ------------------------ */

fn exiger_positif(x: f64, nom: &str) -> Resultat<()> {
    if x <= 0.0 {
        return Err(ErreurCalcul::domaine(format!("{nom} : argument non positif")));
    }
    Ok(())
}

pub fn ln(x: f64, base: Option<f64>) -> Resultat<f64> {
    exiger_positif(x, "ln")?;
    match base {
        None => Ok(x.ln()),
        Some(b) => {
            exiger_positif(b, "ln (base)")?;
            let d = b.ln();
            if d == 0.0 {
                return Err(ErreurCalcul::DivisionParZero);
            }
            Ok(x.ln() / d)
        }
    }
}

pub fn log10(x: f64) -> Resultat<f64> {
    exiger_positif(x, "log")?;
    Ok(x.log10())
}

pub fn log2(x: f64) -> Resultat<f64> {
    exiger_positif(x, "log2")?;
    Ok(x.log2())
}

pub fn log1p(x: f64) -> Resultat<f64> {
    exiger_positif(x + 1.0, "log1p")?;
    Ok(x.ln_1p())
}

pub fn atanh(x: f64) -> Resultat<f64> {
    if x.abs() >= 1.0 {
        return Err(ErreurCalcul::domaine("atanh : argument hors ]-1, 1["));
    }
    Ok(x.atanh())
}

/* ------------------------ Divers ------------------------ */

pub fn puissance(x: f64, y: f64) -> Resultat<f64> {
    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalcul::domaine("pow : zéro à une puissance négative"));
    }
    Ok(x.powf(y))
}

/// Reste IEEE 754 : x - n*y, n entier le plus proche de x/y (pair si égalité).
pub fn reste_ieee(x: f64, y: f64) -> Resultat<f64> {
    if y == 0.0 {
        return Err(ErreurCalcul::domaine("remainder : diviseur nul"));
    }
    if y.is_infinite() && x.is_finite() {
        return Ok(x);
    }
    Ok(x - (x / y).round_ties_even() * y)
}

/// x * 2^i
pub fn ldexp(x: f64, i: f64) -> Resultat<f64> {
    let mut i = entier(i, "ldexp")?;
    // 0, ±∞ et NaN sont des points fixes
    if x == 0.0 || !x.is_finite() {
        return Ok(x);
    }
    let mut r = x;
    // par paliers : 2^i seul déborderait (ou s’annulerait) trop tôt
    while i > 1000 && r.is_finite() && r != 0.0 {
        r *= 2f64.powi(1000);
        i -= 1000;
    }
    while i < -1000 && r.is_finite() && r != 0.0 {
        r *= 2f64.powi(-1000);
        i += 1000;
    }
    Ok(r * 2f64.powi(i.clamp(-1100, 1100) as i32))
}

/// round(x) / round(x, n) : arrondi au pair (2.5 -> 2).
pub fn arrondi(x: f64, decimales: Option<f64>) -> Resultat<f64> {
    let Some(n) = decimales else {
        return Ok(x.round_ties_even());
    };
    let n = entier(n, "round")?;
    if !x.is_finite() || n > 308 {
        return Ok(x);
    }
    if n < -308 {
        return Ok(0.0 * x.signum());
    }

    let echelle = 10f64.powi(n.unsigned_abs() as i32);
    if n >= 0 {
        let y = (x * echelle).round_ties_even() / echelle;
        Ok(if y.is_finite() { y } else { x })
    } else {
        Ok((x / echelle).round_ties_even() * echelle)
    }
}
