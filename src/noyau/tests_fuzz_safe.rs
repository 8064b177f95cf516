//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit appartenir à la taxonomie (jamais de panique)
//! - invariant clé : un nom hors liste n’est jamais évalué

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::trig::ModeAngle;
use super::pretraitement::pretraiter;
use super::{eval_expression, mettre_en_forme};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const ATOMES: [&str; 10] = ["0", "1", "2", "3.5", "10", "90", "pi", "e", "π", "0.25"];
const FONCTIONS: [&str; 12] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "ln", "log", "fact", "gamma", "abs",
];
const OPERATEURS: [&str; 6] = ["+", "-", "×", "÷", "^", "*"];

fn gen_atom(rng: &mut Rng) -> String {
    let a = rng.choisir(&ATOMES);
    match rng.pick(6) {
        0 => format!("{a}%"),
        1 => format!("-{a}"),
        _ => a.to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = rng.choisir(&OPERATEURS);
            format!(
                "({}{op}{})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        3 => format!("{}({})", rng.choisir(&FONCTIONS), gen_expr(rng, depth - 1)),
        4 => format!("{}%{}", rng.choisir(&ATOMES), gen_expr(rng, depth - 1)),
        _ => {
            // bruit : caractères bruts mélangés à une expression valide
            let bruit = rng.choisir(&["%", "^", "(", ")", ".", ",", "@", "x"]);
            if rng.coin() {
                format!("{bruit}{}", gen_expr(rng, depth - 1))
            } else {
                format!("{}{bruit}", gen_expr(rng, depth - 1))
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_taxonomie_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        };

        // prétraitement idempotent sur tout ce qui est généré
        let canon = pretraiter(&expr);
        assert_eq!(pretraiter(&canon), canon, "expr={expr:?}");

        // même entrée => même sortie
        let r1 = eval_expression(&expr, mode);
        let r2 = eval_expression(&expr, mode);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => assert!(a == b || (a.is_nan() && b.is_nan()), "expr={expr:?}"),
            _ => assert_eq!(r1, r2, "expr={expr:?}"),
        }

        match r1 {
            Ok(v) => {
                assert!(!mettre_en_forme(v).is_empty());
                seen_ok += 1;
            }
            Err(e) => {
                // seul bruit alphabétique généré : `x` (éventuellement collé à un nom)
                if let ErreurCalcul::NomInterdit(nom) = &e {
                    assert!(nom.contains('x'), "expr={expr:?} nom={nom:?}");
                }
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_noms_interdits_jamais_evalues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let interdits = [
        "__import__('os')",
        "os.system('rm')",
        "open('f')",
        "eval('1')",
        "exec",
        "globals()",
        "pi.real",
        "x",
    ];

    for _ in 0..120 {
        budget(t0, max);

        // nom interdit placé n’importe où, même derrière une division par zéro
        let n = rng.choisir(&interdits);
        let expr = match rng.pick(4) {
            0 => format!("{n} + 1"),
            1 => format!("1/0 + {n}"),
            2 => format!("sqrt(-1) * {n}"),
            _ => format!("{} + {n}", gen_expr(&mut rng, 2)),
        };

        match eval_expression(&expr, ModeAngle::Radians) {
            Err(ErreurCalcul::NomInterdit(_)) => {}
            // bruit généré qui casse la lexie avant la vérification des noms
            Err(ErreurCalcul::Syntaxe(_)) => {}
            autre => panic!("expr={expr:?} : attendu NomInterdit, obtenu {autre:?}"),
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 200);
    budget(t0, max);

    let v = eval_expression(&expr, ModeAngle::Radians).unwrap_or_else(|e| panic!("err: {e}"));

    // 200*(1/2) = 100
    assert_eq!(mettre_en_forme(v), "100");
}

#[test]
fn fuzz_safe_entrees_hostiles_bornees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let profond = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let moins = format!("{}1", "-".repeat(5000));
    let long = "1+".repeat(5000) + "1";
    let appels = format!("{}1{}", "sqrt(".repeat(3000), ")".repeat(3000));

    for expr in [profond, moins, long, appels] {
        budget(t0, max);
        assert!(
            matches!(
                eval_expression(&expr, ModeAngle::Radians),
                Err(ErreurCalcul::Syntaxe(_))
            ),
            "entrée hostile acceptée (taille {})",
            expr.len()
        );
    }
}

#[test]
fn fuzz_safe_noms_distincts_en_masse() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    // 60 000 noms distincts : refusé par la borne de longueur, sans coût quadratique
    let expr = (0..60_000)
        .map(|i| format!("v{i}"))
        .collect::<Vec<_>>()
        .join("+");

    let r = eval_expression(&expr, ModeAngle::Radians);
    budget(t0, max);
    assert!(matches!(r, Err(ErreurCalcul::Syntaxe(_))), "obtenu {r:?}");
}
