// src/noyau/expr.rs
//
// AST restreint (flottants f64).
// - Nombre : littéral décimal
// - Nom    : constante de la liste autorisée (pi, e, …)
// - Neg    : moins unaire
// - Bin    : + - * / **
// - Appel  : nom(args…)
//
// IMPORTANT (SAFE):
// - Aucun noeud “attribut”, “chaîne”, “indexation” : la grammaire ne peut rien
//   produire d’autre que de l’arithmétique.
// - Les parenthèses ne laissent pas de trace : l’arbre porte déjà la priorité.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBin {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBin::Add => "+",
            OpBin::Sub => "-",
            OpBin::Mul => "*",
            OpBin::Div => "/",
            OpBin::Pow => "**",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Nom(String),

    Neg(Box<Expr>),
    Bin(OpBin, Box<Expr>, Box<Expr>),

    Appel(String, Vec<Expr>),
}

impl Expr {
    pub fn bin(op: OpBin, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    /// Profondeur de l’arbre (itératif, pas de récursion sur l’entrée).
    pub fn profondeur(&self) -> usize {
        let mut max = 0usize;
        let mut pile: Vec<(&Expr, usize)> = vec![(self, 1)];

        while let Some((e, d)) = pile.pop() {
            max = max.max(d);
            match e {
                Expr::Nombre(_) | Expr::Nom(_) => {}
                Expr::Neg(x) => pile.push((x.as_ref(), d + 1)),
                Expr::Bin(_, a, b) => {
                    pile.push((a.as_ref(), d + 1));
                    pile.push((b.as_ref(), d + 1));
                }
                Expr::Appel(_, args) => pile.extend(args.iter().map(|a| (a, d + 1))),
            }
        }

        max
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(n) => write!(f, "{n}"),
            Nom(s) => write!(f, "{s}"),
            Neg(x) => write!(f, "(-{x})"),
            Bin(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
            Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
