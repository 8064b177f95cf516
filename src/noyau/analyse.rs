// src/noyau/analyse.rs
//
// Descente récursive : jetons -> Expr
// Grammaire (priorités usuelles, ** associatif à droite) :
//
//   expr    := term (('+' | '-') term)*
//   term    := unaire (('*' | '/') unaire)*
//   unaire  := ('-' | '+') unaire | puiss
//   puiss   := prim ('**' unaire)?
//   prim    := NUM | IDENT | IDENT '(' [expr (',' expr)*] ')' | '(' expr ')'
//
// Donc -2**2 = -(2**2) et 2**-1 = 2**(-1).
// Aucune production pour `.` ni les chaînes : elles finissent en erreur de syntaxe.

use std::iter::Peekable;
use std::vec::IntoIter;

use super::erreur::{ErreurCalcul, Resultat};
use super::expr::{Expr, OpBin};
use super::jetons::Tok;

/// Garde-fou : imbrication maximale (anti débordement de pile).
/// Vaut pour la descente ET pour l’arbre produit (l’évaluation est récursive).
pub const PROFONDEUR_MAX: usize = 512;

/// Garde-fou : une calculatrice n’a pas besoin d’entrées plus longues.
pub const JETONS_MAX: usize = 2048;

/// Borne de longueur, appliquée dès la sortie du lexique.
pub fn verifier_longueur(tokens: &[Tok]) -> Resultat<()> {
    if tokens.len() > JETONS_MAX {
        return Err(ErreurCalcul::syntaxe("expression trop longue"));
    }
    Ok(())
}

/// Construit l’AST d’une suite de jetons complète.
pub fn analyser(tokens: Vec<Tok>) -> Resultat<Expr> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::syntaxe("expression vide"));
    }
    verifier_longueur(&tokens)?;

    let mut a = Analyseur {
        tokens: tokens.into_iter().peekable(),
        profondeur: 0,
    };
    let e = a.expr()?;

    if let Some(extra) = a.tokens.next() {
        return Err(ErreurCalcul::syntaxe(format!(
            "jeton inattendu: {}",
            decrire(&extra)
        )));
    }

    // 1+1+…+1 : chaîne gauche profonde sans parenthèses
    if e.profondeur() > PROFONDEUR_MAX {
        return Err(ErreurCalcul::syntaxe("expression trop imbriquée"));
    }

    Ok(e)
}

struct Analyseur {
    tokens: Peekable<IntoIter<Tok>>,
    profondeur: usize,
}

impl Analyseur {
    fn expr(&mut self) -> Resultat<Expr> {
        self.entrer()?;
        let mut lhs = self.term()?;

        while let Some(Tok::Plus | Tok::Minus) = self.tokens.peek() {
            let op = if self.tokens.next() == Some(Tok::Plus) {
                OpBin::Add
            } else {
                OpBin::Sub
            };
            let rhs = self.term()?;
            lhs = Expr::bin(op, lhs, rhs);
        }

        self.sortir();
        Ok(lhs)
    }

    fn term(&mut self) -> Resultat<Expr> {
        let mut lhs = self.unaire()?;

        while let Some(Tok::Star | Tok::Slash) = self.tokens.peek() {
            let op = if self.tokens.next() == Some(Tok::Star) {
                OpBin::Mul
            } else {
                OpBin::Div
            };
            let rhs = self.unaire()?;
            lhs = Expr::bin(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn unaire(&mut self) -> Resultat<Expr> {
        match self.tokens.peek() {
            Some(Tok::Minus) => {
                self.tokens.next();
                self.entrer()?;
                let x = self.unaire()?;
                self.sortir();
                Ok(Expr::Neg(Box::new(x)))
            }
            Some(Tok::Plus) => {
                // + unaire : sans effet, pas de noeud
                self.tokens.next();
                self.entrer()?;
                let x = self.unaire()?;
                self.sortir();
                Ok(x)
            }
            _ => self.puiss(),
        }
    }

    fn puiss(&mut self) -> Resultat<Expr> {
        let base = self.prim()?;

        if let Some(Tok::StarStar) = self.tokens.peek() {
            self.tokens.next();
            self.entrer()?;
            let exposant = self.unaire()?;
            self.sortir();
            return Ok(Expr::bin(OpBin::Pow, base, exposant));
        }

        Ok(base)
    }

    fn prim(&mut self) -> Resultat<Expr> {
        match self.tokens.next() {
            Some(Tok::Num(n)) => Ok(Expr::Nombre(n)),

            Some(Tok::Ident(nom)) => {
                if let Some(Tok::LPar) = self.tokens.peek() {
                    self.tokens.next();
                    let args = self.arguments()?;
                    Ok(Expr::Appel(nom, args))
                } else {
                    Ok(Expr::Nom(nom))
                }
            }

            Some(Tok::LPar) => {
                let e = self.expr()?;
                self.attendre_rpar()?;
                Ok(e)
            }

            Some(autre) => Err(ErreurCalcul::syntaxe(format!(
                "jeton inattendu: {}",
                decrire(&autre)
            ))),
            None => Err(ErreurCalcul::syntaxe("expression incomplète")),
        }
    }

    /// Arguments d’appel, '(' déjà consommée.
    fn arguments(&mut self) -> Resultat<Vec<Expr>> {
        let mut args = Vec::new();

        if let Some(Tok::RPar) = self.tokens.peek() {
            self.tokens.next();
            return Ok(args);
        }

        loop {
            args.push(self.expr()?);
            match self.tokens.next() {
                Some(Tok::Virgule) => continue,
                Some(Tok::RPar) => return Ok(args),
                Some(autre) => {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "attendu ',' ou ')' mais trouvé {}",
                        decrire(&autre)
                    )))
                }
                None => return Err(ErreurCalcul::syntaxe("parenthèses non fermées")),
            }
        }
    }

    fn attendre_rpar(&mut self) -> Resultat<()> {
        match self.tokens.next() {
            Some(Tok::RPar) => Ok(()),
            Some(autre) => Err(ErreurCalcul::syntaxe(format!(
                "attendu ')' mais trouvé {}",
                decrire(&autre)
            ))),
            None => Err(ErreurCalcul::syntaxe("parenthèses non fermées")),
        }
    }

    fn entrer(&mut self) -> Resultat<()> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::syntaxe("expression trop imbriquée"));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }
}

fn decrire(t: &Tok) -> String {
    match t {
        Tok::Num(n) => format!("'{n}'"),
        Tok::Ident(s) => format!("'{s}'"),
        Tok::Texte(_) => "une chaîne".to_string(),
        Tok::Point => "'.'".to_string(),
        Tok::Plus => "'+'".to_string(),
        Tok::Minus => "'-'".to_string(),
        Tok::Star => "'*'".to_string(),
        Tok::Slash => "'/'".to_string(),
        Tok::StarStar => "'**'".to_string(),
        Tok::LPar => "'('".to_string(),
        Tok::RPar => "')'".to_string(),
        Tok::Virgule => "','".to_string(),
    }
}
