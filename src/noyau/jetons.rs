// src/noyau/jetons.rs

use std::collections::BTreeSet;

use super::erreur::{ErreurCalcul, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (tout ce qui n’est pas opérateur / nombre)
    // NOTE: l’analyse décidera si c’est un appel ou une valeur.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    LPar,
    RPar,
    Virgule,

    // Reconnus pour classer l’entrée hostile (os.system('x')), jamais acceptés
    // par la grammaire.
    Point,
    Texte(String),
}

/// Tokenize une chaîne canonique en jetons.
/// Supporte:
/// - nombres décimaux : 12, 1.5, .5, 1., 1e3, 2.5E-4, 1_000
/// - opérateurs + - * / **
/// - parenthèses ( ) et virgule
/// - identifiants [alpha_][alnum_]* (casse conservée : `E` n’est pas `e`)
/// - `.` isolé (accès attribut) et littéraux 'texte' / "texte"
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '\'' | '"' => {
                let fin = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(|| ErreurCalcul::syntaxe("chaîne non terminée"))?;
                let texte: String = chars[i + 1..i + 1 + fin].iter().collect();
                out.push(Tok::Texte(texte));
                i += fin + 2;
                continue;
            }
            _ => {}
        }

        // Identifiants : [alpha_][alnum_]*
        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre décimal (ou `.` isolé si aucun chiffre ne suit)
        if c.is_ascii_digit() || c == '.' {
            if c == '.' && !chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()) {
                out.push(Tok::Point);
                i += 1;
                continue;
            }
            let (n, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = suivant;
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit un littéral à partir de `start`; retourne (valeur, index suivant).
fn lire_nombre(chars: &[char], start: usize) -> Resultat<(f64, usize)> {
    let mut i = start;
    let mut txt = String::new();

    let chiffres = |i: &mut usize, txt: &mut String| -> Resultat<()> {
        while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '_') {
            if chars[*i] == '_' {
                // `_` seulement ENTRE deux chiffres
                let avant = txt.chars().last().is_some_and(|d| d.is_ascii_digit());
                let apres = chars.get(*i + 1).is_some_and(|d| d.is_ascii_digit());
                if !avant || !apres {
                    return Err(ErreurCalcul::syntaxe("séparateur '_' mal placé"));
                }
            } else {
                txt.push(chars[*i]);
            }
            *i += 1;
        }
        Ok(())
    };

    chiffres(&mut i, &mut txt)?;

    if i < chars.len() && chars[i] == '.' {
        txt.push('.');
        i += 1;
        chiffres(&mut i, &mut txt)?;
    }

    // exposant : e / E [+-] chiffres (sinon `e` appartient à l’identifiant suivant)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            txt.extend(&chars[i..j]);
            i = j;
            chiffres(&mut i, &mut txt)?;
        }
    }

    // `2pi`, `3x` : pas de multiplication implicite
    if i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.') {
        return Err(ErreurCalcul::syntaxe(format!(
            "littéral numérique invalide près de '{}'",
            chars[i]
        )));
    }

    let n = txt
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {txt}")))?;
    Ok((n, i))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
            Tok::Point => ".".to_string(),
            Tok::Texte(t) => format!("{t:?}"),
        };
        out.push(s);
    }
    out.join(" ")
}

/// Noms libres référencés : chaque identifiant, y compris après un `.`
/// (ordre d’apparition, sans doublon).
pub fn noms_libres(tokens: &[Tok]) -> Vec<&str> {
    let mut vus: BTreeSet<&str> = BTreeSet::new();
    tokens
        .iter()
        .filter_map(|t| match t {
            Tok::Ident(name) => Some(name.as_str()),
            _ => None,
        })
        .filter(|name| vus.insert(*name))
        .collect()
}
