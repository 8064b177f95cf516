// src/noyau/trig.rs
//
// Trig sensible au mode d’angle
// -----------------------------
// - Directes (sin/cos/tan)     : argument converti unité active -> radians AVANT l’appel
// - Inverses (asin/acos/atan)  : résultat converti radians -> unité active APRÈS l’appel
// - Le mode est un paramètre explicite (aucun état capturé entre deux appels).

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl ModeAngle {
    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_radians(),
        }
    }

    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_degrees(),
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Radians => write!(f, "Radians"),
            ModeAngle::Degres => write!(f, "Degrés"),
        }
    }
}

/// Les six noms surchargés selon le mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl TrigFn {
    pub const TOUTES: [TrigFn; 6] = [
        TrigFn::Sin,
        TrigFn::Cos,
        TrigFn::Tan,
        TrigFn::Asin,
        TrigFn::Acos,
        TrigFn::Atan,
    ];

    pub fn depuis_nom(nom: &str) -> Option<TrigFn> {
        TrigFn::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Asin => "asin",
            TrigFn::Acos => "acos",
            TrigFn::Atan => "atan",
        }
    }

    /// Fonction sous-jacente, en radians.
    pub fn en_radians(self, x: f64) -> f64 {
        match self {
            TrigFn::Sin => x.sin(),
            TrigFn::Cos => x.cos(),
            TrigFn::Tan => x.tan(),
            TrigFn::Asin => x.asin(),
            TrigFn::Acos => x.acos(),
            TrigFn::Atan => x.atan(),
        }
    }

    fn est_inverse(self) -> bool {
        matches!(self, TrigFn::Asin | TrigFn::Acos | TrigFn::Atan)
    }

    /// Application selon le mode (hors domaine => NaN, classé par l’évaluateur).
    pub fn appliquer(self, x: f64, mode: ModeAngle) -> f64 {
        if self.est_inverse() {
            mode.depuis_radians(self.en_radians(x))
        } else {
            self.en_radians(mode.vers_radians(x))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn directes_en_degres() {
        assert!(proche(TrigFn::Sin.appliquer(90.0, ModeAngle::Degres), 1.0));
        assert!(proche(TrigFn::Cos.appliquer(180.0, ModeAngle::Degres), -1.0));
        assert!(proche(TrigFn::Tan.appliquer(45.0, ModeAngle::Degres), 1.0));
    }

    #[test]
    fn inverses_en_degres() {
        assert!(proche(TrigFn::Asin.appliquer(1.0, ModeAngle::Degres), 90.0));
        assert!(proche(TrigFn::Acos.appliquer(-1.0, ModeAngle::Degres), 180.0));
        assert!(proche(TrigFn::Atan.appliquer(1.0, ModeAngle::Degres), 45.0));
    }

    #[test]
    fn radians_inchange() {
        assert!(proche(TrigFn::Sin.appliquer(PI / 2.0, ModeAngle::Radians), 1.0));
        assert!(proche(TrigFn::Atan.appliquer(1.0, ModeAngle::Radians), PI / 4.0));
    }

    #[test]
    fn hors_domaine_donne_nan() {
        assert!(TrigFn::Asin.appliquer(2.0, ModeAngle::Degres).is_nan());
        assert!(TrigFn::Acos.appliquer(-1.5, ModeAngle::Radians).is_nan());
    }

    #[test]
    fn noms_aller_retour() {
        for f in TrigFn::TOUTES {
            assert_eq!(TrigFn::depuis_nom(f.nom()), Some(f));
        }
        assert_eq!(TrigFn::depuis_nom("atan2"), None);
    }
}
