// src/noyau/format.rs
//
// Mise en forme du résultat (frontière noyau -> UI)
// - flottant sans partie fractionnaire => affiché comme entier (4.0 -> "4")
// - sinon représentation décimale native la plus courte (4.5 -> "4.5")
// Pure : ne dépend que de la valeur.

pub fn mettre_en_forme(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    if v.fract() == 0.0 {
        // -0.0 -> "0" ; Display ne passe jamais en notation scientifique
        if v == 0.0 {
            return "0".to_string();
        }
        return format!("{v}");
    }

    // Debug : plus court aller-retour, notation scientifique pour les extrêmes
    format!("{v:?}")
}
