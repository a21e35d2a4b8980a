//! WMO weather interpretation codes as used by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Code → short description, pt-BR.
pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Céu limpo"),
    (1, "Predominantemente limpo"),
    (2, "Parcialmente nublado"),
    (3, "Nublado"),
    (45, "Nevoeiro"),
    (48, "Nevoeiro com geada"),
    (51, "Garoa fraca"),
    (53, "Garoa moderada"),
    (55, "Garoa intensa"),
    (56, "Garoa congelante fraca"),
    (57, "Garoa congelante intensa"),
    (61, "Chuva fraca"),
    (63, "Chuva moderada"),
    (65, "Chuva forte"),
    (66, "Chuva congelante fraca"),
    (67, "Chuva congelante forte"),
    (71, "Neve fraca"),
    (73, "Neve moderada"),
    (75, "Neve forte"),
    (77, "Grãos de neve"),
    (80, "Pancadas de chuva fracas"),
    (81, "Pancadas de chuva moderadas"),
    (82, "Pancadas de chuva violentas"),
    (85, "Pancadas de neve fracas"),
    (86, "Pancadas de neve fortes"),
    (95, "Trovoada"),
    (96, "Trovoada com granizo fraco"),
    (99, "Trovoada com granizo forte"),
];

/// Description for a known code, `None` otherwise.
pub fn description(code: i64) -> Option<&'static str> {
    WEATHER_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overcast_is_nublado() {
        assert_eq!(description(3), Some("Nublado"));
    }

    #[test]
    fn clear_sky() {
        assert_eq!(description(0), Some("Céu limpo"));
    }

    #[test]
    fn thunderstorm_family() {
        assert_eq!(description(95), Some("Trovoada"));
        assert!(description(96).unwrap().starts_with("Trovoada"));
        assert!(description(99).unwrap().starts_with("Trovoada"));
    }

    #[test]
    fn unknown_codes_have_no_entry() {
        assert_eq!(description(4), None);
        assert_eq!(description(-1), None);
        assert_eq!(description(1000), None);
    }

    #[test]
    fn table_has_unique_codes_and_non_empty_text() {
        for (i, (code, text)) in WEATHER_CODES.iter().enumerate() {
            assert!(!text.is_empty(), "code {code} has empty text");
            assert!(
                WEATHER_CODES[i + 1..].iter().all(|(other, _)| other != code),
                "code {code} listed twice"
            );
        }
    }
}
