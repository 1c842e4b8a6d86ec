//! Passport-series prefix to issuing-region lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Returned for any prefix the table does not know.
pub const UNKNOWN_REGION: &str = "UNKNOWN";

static REGIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("45", "Москва"),
        ("46", "Московская"),
        ("65", "Свердловская"),
        ("60", "Ростовская"),
        ("80", "Башкортостан"),
        ("03", "Краснодарский"),
        ("75", "Челябинская"),
        ("32", "Кемеровская"),
        ("52", "Омская"),
        ("92", "Татарстан"),
        ("36", "Самарская"),
        ("18", "Волгоградская"),
        ("40", "Санкт-Петербург"),
        ("50", "Новосибирская"),
        ("63", "Саратовская"),
        ("01", "Алтайский"),
        ("07", "Ставропольский"),
        ("53", "Оренбургская"),
        ("25", "Иркутская"),
        ("04", "Красноярский"),
        ("22", "Нижегородская"),
        ("57", "Пермский"),
        ("20", "Воронежская"),
        ("14", "Белгородская"),
        ("81", "Бурятия"),
        ("12", "Астраханская"),
        ("73", "Ульяновская"),
        ("71", "Тюменская"),
        ("28", "Тверская"),
        ("56", "Пензенская"),
        ("38", "Курская"),
        ("37", "Курганская"),
        ("24", "Ивановская"),
        ("94", "Удмуртская"),
        ("15", "Брянская"),
        ("17", "Владимирская"),
        ("78", "Ярославская"),
        ("61", "Рязанская"),
        ("67", "Тюменская"),
        ("42", "Липецкая"),
        ("66", "Смоленская"),
        ("70", "Тульская"),
        ("33", "Кировская"),
        ("19", "Вологодская"),
        ("83", "Кабардино-Балкарская"),
        ("69", "Томская"),
        ("68", "Тамбовская"),
        ("30", "Краснодарский"),
        ("54", "Орловская"),
        ("11", "Архангельская"),
        ("41", "Ленинградская"),
        ("97", "Чувашская республика -"),
        ("27", "Калининградская"),
        ("05", "Приморский"),
        ("87", "Коми"),
        ("86", "Карелия"),
        ("88", "Марий Эл"),
        ("34", "Костромская"),
        ("29", "Калужская"),
        ("79", "Адыгея"),
        ("08", "Хабаровский"),
        ("89", "Мордовия"),
        ("10", "Алтайский"),
        ("95", "Хакасия"),
        ("58", "Псковская"),
        ("31", "Краснодарский"),
        ("85", "Калмыкия"),
        ("49", "Новгородская"),
        ("47", "Мурманская"),
        ("91", "Карачаево-Черкесская"),
        ("76", "Забайкальский"),
        ("90", "Северная Осетия - Алания"),
        ("98", "Саха /Якутия/"),
        ("84", "Алтайский"),
        ("64", "Сахалинская"),
        ("74", "Ямало-Ненецкий"),
        ("99", "Еврейская"),
        ("62", "Иркутская"),
        ("82", "Дагестан"),
        ("51", "Приморский"),
        ("93", "Тыва"),
        ("39", "Крым"),
        ("48", "Коми"),
        ("44", "Магаданская"),
        ("55", "Ненецкий"),
        ("77", "Чукотский АО"),
        ("96", "Чеченская"),
        ("26", "Ингушетия"),
        ("59", "Таймырский"),
        ("43", "Агинский Бурятский АО"),
    ])
});

/// Resolve a formatted passport series to its issuing region by the first
/// two characters. Total over all inputs.
pub fn region_for_series(series: &str) -> &'static str {
    let prefix: String = series.chars().take(2).collect();
    REGIONS.get(prefix.as_str()).copied().unwrap_or(UNKNOWN_REGION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_prefix_resolves() {
        assert_eq!(region_for_series("45 02"), "Москва");
        assert_eq!(region_for_series("4502"), "Москва");
    }

    #[test]
    fn unknown_prefix_is_total() {
        assert_eq!(region_for_series("00 00"), UNKNOWN_REGION);
        assert_eq!(region_for_series(""), UNKNOWN_REGION);
        assert_eq!(region_for_series("AB"), UNKNOWN_REGION);
    }
}
