//! Product-group taxonomy.
//!
//! Sources label a contract's product with free text; the register needs the
//! closed CARD/CAR/POS/CASH set. Card products form an open-ended family of
//! tariff names, so they are matched by membership; the rest by equality.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use reestr_model::Product;

static CARD_GROUP: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "НСО",
        "МТС MICRON",
        "МТС Деньги GRACE",
        "Кредитная карта в рамках Пассивных продаж GRACE",
        "КЗП",
        "КЗП GRACE",
        "МТС Деньги",
        "Расчетная карта с РО",
        "Расчетные карты VIP/Premium Card GRACE",
    ])
});

/// Whether a product-group label names one of the card tariffs.
pub fn is_card_product(group: &str) -> bool {
    CARD_GROUP.contains(group.trim())
}

/// Map a free-text product-group label to the closed product set.
/// Unrecognized labels classify explicitly instead of erroring.
pub fn classify_product(group: &str) -> Product {
    let group = group.trim();
    if is_card_product(group) {
        return Product::Card;
    }
    match group {
        "Автокредит" => Product::Car,
        "Целевой потребительский кредит" => Product::Pos,
        "Нецелевой потребительский кредит" => Product::Cash,
        _ => Product::Unclassified,
    }
}
