//! Person decoder: names, sex, workplace, mail, addresses.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_ingest::is_null_sentinel;
use reestr_model::columns::person;

use crate::context::DecodeContext;
use crate::data_utils::{
    drop_columns, has_column, has_columns, set_string_column, string_column,
};
use crate::decoder::FieldDecoder;
use crate::text_utils::char_suffix;

/// Which full-name layout the sheet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameLayout {
    /// "Фамилия Имя Отчество [доп.]" — surname first.
    SurnameFirst,
    /// "Имя Фамилия Отчество [доп. постфикс]" — given name first.
    GivenFirst,
}

impl NameLayout {
    fn source_column(self) -> &'static str {
        match self {
            NameLayout::SurnameFirst => person::FIO_FULL,
            NameLayout::GivenFirst => person::IFO_FULL,
        }
    }

    fn max_tokens(self) -> usize {
        match self {
            NameLayout::SurnameFirst => 4,
            NameLayout::GivenFirst => 5,
        }
    }

    /// Target columns in token order.
    fn targets(self) -> &'static [&'static str] {
        match self {
            NameLayout::SurnameFirst => &[
                person::SURNAME,
                person::FIRST_NAME,
                person::LAST_NAME,
                person::ADDED_NAME,
            ],
            NameLayout::GivenFirst => &[
                person::FIRST_NAME,
                person::SURNAME,
                person::LAST_NAME,
                person::ADDED_NAME,
                person::POSTFIX_NAME,
            ],
        }
    }
}

pub struct PersonDecoder;

impl FieldDecoder for PersonDecoder {
    fn name(&self) -> &'static str {
        "person"
    }

    fn decode(&self, mut df: DataFrame, ctx: &DecodeContext) -> Result<DataFrame> {
        // Sub-steps are independent; one failing must not stop the rest.
        if let Err(error) = split_names(&mut df) {
            warn!(%error, "name split failed, leaving name columns as-is");
        }
        if let Err(error) = find_sex(&mut df) {
            warn!(%error, "sex derivation failed");
        }
        if let Err(error) = map_workplace(&mut df, ctx) {
            warn!(%error, "workplace mapping failed");
        }
        if let Err(error) = map_mail(&mut df) {
            warn!(%error, "mail mapping failed");
        }
        if let Err(error) = concat_addresses(&mut df) {
            warn!(%error, "address concatenation failed");
        }
        Ok(df)
    }
}

/// Split a raw full name into layout positions. Wrong token counts are
/// retried with empty tokens filtered out; rows that still do not fit are
/// reported as `None` and left blank by the caller.
fn split_tokens(value: &str, max: usize) -> Option<Vec<String>> {
    let plain: Vec<&str> = value.split(' ').collect();
    let plain_fits =
        (3..=max).contains(&plain.len()) && plain.iter().all(|token| !token.is_empty());
    let tokens = if plain_fits {
        plain
    } else {
        let filtered: Vec<&str> = value.split(' ').filter(|token| !token.is_empty()).collect();
        match filtered.len() {
            0..=2 => return None,
            n if n <= max => filtered,
            _ => filtered.into_iter().take(max).collect(),
        }
    };
    Some(tokens.into_iter().map(str::to_string).collect())
}

fn split_names(df: &mut DataFrame) -> Result<()> {
    for layout in [NameLayout::SurnameFirst, NameLayout::GivenFirst] {
        let source = layout.source_column();
        if !has_column(df, source) {
            continue;
        }
        info!(column = source, "full-name column found, splitting names");
        let raw = string_column(df, source)?;
        let targets = layout.targets();
        let mut split: Vec<Vec<String>> = vec![vec![String::new(); raw.len()]; targets.len()];
        let mut failed = 0usize;
        for (row, value) in raw.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match split_tokens(value, layout.max_tokens()) {
                Some(tokens) => {
                    for (slot, token) in tokens.into_iter().enumerate() {
                        split[slot][row] = token;
                    }
                }
                None => failed += 1,
            }
        }
        if failed > 0 {
            warn!(column = source, failed, "rows left blank after name split");
        }
        for (slot, target) in targets.iter().enumerate() {
            // Optional trailing positions only materialize when some row
            // actually filled them.
            if slot >= 3 && split[slot].iter().all(String::is_empty) {
                continue;
            }
            set_string_column(df, target, std::mem::take(&mut split[slot]))?;
        }
    }
    Ok(())
}

fn find_sex(df: &mut DataFrame) -> Result<()> {
    if has_column(df, person::SEX) {
        info!("explicit sex column found, normalizing");
        let values = string_column(df, person::SEX)?
            .into_iter()
            .map(|value| {
                if matches!(value.as_str(), "Женский" | "1" | "Ж") {
                    "Ж".to_string()
                } else {
                    "М".to_string()
                }
            })
            .collect();
        set_string_column(df, person::SEX, values)?;
        return Ok(());
    }
    if has_column(df, person::LAST_NAME) {
        info!("no sex column, inferring from last name suffix");
        let values = string_column(df, person::LAST_NAME)?
            .iter()
            .map(|last_name| sex_from_last_name(last_name).to_string())
            .collect();
        set_string_column(df, person::SEX, values)?;
    }
    Ok(())
}

/// Patronymic/surname suffixes "ич", "ов", "ин" mark male names.
fn sex_from_last_name(last_name: &str) -> &'static str {
    let suffix = char_suffix(last_name, 2);
    if matches!(suffix.as_str(), "ич" | "ов" | "ин") {
        "М"
    } else {
        "Ж"
    }
}

fn map_workplace(df: &mut DataFrame, ctx: &DecodeContext) -> Result<()> {
    if !has_column(df, person::POSITION) {
        return Ok(());
    }
    info!("position column found, mapping workplace");
    let default = ctx.config.workplace.clone();
    let values = string_column(df, person::POSITION)?
        .into_iter()
        .map(|value| {
            if is_null_sentinel(&value) {
                default.clone()
            } else {
                value
            }
        })
        .collect();
    set_string_column(df, person::WORK, values)?;
    Ok(())
}

fn map_mail(df: &mut DataFrame) -> Result<()> {
    if has_column(df, person::MAIL) {
        info!("single mail column found");
        let values = string_column(df, person::MAIL)?
            .into_iter()
            .map(|value| {
                let lowered = value.to_lowercase();
                if lowered == "не задано" || is_null_sentinel(&lowered) {
                    String::new()
                } else {
                    lowered
                }
            })
            .collect();
        set_string_column(df, person::MAIL, values)?;
    }
    if has_column(df, person::MAILS) {
        info!("multi-valued mails column found, splitting");
        let raw = string_column(df, person::MAILS)?;
        let split: Vec<Vec<String>> = raw
            .iter()
            .map(|value| {
                value
                    .split(',')
                    .map(|address| address.trim().to_string())
                    .filter(|address| !address.is_empty())
                    .collect()
            })
            .collect();
        let widest = split.iter().map(Vec::len).max().unwrap_or(0);
        for slot in 0..widest {
            let column: Vec<String> = split
                .iter()
                .map(|addresses| addresses.get(slot).cloned().unwrap_or_default())
                .collect();
            set_string_column(df, &format!("m{}", slot + 1), column)?;
        }
    }
    Ok(())
}

fn concat_addresses(df: &mut DataFrame) -> Result<()> {
    for (parts, target) in [
        (person::REG_PARTS, person::REG_ADDRESS),
        (person::LIV_PARTS, person::HOME_ADDRESS),
    ] {
        if !has_columns(df, &parts) {
            continue;
        }
        info!(target, "granular address columns found, concatenating");
        let columns: Vec<Vec<String>> = parts
            .iter()
            .map(|part| string_column(df, part))
            .collect::<Result<_>>()?;
        let joined: Vec<String> = (0..df.height())
            .map(|row| {
                columns
                    .iter()
                    .map(|column| column[row].as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();
        set_string_column(df, target, joined)?;
        drop_columns(df, &parts);
    }
    if has_columns(df, &[person::REG_ADDRESS, person::HOME_ADDRESS]) {
        let reg = string_column(df, person::REG_ADDRESS)?;
        let home = string_column(df, person::HOME_ADDRESS)?
            .into_iter()
            .zip(reg.iter())
            .map(|(home, reg)| if home == *reg { String::new() } else { home })
            .collect();
        set_string_column(df, person::HOME_ADDRESS, home)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    fn decode(df: DataFrame) -> DataFrame {
        PersonDecoder
            .decode(df, &DecodeContext::default())
            .expect("decode")
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        string_column(df, name).expect(name)
    }

    #[test]
    fn surname_first_layout_splits_into_positions() {
        let df = DataFrame::new(vec![Column::new(
            person::FIO_FULL.into(),
            ["Иванова Мария Петровна", "Петров  Пётр Сергеевич"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, person::SURNAME), ["Иванова", "Петров"]);
        assert_eq!(strings(&decoded, person::FIRST_NAME), ["Мария", "Пётр"]);
        assert_eq!(
            strings(&decoded, person::LAST_NAME),
            ["Петровна", "Сергеевич"]
        );
    }

    #[test]
    fn unsplittable_rows_stay_blank() {
        let df = DataFrame::new(vec![Column::new(
            person::FIO_FULL.into(),
            ["Иванов Иван Иванович", "Иванов"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, person::SURNAME), ["Иванов", ""]);
    }

    #[test]
    fn sex_inferred_from_last_name_when_absent() {
        let df = DataFrame::new(vec![Column::new(
            person::LAST_NAME.into(),
            ["Сергеевич", "Петровна", "Ильин"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, person::SEX), ["М", "Ж", "М"]);
    }

    #[test]
    fn explicit_sex_wins_over_inference() {
        let df = DataFrame::new(vec![
            Column::new(person::SEX.into(), ["Женский", "Мужской", "1"]),
            Column::new(person::LAST_NAME.into(), ["Иванов", "Иванов", "Иванов"]),
        ])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, person::SEX), ["Ж", "М", "Ж"]);
    }

    #[test]
    fn blank_position_gets_default_workplace() {
        let df = DataFrame::new(vec![Column::new(
            person::POSITION.into(),
            ["инженер", "", "null"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, person::WORK), ["инженер", "ООО", "ООО"]);
    }

    #[test]
    fn mail_lowercased_and_sentinels_blanked() {
        let df = DataFrame::new(vec![Column::new(
            person::MAIL.into(),
            ["USER@Example.COM", "не задано", "NULL"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, person::MAIL),
            ["user@example.com", "", ""]
        );
    }

    #[test]
    fn multi_mail_splits_into_slots() {
        let df = DataFrame::new(vec![Column::new(
            person::MAILS.into(),
            ["a@x.ru, b@x.ru", "c@x.ru"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, "m1"), ["a@x.ru", "c@x.ru"]);
        assert_eq!(strings(&decoded, "m2"), ["b@x.ru", ""]);
    }

    #[test]
    fn addresses_concatenate_and_duplicates_blank() {
        let mut columns = Vec::new();
        for part in person::REG_PARTS {
            columns.push(Column::new(part.into(), ["обл", "обл"]));
        }
        for part in person::LIV_PARTS {
            columns.push(Column::new(part.into(), ["обл", "город"]));
        }
        let decoded = decode(DataFrame::new(columns).expect("frame"));
        let reg = strings(&decoded, person::REG_ADDRESS);
        let home = strings(&decoded, person::HOME_ADDRESS);
        assert_eq!(reg[0], "обл, обл, обл, обл, обл, обл");
        // Identical home address carries no information.
        assert_eq!(home[0], "");
        assert_eq!(home[1], "город, город, город, город, город, город");
        assert!(!has_column(&decoded, "rg_reg"));
    }
}
