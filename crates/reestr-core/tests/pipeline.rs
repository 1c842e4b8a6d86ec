//! End-to-end pipeline tests over both input shapes.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame};

use reestr_core::processor::{DataProcessor, PostSheets};
use reestr_ingest::any_to_string;
use reestr_model::DecodeConfig;
use reestr_model::columns::{passport, person, register, sheets};

fn processor() -> DataProcessor {
    DataProcessor::new(DecodeConfig::default())
}

fn strings(df: &DataFrame, name: &str) -> Vec<String> {
    let column = df.column(name).expect(name);
    (0..df.height())
        .map(|idx| {
            any_to_string(column.get(idx).unwrap_or(AnyValue::Null))
                .trim()
                .to_string()
        })
        .collect()
}

#[test]
fn combined_passport_decodes_through_the_pipeline() {
    let value = format!("4512{}{}{}", "5678901", "ОВД г. Москвы", " 01.02.2010");
    let df = DataFrame::new(vec![Column::new(passport::COMBINED.into(), [value])])
        .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");

    assert_eq!(strings(&decoded, passport::SERIES), ["45 12"]);
    assert_eq!(strings(&decoded, passport::NUMBER), ["5678901"]);
    assert_eq!(strings(&decoded, passport::DATE), ["01.02.2010"]);
    assert_eq!(strings(&decoded, passport::DOCTYPE), ["Паспорт РФ"]);
    assert_eq!(strings(&decoded, passport::REGION), ["Москва"]);
}

#[test]
fn multi_valued_phones_expand_to_e164_slots() {
    let df = DataFrame::new(vec![Column::new(
        "phones".into(),
        ["+79161234567,89031234567"],
    )])
    .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");

    assert_eq!(strings(&decoded, "phones|p1"), ["+79161234567"]);
    assert_eq!(strings(&decoded, "phones|p2"), ["+79031234567"]);
    assert_eq!(strings(&decoded, "phones|p1_code"), ["916"]);
    assert_eq!(strings(&decoded, "phones|p2_body"), ["1234567"]);
}

#[test]
fn product_groups_classify_without_exceptions() {
    let df = DataFrame::new(vec![Column::new(
        register::PRODUCT_GROUP.into(),
        ["Автокредит", "Unknown Label"],
    )])
    .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");

    assert_eq!(
        strings(&decoded, register::PRODUCT),
        ["CAR", "NO_CLASSIFICATION"]
    );
    assert_eq!(
        strings(&decoded, register::PRODUCT_NAME),
        ["Автокредит", "NO_CLASSIFICATION"]
    );
}

#[test]
fn near_equal_totals_classify_full_collect() {
    let df = DataFrame::new(vec![
        Column::new("total_debt".into(), ["1000.4"]),
        Column::new("overdue_debt".into(), [1000.6]),
    ])
    .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");

    assert_eq!(strings(&decoded, register::SCHEME), ["FULL_COLLECT"]);
}

#[test]
fn foreign_currency_flags_in_band() {
    let df = DataFrame::new(vec![
        Column::new(register::CURRENCY.into(), ["USD", "USD"]),
        Column::new("id".into(), ["1", "2"]),
    ])
    .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");

    assert_eq!(
        strings(&decoded, register::CURRENCY),
        ["ERROR_CHECK_CURRENCY", "ERROR_CHECK_CURRENCY"]
    );
}

#[test]
fn row_count_survives_the_single_sheet_pipeline() {
    let df = DataFrame::new(vec![
        Column::new(person::FIO_FULL.into(), ["Иванов Иван Иванович", "Петрова Анна Сергеевна"]),
        Column::new("total_debt".into(), ["100", "200"]),
    ])
    .expect("frame");

    let decoded = processor().process_table(df).expect("pipeline");
    assert_eq!(decoded.height(), 2);
    assert_eq!(strings(&decoded, person::SEX), ["М", "Ж"]);
}

fn post_sheets() -> PostSheets {
    let contracts = DataFrame::new(vec![
        Column::new(register::ID.into(), ["1", "2"]),
        Column::new(
            person::FIO_FULL.into(),
            ["Иванов Иван Иванович", "Петрова Анна Сергеевна"],
        ),
        Column::new(register::CURRENCY.into(), ["RUB", "RUB"]),
    ])
    .expect("contracts");
    let phones = DataFrame::new(vec![
        Column::new(register::ID.into(), ["1", "1", "2"]),
        Column::new("p1".into(), ["89161111111", "89162222222", "89163333333"]),
        Column::new(
            "phone_type".into(),
            ["Мобильный", "Рабочий", "Мобильный"],
        ),
    ])
    .expect("phones");
    let addresses = DataFrame::new(vec![
        Column::new(register::ID.into(), ["1", "2"]),
        Column::new(register::ADDRESS.into(), ["ул. Ленина 1", "пр. Мира 2"]),
        Column::new(
            register::ADDRESS_TYPE.into(),
            ["Фактический", "Регистрация"],
        ),
    ])
    .expect("addresses");
    PostSheets {
        contracts,
        phones,
        addresses,
    }
}

#[test]
fn post_shape_joins_three_entities_on_id() {
    let merged = processor().process_post(post_sheets()).expect("post");

    assert_eq!(merged.height(), 2);
    assert_eq!(strings(&merged, "p1"), ["+79161111111", "+79163333333"]);
    assert_eq!(strings(&merged, "p2"), ["+79162222222", ""]);
    assert_eq!(strings(&merged, register::ADDRESS_FACT), ["ул. Ленина 1", ""]);
    assert_eq!(strings(&merged, register::ADDRESS_REG), ["", "пр. Мира 2"]);
    assert_eq!(strings(&merged, register::CURRENCY), ["RUR", "RUR"]);
}

#[test]
fn post_shape_without_phone_type_fails_the_run() {
    let mut input = post_sheets();
    input.phones = input.phones.drop("phone_type").expect("drop");
    let error = processor().process_post(input).expect_err("must fail");
    assert!(error.to_string().contains("phone sheet"));
}

#[test]
fn sheet_map_resolves_known_sheet_names() {
    let source = post_sheets();
    let mut map = BTreeMap::new();
    map.insert(sheets::CONTRACTS.to_string(), source.contracts);
    map.insert(sheets::TELEPHONES.to_string(), source.phones);
    map.insert(sheets::ADDRESSES.to_string(), source.addresses);
    assert!(PostSheets::from_map(map).is_ok());

    let error = PostSheets::from_map(BTreeMap::new()).expect_err("must fail");
    assert!(error.to_string().contains(sheets::CONTRACTS));
}
