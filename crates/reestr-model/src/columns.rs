//! Canonical column vocabulary for register tables.
//!
//! Input files arrive with heterogeneous layouts; every decoder detects which
//! variant columns are present and rewrites them into the canonical names
//! collected here. Grouped by the decoder that owns them.

/// Person identity fields.
pub mod person {
    pub const FIRST_NAME: &str = "first_name";
    pub const SURNAME: &str = "surname";
    pub const LAST_NAME: &str = "last_name";
    pub const ADDED_NAME: &str = "added_name";
    pub const POSTFIX_NAME: &str = "postfix_name";
    pub const SEX: &str = "sex";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const REG_ADDRESS: &str = "reg_addr";
    pub const HOME_ADDRESS: &str = "home_addr";
    pub const MAIL: &str = "mail";
    pub const MAILS: &str = "mails";
    pub const POSITION: &str = "position";
    pub const WORK: &str = "work";

    /// Full name, surname first ("Фамилия Имя Отчество").
    pub const FIO_FULL: &str = "fio_full";
    /// Full name, given name first.
    pub const IFO_FULL: &str = "ifo_full";

    /// Granular registration-address sub-fields, joined into [`REG_ADDRESS`].
    pub const REG_PARTS: [&str; 6] = ["rg_reg", "np_reg", "st_reg", "hs_reg", "cp_reg", "ft_reg"];
    /// Granular living-address sub-fields, joined into [`HOME_ADDRESS`].
    pub const LIV_PARTS: [&str; 6] = ["rg_liv", "np_liv", "st_liv", "hs_liv", "cp_liv", "ft_liv"];
}

/// Identity document fields.
pub mod passport {
    pub const SERIES: &str = "passport_series";
    pub const NUMBER: &str = "passport_num";
    pub const ORGANIZATION: &str = "passport_org";
    pub const DATE: &str = "passport_date";
    pub const DOCTYPE: &str = "doctype";
    pub const REGION: &str = "region";
    pub const DIVISION_CODE: &str = "division_code";

    /// Combined series+number+organization+date string.
    pub const COMBINED: &str = "passport";
    /// Series and number concatenated, nothing else.
    pub const FULL: &str = "passport_full";
    /// Issuing-division layout, paired with an optional series column.
    pub const DIVISION: &str = "passport_div";
}

/// Debt figures.
pub mod debt {
    pub const TOTAL: &str = "total_debt";
    pub const TOTAL_SUM: &str = "total_sum";
    pub const CURRENT: &str = "current_debt";
    pub const CURRENT_PERCENT: &str = "current_percent";
    pub const CURRENT_CALC: &str = "current_debt_calc";
    pub const CURRENT_PERCENT_CALC: &str = "current_percent_calc";
    pub const OVERDUE: &str = "overdue_debt";
    pub const OVERDUE_PERCENT: &str = "overdue_percent";
    pub const COMISSION: &str = "comission";
    pub const FINES: &str = "fines";
    /// Final current debt.
    pub const FCD: &str = "fcd";
    /// Final current percent.
    pub const FCP: &str = "fcp";
    /// State duty.
    pub const STATE_DUTY: &str = "gp";

    pub const CREDIT_START_DATE: &str = "credit_start_date";
    pub const CREDIT_END_DATE: &str = "credit_end_date";
}

/// Register/lifetime fields.
pub mod register {
    pub const ID: &str = "id";
    pub const CURRENCY: &str = "currency";
    pub const EXTENSION: &str = "extend";
    pub const CLIENT_ID: &str = "client_id";
    pub const CREDIT_ID: &str = "credit_id";
    pub const OUTER_ID: &str = "outer_id";
    pub const PRODUCT: &str = "product";
    pub const PRODUCT_GROUP: &str = "product_group";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const PLACEMENT: &str = "placement";
    pub const REG_NAME: &str = "reg_name";
    pub const REG_DATE: &str = "reg_date";
    pub const SCHEME: &str = "scheme";

    pub const ADDRESS: &str = "address";
    pub const ADDRESS_TYPE: &str = "address_type";
    /// Actual-residence address produced by the address pivot.
    pub const ADDRESS_FACT: &str = "fact";
    /// Registration address produced by the address pivot.
    pub const ADDRESS_REG: &str = "reg";
}

/// Phone fields.
pub mod phones {
    pub const MULTIPLE: &str = "phones";
    pub const PHONE_TYPE: &str = "phone_type";
    pub const TYPE: &str = "type";
    pub const CONTACT: &str = "contact_person";
    pub const ZAIM: &str = "phone_num_zaim";
    pub const ZAIM_CODE: &str = "zaim_phone_code";
    pub const ZAIM_REST: &str = "zaim_phone_rest";

    pub const CODE_SUFFIX: &str = "_code";
    pub const BODY_SUFFIX: &str = "_body";

    /// Highest recognized ordinal for `p<N>` / `phones_<N>` columns.
    pub const MAX_SLOT: usize = 20;
}

/// Sheet names of the multi-sheet (POST) input shape.
pub mod sheets {
    pub const CONTRACTS: &str = "Договоры";
    pub const TELEPHONES: &str = "Телефоны";
    pub const ADDRESSES: &str = "Адреса";
}

/// Prefix of synthetic positional index columns dropped by the final cleanup.
pub const SYNTHETIC_INDEX_PREFIX: &str = "Unnamed";

/// Date-bearing fields parsed by the date decoder.
pub const DATE_FIELDS: [&str; 4] = [
    person::BIRTH_DATE,
    passport::DATE,
    debt::CREDIT_START_DATE,
    debt::CREDIT_END_DATE,
];
