//! Debt decoder: total-sum computation and collection-scheme classification.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_ingest::is_null_sentinel;
use reestr_model::Scheme;
use reestr_model::columns::{debt, register};

use crate::context::DecodeContext;
use crate::data_utils::{
    has_column, has_columns, numeric_column, numeric_column_or_zeros, set_f64_column,
    set_string_column, string_column,
};
use crate::decoder::FieldDecoder;

/// Mutually exclusive input shapes, selected by column presence in this
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebtShape {
    /// Final current figures are present; sum every component.
    FinalFigures,
    /// No current figures at all; overdue components only.
    Shortcut,
    /// Current figures present; derive the non-overdue remainders first.
    CurrentFigures,
}

fn detect_shape(df: &DataFrame) -> DebtShape {
    if has_columns(df, &[debt::FCD, debt::FCP]) {
        DebtShape::FinalFigures
    } else if !has_columns(df, &[debt::CURRENT, debt::CURRENT_PERCENT]) {
        DebtShape::Shortcut
    } else {
        DebtShape::CurrentFigures
    }
}

pub struct DebtDecoder;

impl FieldDecoder for DebtDecoder {
    fn name(&self) -> &'static str {
        "debt"
    }

    fn decode(&self, mut df: DataFrame, _ctx: &DecodeContext) -> Result<DataFrame> {
        if let Err(error) = clean_total_debt(&mut df) {
            warn!(%error, "total debt cleanup failed");
        }
        let shape = detect_shape(&df);
        if let Err(error) = compute_total_sum(&mut df, shape) {
            warn!(?shape, %error, "total sum computation failed");
        }
        if let Err(error) = assign_scheme(&mut df) {
            warn!(%error, "scheme assignment failed");
        }
        Ok(df)
    }
}

/// Null sentinels in the declared total are zero debt; any other
/// non-numeric value is left for the scheme step to flag per row.
fn clean_total_debt(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, debt::TOTAL) {
        return Ok(());
    }
    let values = string_column(df, debt::TOTAL)?
        .into_iter()
        .map(|value| {
            if is_null_sentinel(&value) {
                "0".to_string()
            } else {
                value
            }
        })
        .collect();
    set_string_column(df, debt::TOTAL, values)?;
    Ok(())
}

fn compute_total_sum(df: &mut DataFrame, shape: DebtShape) -> Result<()> {
    let height = df.height();
    let total: Vec<f64> = match shape {
        DebtShape::FinalFigures => {
            info!("final current figures found, summing all components");
            let terms = [
                numeric_column_or_zeros(df, debt::FCD),
                numeric_column_or_zeros(df, debt::FCP),
                numeric_column_or_zeros(df, debt::OVERDUE),
                numeric_column_or_zeros(df, debt::OVERDUE_PERCENT),
                numeric_column_or_zeros(df, debt::FINES),
                numeric_column_or_zeros(df, debt::COMISSION),
                numeric_column_or_zeros(df, debt::STATE_DUTY),
            ];
            sum_terms(&terms, height)
        }
        DebtShape::Shortcut => {
            info!("no current figures, applying overdue-only total");
            let terms = [
                numeric_column_or_zeros(df, debt::OVERDUE),
                numeric_column_or_zeros(df, debt::OVERDUE_PERCENT),
                numeric_column_or_zeros(df, debt::COMISSION),
                numeric_column_or_zeros(df, debt::FINES),
            ];
            sum_terms(&terms, height)
        }
        DebtShape::CurrentFigures => {
            info!("current figures found, deriving calculated remainders");
            let current = numeric_column_or_zeros(df, debt::CURRENT);
            let current_percent = numeric_column_or_zeros(df, debt::CURRENT_PERCENT);
            let overdue = numeric_column_or_zeros(df, debt::OVERDUE);
            let overdue_percent = numeric_column_or_zeros(df, debt::OVERDUE_PERCENT);

            let current_calc: Vec<f64> = current
                .iter()
                .zip(&overdue)
                .map(|(current, overdue)| current - overdue)
                .collect();
            let current_percent_calc: Vec<f64> = current_percent
                .iter()
                .zip(&overdue_percent)
                .map(|(current, overdue)| current - overdue)
                .collect();
            set_f64_column(df, debt::CURRENT_CALC, current_calc.clone())?;
            set_f64_column(df, debt::CURRENT_PERCENT_CALC, current_percent_calc.clone())?;

            let terms = [
                current_calc,
                overdue,
                current_percent_calc,
                overdue_percent,
                numeric_column_or_zeros(df, debt::COMISSION),
                numeric_column_or_zeros(df, debt::FINES),
            ];
            sum_terms(&terms, height)
        }
    };
    set_f64_column(df, debt::TOTAL_SUM, total)?;
    Ok(())
}

fn sum_terms(terms: &[Vec<f64>], height: usize) -> Vec<f64> {
    (0..height)
        .map(|row| terms.iter().map(|term| term[row]).sum())
        .collect()
}

/// Classification is skipped entirely when either total is absent; per-row
/// failures are recorded in-band, never raised.
fn assign_scheme(df: &mut DataFrame) -> Result<()> {
    if !has_columns(df, &[debt::TOTAL, debt::TOTAL_SUM]) {
        info!("declared or computed total absent, skipping scheme");
        return Ok(());
    }
    let declared = numeric_column(df, debt::TOTAL)?;
    let computed = numeric_column(df, debt::TOTAL_SUM)?;
    let mut failed = 0usize;
    let values = declared
        .into_iter()
        .zip(computed)
        .map(|(declared, computed)| {
            let scheme = Scheme::classify(declared, computed);
            if scheme == Scheme::Failed {
                failed += 1;
            }
            scheme.as_str().to_string()
        })
        .collect();
    if failed > 0 {
        warn!(failed, "rows without a computable scheme");
    }
    set_string_column(df, register::SCHEME, values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    fn decode(df: DataFrame) -> DataFrame {
        DebtDecoder
            .decode(df, &DecodeContext::default())
            .expect("decode")
    }

    fn floats(df: &DataFrame, name: &str) -> Vec<f64> {
        numeric_column(df, name)
            .expect(name)
            .into_iter()
            .map(|value| value.expect("numeric"))
            .collect()
    }

    #[test]
    fn final_figures_branch_wins_over_current_figures() {
        let df = DataFrame::new(vec![
            Column::new(debt::FCD.into(), [100.0]),
            Column::new(debt::FCP.into(), [10.0]),
            Column::new(debt::CURRENT.into(), [999.0]),
            Column::new(debt::CURRENT_PERCENT.into(), [999.0]),
            Column::new(debt::OVERDUE.into(), [5.0]),
            Column::new(debt::FINES.into(), [1.0]),
        ])
        .expect("frame");
        let decoded = decode(df);
        // fcd + fcp + overdue + fines; the current figures never contribute.
        assert_eq!(floats(&decoded, debt::TOTAL_SUM), [116.0]);
        assert!(!has_column(&decoded, debt::CURRENT_CALC));
    }

    #[test]
    fn shortcut_branch_sums_overdue_components() {
        let df = DataFrame::new(vec![
            Column::new(debt::OVERDUE.into(), [50.0, 0.0]),
            Column::new(debt::OVERDUE_PERCENT.into(), [5.0, 1.0]),
            Column::new(debt::COMISSION.into(), [1.0, 1.0]),
        ])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(floats(&decoded, debt::TOTAL_SUM), [56.0, 2.0]);
    }

    #[test]
    fn current_figures_branch_derives_remainders() {
        let df = DataFrame::new(vec![
            Column::new(debt::CURRENT.into(), [100.0]),
            Column::new(debt::CURRENT_PERCENT.into(), [20.0]),
            Column::new(debt::OVERDUE.into(), [30.0]),
            Column::new(debt::OVERDUE_PERCENT.into(), [5.0]),
        ])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(floats(&decoded, debt::CURRENT_CALC), [70.0]);
        assert_eq!(floats(&decoded, debt::CURRENT_PERCENT_CALC), [15.0]);
        // 70 + 30 + 15 + 5 = declared current totals reassembled.
        assert_eq!(floats(&decoded, debt::TOTAL_SUM), [120.0]);
    }

    #[test]
    fn scheme_compares_rounded_totals() {
        let df = DataFrame::new(vec![
            Column::new(debt::TOTAL.into(), ["1000.4", "500.0", "null"]),
            Column::new(debt::OVERDUE.into(), [1000.6, 400.0, 0.0]),
        ])
        .expect("frame");
        let decoded = decode(df);
        let schemes = string_column(&decoded, register::SCHEME).expect("scheme");
        assert_eq!(
            schemes,
            ["FULL_COLLECT", "BACK_TO_SCHEDULE", "FULL_COLLECT"]
        );
    }

    #[test]
    fn row_level_failure_is_in_band() {
        let df = DataFrame::new(vec![
            Column::new(debt::TOTAL.into(), ["не число"]),
            Column::new(debt::OVERDUE.into(), [10.0]),
        ])
        .expect("frame");
        let decoded = decode(df);
        let schemes = string_column(&decoded, register::SCHEME).expect("scheme");
        assert_eq!(schemes, ["UNABLE TO SET FIELDS"]);
    }

    #[test]
    fn no_declared_total_means_no_scheme() {
        let df = DataFrame::new(vec![Column::new(debt::OVERDUE.into(), [10.0])])
            .expect("frame");
        let decoded = decode(df);
        assert!(!has_column(&decoded, register::SCHEME));
    }
}
