//! Flat-file CSV exports: the sectioned input dump and projected day ledgers.

use std::io::Write;

use crate::{
    ledger::{dates::ISO_DATE_FORMAT, LedgerInputs},
    projection::BalancePoint,
};

use super::Result;

/// Writes the inputs as titled CSV sections separated by blank lines: bills, ad-hoc
/// expenses, income entries, the checking account, and the projection window.
pub fn write_snapshot_csv<W: Write>(inputs: &LedgerInputs, mut out: W) -> Result<()> {
    let bills: Vec<[String; 4]> = inputs
        .bills
        .iter()
        .map(|bill| {
            [
                bill.name.clone(),
                bill.day_of_month.to_string(),
                bill.amount.to_string(),
                bill.category.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_section(&mut out, "Bills", &["Name", "Date", "Amount", "Category"], &bills)?;
    out.write_all(b"\n")?;

    let adhoc: Vec<[String; 4]> = inputs
        .adhoc_expenses
        .iter()
        .map(|item| {
            [
                item.name.clone(),
                item.date.format(ISO_DATE_FORMAT).to_string(),
                item.amount.to_string(),
                item.category.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_section(
        &mut out,
        "Adhoc Expenses",
        &["Name", "Date", "Amount", "Category"],
        &adhoc,
    )?;
    out.write_all(b"\n")?;

    let income: Vec<[String; 4]> = inputs
        .income_entries
        .iter()
        .map(|entry| {
            [
                entry.name.clone(),
                entry.amount.to_string(),
                entry.frequency.label().to_string(),
                entry.start_date.format(ISO_DATE_FORMAT).to_string(),
            ]
        })
        .collect();
    write_section(
        &mut out,
        "Income Entries",
        &["Name", "Amount", "Frequency", "Start Date"],
        &income,
    )?;
    out.write_all(b"\n")?;

    write_section(
        &mut out,
        "Checking Account",
        &["Account Name", "Balance"],
        &[[inputs.account_name.clone(), inputs.account_balance.to_string()]],
    )?;
    out.write_all(b"\n")?;

    let start = inputs
        .projection
        .start_date
        .map(|date| date.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default();
    write_section(
        &mut out,
        "Start Date and Projection Length",
        &["Start Date", "Projection Length"],
        &[[start, inputs.projection.length_months.to_string()]],
    )?;
    out.flush()?;
    Ok(())
}

/// Writes one row per projected day with a header row. Works for the checking
/// ledger and for any savings ledger.
pub fn write_day_records_csv<R: BalancePoint, W: Write>(records: &[R], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Date", "Event", "Net Change", "Balance"])?;
    for record in records {
        writer.write_record([
            record.date().format(ISO_DATE_FORMAT).to_string(),
            record.label().to_string(),
            record.net_amount().to_string(),
            record.balance().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_section<W: Write, R: AsRef<[String]>>(
    out: &mut W,
    title: &str,
    header: &[&str],
    rows: &[R],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(&mut *out);
    writer.write_record([title])?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}
