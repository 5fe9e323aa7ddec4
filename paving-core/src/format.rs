//! Output-record formatting.
//!
//! A computed quote leaves the engine as a flat record of named decimal
//! strings: volumes and tonnages at two decimal places, final tons as
//! whole numbers, cost lines at two decimal places, and section/grand
//! totals with en-US thousands grouping.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::calculations::section::SectionResult;

/// Formats a dollar amount or measurement with exactly two decimal
/// places, half-up rounded.
pub fn fmt_amount(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

/// Formats a total with en-US thousands grouping and two decimal places,
/// e.g. `12,345.60`.
pub fn fmt_money(value: Decimal) -> String {
    let plain = fmt_amount(value);
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits
        .split_once('.')
        .expect("fmt_amount always emits two decimals");
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Formats a whole-number quantity (final tons) without decimals.
pub fn fmt_whole(value: Decimal) -> String {
    value.normalize().to_string()
}

fn group_thousands(int_part: &str) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }
    grouped
}

/// Writes one section's take-offs, cost lines, and total into a flat
/// record, keyed `<section_key>.<field>`.
pub fn write_section(out: &mut BTreeMap<String, String>, section: &SectionResult) {
    let prefix = section.key;
    for take in &section.materials {
        let mat = take.material.as_str();
        let q = &take.quantity;
        out.insert(
            format!("{prefix}.{mat}_volume_cu_ft"),
            fmt_amount(q.volume_cu_ft),
        );
        out.insert(
            format!("{prefix}.{mat}_tons"),
            fmt_amount(q.tons_before_waste),
        );
        out.insert(
            format!("{prefix}.{mat}_waste_tons"),
            fmt_amount(q.waste_tons),
        );
        out.insert(
            format!("{prefix}.{mat}_final_tons"),
            fmt_whole(q.final_tons),
        );
    }
    for line in &section.lines {
        out.insert(format!("{prefix}.{}", line.key), fmt_amount(line.amount));
    }
    out.insert(format!("{prefix}.total"), fmt_money(section.total));
}

/// Flattens a whole quote: every section plus the commission
/// pass-through and the grand total.
pub fn quote_record(
    sections: &[&SectionResult],
    commission_amount: Decimal,
    grand_total: Decimal,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for section in sections {
        write_section(&mut out, section);
    }
    out.insert("commission_amount".to_string(), fmt_amount(commission_amount));
    out.insert("grand_total".to_string(), fmt_money(grand_total));
    out
}
