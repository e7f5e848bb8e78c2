//! Built-in example workbook: monthly rainy days in two cities.

use cellgrid_engine::engine::Coord;

use super::Sheet;
use crate::error::Result;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const SF: [&str; 12] = ["8", "8", "8", "4", "2", "0", "0", "0", "0", "2", "6", "8"];
const VANCOUVER: [&str; 12] = ["15", "13", "14", "12", "9", "7", "4", "4", "6", "12", "16", "15"];

const SUMMARY: &[(&str, &str)] = &[
    ("E0", "SF"),
    ("F0", "Vancouver"),
    ("D1", "mean (μ)"),
    ("E1", "=mean(B1:B12)"),
    ("F1", "=mean(C1:C12)"),
    ("D2", "median"),
    ("E2", "=median(B1:B12)"),
    ("F2", "=median(C1:C12)"),
    ("D3", "std (σ)"),
    ("E3", "=std(B1:B12)"),
    ("F3", "=std(C1:C12)"),
    ("E5", "Hello World!"),
    ("E6", "本日は晴天なり"),
    ("F5", "I am Error"),
    // Month names are not numbers, so this one always fails.
    ("F6", "=std(A1:A12)"),
];

impl Sheet {
    /// A sheet pre-filled with the example data, with A0 selected.
    pub fn sample() -> Result<Sheet> {
        let mut sheet = Sheet::new();

        sheet.set_cell("A0", "# Rainy Days")?;
        sheet.set_cell("B0", "SF")?;
        sheet.set_cell("C0", "Vancouver")?;
        for (i, ((month, sf), vancouver)) in MONTHS.iter().zip(SF).zip(VANCOUVER).enumerate() {
            let row = i + 1;
            sheet.grid.set_raw_value(Coord::new(row, 0), month);
            sheet.grid.set_raw_value(Coord::new(row, 1), sf);
            sheet.grid.set_raw_value(Coord::new(row, 2), vancouver);
        }
        for (key, raw) in SUMMARY {
            sheet.set_cell(key, raw)?;
        }

        sheet.select(Coord::new(0, 0));
        Ok(sheet)
    }
}
