// src/engine/tabular.rs

use csv::{ReaderBuilder, Trim};

use crate::models::response::{RawResponseRow, ResponseTable};

/// Parses comma-separated text whose first line holds the headers.
///
/// * Every header and value is trimmed; a leading BOM is dropped.
/// * Quoted fields are honoured, so `"Pérez, Ana"` stays one value.
/// * Blank lines, and lines whose fields are all empty, are skipped.
/// * Missing trailing fields become `""`; fields past the last header are ignored.
///
/// Empty input yields an empty table.
pub fn parse_table(text: &str) -> Result<ResponseTable, csv::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(ResponseTable::default());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row: RawResponseRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ResponseTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_trims_values() {
        let table = parse_table("ID , Nombre\n 12345 ,  Ana \n").unwrap();
        assert_eq!(table.headers, vec!["ID", "Nombre"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("ID"), "12345");
        assert_eq!(table.rows[0].get("Nombre"), "Ana");
    }

    #[test]
    fn skips_blank_lines_and_pads_missing_fields() {
        let table = parse_table("a,b,c\n1,2,3\n\n   \n4\n,,\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("a"), "4");
        assert_eq!(table.rows[1].get("b"), "");
        assert_eq!(table.rows[1].get("c"), "");
    }

    #[test]
    fn quoted_commas_stay_in_one_field() {
        let table = parse_table("ID,Nombre\n12345,\"Pérez, Ana\"\n").unwrap();
        assert_eq!(table.rows[0].get("Nombre"), "Pérez, Ana");
    }

    #[test]
    fn extra_fields_are_ignored_and_bom_is_dropped() {
        let table = parse_table("\u{feff}ID\n12345,extra\n").unwrap();
        assert_eq!(table.headers, vec!["ID"]);
        assert_eq!(table.rows[0].fields.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_table() {
        assert!(parse_table("").unwrap().is_empty());
        assert!(parse_table(" \n \n").unwrap().is_empty());
    }

    #[test]
    fn header_only_has_no_rows() {
        let table = parse_table("ID,Nombre\n").unwrap();
        assert_eq!(table.headers.len(), 2);
        assert!(table.is_empty());
    }
}
