//! Delimited (CSV) rendering of a [`ReportTable`].

use crate::report::table::ReportTable;
use crate::{FlowenError, FlowenResult};

/// Serialize the table as CSV bytes: one header row, then the data rows in
/// input order. Numeric cells keep full precision; the caller rounds before
/// building the table if it wants display formatting.
pub fn to_delimited(table: &ReportTable) -> FlowenResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.render()))?;
    }
    wtr.into_inner().map_err(|e| FlowenError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::table::Cell;
    use rust_decimal_macros::dec;

    #[test]
    fn full_precision_and_header_survive() {
        let table = ReportTable {
            headers: vec!["Account".into(), "Debt".into()],
            rows: vec![vec![Cell::Text("A-1".into()), Cell::Number(dec!(145000.125))]],
        };
        let bytes = to_delimited(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "Account,Debt\nA-1,145000.125\n");
    }

    #[test]
    fn zero_rows_is_header_only_not_an_error() {
        let table = ReportTable {
            headers: vec!["Account".into()],
            rows: vec![],
        };
        let text = String::from_utf8(to_delimited(&table).unwrap()).unwrap();
        assert_eq!(text, "Account\n");
    }
}
