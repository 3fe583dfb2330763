//! Table-row flight parsing
//!
//! Alternate input path for documents that arrive as pre-extracted table
//! rows (cell lists) instead of flowing text. Column structure is mostly
//! fixed, so rows are parsed positionally: the seven-cell day block is
//! located first and everything before it is walked as status, flight
//! number and route cells.

use regex::Regex;
use tracing::debug;

use crate::app::models::FlightRecord;
use crate::constants::{
    DAY_SLOT_COUNT, EMPTY_DAY_CELLS, MIN_DAY_WINDOW_MATCHES, MIN_ROW_CELLS, STATUS_ACTIVE,
    STATUS_CANCELLED, STATUS_PLACEHOLDER,
};

/// Parses extracted table rows into flight records
#[derive(Debug)]
pub struct TableRowParser {
    vuelo_cell: Regex,
    airport_cell: Regex,
    time_cell: Regex,
    date_cell: Regex,
}

impl Default for TableRowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRowParser {
    pub fn new() -> Self {
        Self {
            // Flight number, optionally still fused with the origin airport
            vuelo_cell: Regex::new(r"^(\d+)([A-Z]{3})?$").expect("vuelo cell pattern is valid"),
            airport_cell: Regex::new(r"^[A-Z]{3}$").expect("airport cell pattern is valid"),
            time_cell: Regex::new(r"^\d{1,4}$").expect("time cell pattern is valid"),
            date_cell: Regex::new(r"^\d{6}$").expect("date cell pattern is valid"),
        }
    }

    /// Parse every row of a table, keeping row order
    ///
    /// Unparseable rows (headers, separators, short rows) are silent skips.
    pub fn parse_rows(&self, rows: &[Vec<Option<String>>]) -> Vec<FlightRecord> {
        let flights: Vec<FlightRecord> = rows
            .iter()
            .filter_map(|row| self.parse_row(row))
            .collect();
        debug!(rows = rows.len(), flights = flights.len(), "table parsed");
        flights
    }

    /// Parse a single table row into a flight record
    ///
    /// Returns `None` for rows shorter than the minimum cell count, rows
    /// without a recognizable day block, and rows missing the flight number
    /// or origin.
    pub fn parse_row(&self, row: &[Option<String>]) -> Option<FlightRecord> {
        if row.len() < MIN_ROW_CELLS {
            return None;
        }

        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("").trim().to_string())
            .collect();

        // The day block is the first 7-cell window where most cells look
        // like equipment codes (empties allowed). The row must keep at
        // least two cells after it for the validity dates.
        let day_start = (0..cells.len().saturating_sub(DAY_SLOT_COUNT + 1)).find(|&i| {
            let matches = cells[i..i + DAY_SLOT_COUNT]
                .iter()
                .filter(|cell| Self::is_day_window_cell(cell))
                .count();
            matches >= MIN_DAY_WINDOW_MATCHES
        })?;

        let flight_data = &cells[..day_start];
        let mut record = FlightRecord::new();
        let mut idx = 0;

        if flight_data.len() > idx
            && [STATUS_ACTIVE, STATUS_CANCELLED, STATUS_PLACEHOLDER, ""]
                .contains(&flight_data[idx].as_str())
        {
            if flight_data[idx] != STATUS_PLACEHOLDER && !flight_data[idx].is_empty() {
                record.status = flight_data[idx].clone();
            }
            idx += 1;
        }

        if flight_data.len() > idx && !flight_data[idx].is_empty() {
            let captures = self.vuelo_cell.captures(&flight_data[idx])?;
            record.vuelo = captures[1].to_string();
            match captures.get(2) {
                Some(airport) => {
                    record.origen = airport.as_str().to_string();
                    idx += 1;
                }
                None => {
                    // The next cell is the origin column whatever it holds
                    idx += 1;
                    if flight_data.len() > idx {
                        record.origen = flight_data[idx].clone();
                        idx += 1;
                    }
                }
            }
        }

        self.apply_route_cells(&mut record, &flight_data[idx.min(flight_data.len())..]);
        self.apply_day_cells(&mut record, &cells, day_start);
        self.apply_date_cells(&mut record, &cells, day_start + DAY_SLOT_COUNT);

        if record.is_acceptable() { Some(record) } else { None }
    }

    /// Walk the remaining flight cells as an airport/time alternation
    fn apply_route_cells(&self, record: &mut FlightRecord, cells: &[String]) {
        let mut idx = 0;

        if record.origen.is_empty()
            && idx < cells.len()
            && self.airport_cell.is_match(&cells[idx])
        {
            record.origen = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.time_cell.is_match(&cells[idx]) {
            record.salida1 = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.airport_cell.is_match(&cells[idx]) {
            record.escala1 = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.time_cell.is_match(&cells[idx]) {
            record.llegada1 = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.time_cell.is_match(&cells[idx]) {
            record.salida2 = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.airport_cell.is_match(&cells[idx]) {
            record.escala2 = cells[idx].clone();
            idx += 1;
        }
        if idx < cells.len() && self.time_cell.is_match(&cells[idx]) {
            record.llegada2 = cells[idx].clone();
        }
    }

    fn apply_day_cells(&self, record: &mut FlightRecord, cells: &[String], day_start: usize) {
        for slot in 0..DAY_SLOT_COUNT {
            let Some(cell) = cells.get(day_start + slot) else {
                break;
            };
            if !EMPTY_DAY_CELLS.contains(&cell.as_str()) {
                record.set_day_code(slot, cell);
            }
        }
    }

    fn apply_date_cells(&self, record: &mut FlightRecord, cells: &[String], date_start: usize) {
        if let Some(cell) = cells.get(date_start) {
            if self.date_cell.is_match(cell) {
                record.fecha_inicio = cell.clone();
            }
        }
        if let Some(cell) = cells.get(date_start + 1) {
            if self.date_cell.is_match(cell) {
                record.fecha_fin = cell.clone();
            }
        }
    }

    fn is_day_window_cell(cell: &str) -> bool {
        matches!(
            cell,
            "" | "0"
                | "1"
                | "2"
                | "3"
                | "4"
                | "5"
                | "6"
                | "7"
                | "8"
                | "10"
                | "11"
                | "12"
                | "13"
                | "14"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    // Day blocks in these rows carry "-1" placeholders so that no window
    // overlapping the route cells reaches the match threshold first.

    #[test]
    fn test_standard_row() {
        let parser = TableRowParser::new();
        let row = cells(&[
            "A", "12", "MEX", "1030", "JFK", "1530", "1", "-1", "3", "4", "5", "-1", "7", "010126",
            "150226",
        ]);

        let record = parser.parse_row(&row).expect("row should parse");
        assert_eq!(record.status, "A");
        assert_eq!(record.vuelo, "12");
        assert_eq!(record.origen, "MEX");
        assert_eq!(record.salida1, "1030");
        assert_eq!(record.escala1, "JFK");
        assert_eq!(record.llegada1, "1530");
        assert_eq!(record.lun, "1");
        assert_eq!(record.mar, "");
        assert_eq!(record.mie, "3");
        assert_eq!(record.dom, "7");
        assert_eq!(record.fecha_inicio, "010126");
        assert_eq!(record.fecha_fin, "150226");
    }

    #[test]
    fn test_fused_vuelo_origin_cell() {
        let parser = TableRowParser::new();
        let row = cells(&[
            "", "407GDL", "615", "TIJ", "745", "3", "", "3", "-1", "3", "-1", "3", "120126",
            "280226",
        ]);

        let record = parser.parse_row(&row).expect("row should parse");
        assert_eq!(record.status, "");
        assert_eq!(record.vuelo, "407");
        assert_eq!(record.origen, "GDL");
        assert_eq!(record.salida1, "615");
        assert_eq!(record.escala1, "TIJ");
        assert_eq!(record.llegada1, "745");
        assert_eq!(record.lun, "3");
        assert_eq!(record.mar, "");
        assert_eq!(record.mie, "3");
        assert_eq!(record.dom, "3");
        assert_eq!(record.fecha_inicio, "120126");
        assert_eq!(record.fecha_fin, "280226");
    }

    #[test]
    fn test_empty_day_cells_left_unset() {
        let parser = TableRowParser::new();
        let row = cells(&[
            "A", "9", "MEX", "800", "JFK", "930", "-1", "-", "", "4", "5", "6", "7", "010126",
            "150226",
        ]);

        let record = parser.parse_row(&row).expect("row should parse");
        assert_eq!(record.lun, "");
        assert_eq!(record.mar, "");
        assert_eq!(record.mie, "");
        assert_eq!(record.jue, "4");
        assert_eq!(record.dom, "7");
    }

    #[test]
    fn test_short_rows_rejected() {
        let parser = TableRowParser::new();
        assert!(parser.parse_row(&cells(&["A", "12", "MEX"])).is_none());
        assert!(parser.parse_row(&[]).is_none());
    }

    #[test]
    fn test_row_without_day_block_rejected() {
        let parser = TableRowParser::new();
        let row = cells(&[
            "A", "12", "MEX", "1030", "JFK", "1530", "LAX", "TIJ", "GDL", "MTY", "CUN", "BJX",
        ]);
        assert!(parser.parse_row(&row).is_none());
    }

    #[test]
    fn test_row_without_vuelo_rejected() {
        let parser = TableRowParser::new();
        let row = cells(&[
            "A", "", "MEX", "1030", "JFK", "1530", "1", "-1", "3", "4", "5", "-1", "7", "010126",
            "150226",
        ]);
        assert!(parser.parse_row(&row).is_none());
    }

    #[test]
    fn test_none_date_cell_normalized_to_empty() {
        let parser = TableRowParser::new();
        let mut row = cells(&[
            "A", "12", "MEX", "1030", "JFK", "1530", "1", "-1", "3", "4", "5", "-1", "7", "010126",
            "150226",
        ]);
        row[13] = None;

        let record = parser.parse_row(&row).expect("row should parse");
        assert_eq!(record.vuelo, "12");
        assert_eq!(record.fecha_inicio, "");
        assert_eq!(record.fecha_fin, "150226");
    }

    #[test]
    fn test_parse_rows_keeps_order_and_skips_headers() {
        let parser = TableRowParser::new();
        let header = cells(&[
            "S", "VLO", "ORIGEN", "SALIDA", "DESTINO", "LLEGADA", "L", "M", "M", "J", "V", "S",
            "D", "INICIO", "FIN",
        ]);
        let first = cells(&[
            "A", "12", "MEX", "1030", "JFK", "1530", "1", "-1", "3", "4", "5", "-1", "7", "010126",
            "150226",
        ]);
        let second = cells(&[
            "C", "407", "GDL", "615", "TIJ", "745", "3", "", "3", "-1", "3", "-1", "3", "120126",
            "280226",
        ]);

        let flights = parser.parse_rows(&[header, first, second]);
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].vuelo, "12");
        assert_eq!(flights[1].vuelo, "407");
    }
}
