#![allow(dead_code)]

use met_skill_stats::sites::SITE_REGISTRY;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const HEADER: [&str; 7] = [
    "Date", "Temp_Obs", "Temp_Mod", "RH_Obs", "RH_Mod", "WS_Obs", "WS_Mod",
];

/// One cell of a fixture row
#[derive(Debug, Clone)]
pub enum Cell {
    Num(f64),
    Text(String),
    Blank,
}

pub fn num(v: f64) -> Cell {
    Cell::Num(v)
}

pub fn text(v: &str) -> Cell {
    Cell::Text(v.to_string())
}

/// Write a single-sheet workbook with a header row and the given rows
pub fn write_workbook(path: &Path, sheet: &str, header: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("Failed to name sheet");

    for (col, name) in header.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .expect("Failed to write header");
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Num(v) => {
                    worksheet
                        .write_number(r, col as u16, *v)
                        .expect("Failed to write number");
                }
                Cell::Text(s) => {
                    worksheet
                        .write_string(r, col as u16, s)
                        .expect("Failed to write string");
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).expect("Failed to save workbook");
}

/// Standard row: date label followed by the six readings in header order
pub fn standard_row(day: usize, values: [f64; 6]) -> Vec<Cell> {
    let mut row = vec![text(&format!("2021-01-{:02}", day % 28 + 1))];
    row.extend(values.iter().map(|v| num(*v)));
    row
}

/// Plausible but imperfect model output for site `k`
pub fn synthetic_rows(k: usize, count: usize) -> Vec<[f64; 6]> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let offset = k as f64;
            let temp_obs = 10.0 + 5.0 * (t * 0.5).sin() + offset;
            let rh_obs = 60.0 + 10.0 * (t * 0.3).cos() - offset;
            let ws_obs = 3.0 + (i % 5) as f64 * 0.4;
            [
                temp_obs,
                temp_obs + 0.3 * t.cos() + 0.5,
                rh_obs,
                rh_obs * 0.9 + 5.0,
                ws_obs,
                ws_obs + 0.2 * t.sin(),
            ]
        })
        .collect()
}

/// Write all six site workbooks into `dir`. Beijing's modeled temperature is
/// an exact copy of the observed column.
pub fn write_all_sites(dir: &Path) {
    for (k, site) in SITE_REGISTRY.iter().enumerate() {
        let rows: Vec<Vec<Cell>> = synthetic_rows(k, 24)
            .into_iter()
            .enumerate()
            .map(|(day, mut values)| {
                if site.code == "bei" {
                    values[1] = values[0];
                }
                standard_row(day, values)
            })
            .collect();
        write_workbook(&site.workbook_path(dir), "Sheet1", &HEADER, &rows);
    }
}
