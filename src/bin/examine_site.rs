use calamine::{open_workbook_auto, DataType, Reader};
use std::env;

use met_skill_stats::model::Variable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        "/mnt/h/Paper_work/Beijing.xlsx"
    };

    println!("Opening site workbook: {file_path}");
    let mut workbook = open_workbook_auto(file_path)?;

    println!("\nSheet names:");
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("  {i}: {name}");
    }

    let sheet_name = if args.len() > 2 {
        args[2].clone()
    } else {
        "Sheet1".to_string()
    };

    println!("\n\nExamining sheet: {sheet_name}");
    println!("{}", "=".repeat(100));

    let range = workbook.worksheet_range(&sheet_name)?;
    println!("Dimensions: {:?}", range.get_size());

    let Some(header) = range.rows().next() else {
        println!("Sheet is empty");
        return Ok(());
    };

    println!("\nHeader row:");
    for (col_idx, cell) in header.iter().enumerate() {
        println!("Col {:3}: {}", col_idx + 1, cell);
    }

    println!("\nRequired columns:");
    for variable in Variable::ALL {
        for column in [variable.observed_column(), variable.modeled_column()] {
            let found = header
                .iter()
                .any(|cell| cell.get_string().map(str::trim) == Some(column));
            println!("  {:10} {}", column, if found { "ok" } else { "MISSING" });
        }
    }

    println!("\nFirst 20 data rows:");
    println!("{}", "=".repeat(100));
    for (row_idx, row) in range.rows().enumerate().skip(1).take(20) {
        print!("Row {:4}: ", row_idx + 1);
        for cell in row {
            if cell.is_empty() {
                print!("[empty] ");
            } else {
                print!("[{cell}] ");
            }
        }
        println!();
    }

    let incomplete = range
        .rows()
        .skip(1)
        .filter(|row| row.iter().any(|cell| cell.is_empty()))
        .count();
    println!(
        "\n{} of {} data rows have at least one empty cell",
        incomplete,
        range.height().saturating_sub(1)
    );

    Ok(())
}
