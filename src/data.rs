use crate::config::AppConfig;
use crate::types::Record;
use anyhow::{Context, Result, anyhow};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;

pub const COL_CUTOFF_YEAR: &str = "Fecha de Corte";
pub const COL_DEPARTMENT: &str = "Departamento de la dirección del domicilio";
pub const COL_COMPANY_TYPE: &str = "Tipo societario";
pub const COL_ROE: &str = "ROE";
pub const COL_ROA: &str = "ROA";

/// The source columns, in the order the raw-table view presents them.
pub const COLUMNS: [&str; 5] = [
    COL_CUTOFF_YEAR,
    COL_DEPARTMENT,
    COL_COMPANY_TYPE,
    COL_ROE,
    COL_ROA,
];

/// Positions of the expected columns within a header row.
struct ColumnIndices {
    cutoff_year: usize,
    department: usize,
    company_type: usize,
    roe: usize,
    roa: usize,
}

impl ColumnIndices {
    fn resolve<'a>(headers: impl Iterator<Item = &'a str> + Clone) -> Result<Self> {
        let position = |wanted: &str| {
            headers
                .clone()
                .position(|h| h.trim() == wanted)
                .ok_or_else(|| anyhow!("Expected column '{}' not found in dataset", wanted))
        };
        Ok(ColumnIndices {
            cutoff_year: position(COL_CUTOFF_YEAR)?,
            department: position(COL_DEPARTMENT)?,
            company_type: position(COL_COMPANY_TYPE)?,
            roe: position(COL_ROE)?,
            roa: position(COL_ROA)?,
        })
    }
}

/// Load the dataset into memory, preserving source row order.
///
/// Dispatches on the file extension: Excel workbooks go through calamine,
/// CSV through the csv crate. A missing file or a missing expected column is
/// an error; a malformed numeric cell becomes a missing value instead.
pub fn load_data(config: &AppConfig) -> Result<Vec<Record>> {
    println!("Loading dataset from {:?}...", config.input.dataset);

    let extension = config
        .input
        .dataset
        .extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("Input dataset file has no extension"))?;

    let records = match extension.as_str() {
        "xlsx" | "xls" | "xlsm" | "ods" => load_workbook(config)?,
        "csv" => load_csv(config)?,
        _ => return Err(anyhow!("Unsupported dataset format: {}", extension)),
    };

    println!("Loaded {} records", records.len());

    Ok(records)
}

fn load_workbook(config: &AppConfig) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(&config.input.dataset)
        .with_context(|| format!("Failed to open workbook: {:?}", config.input.dataset))?;

    let sheet_name = match &config.input.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| anyhow!("Sheet '{}' is empty", sheet_name))?;

    let header_strings: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();
    let cols = ColumnIndices::resolve(header_strings.iter().map(|s| s.as_str()))?;

    let mut records = Vec::new();
    for row in rows {
        records.push(Record {
            cutoff_year: row.get(cols.cutoff_year).and_then(cell_year),
            department: row.get(cols.department).map(cell_text).unwrap_or_default(),
            company_type: row.get(cols.company_type).map(cell_text).unwrap_or_default(),
            roe: row.get(cols.roe).and_then(cell_f64),
            roa: row.get(cols.roa).and_then(cell_f64),
        });
    }

    Ok(records)
}

fn load_csv(config: &AppConfig) -> Result<Vec<Record>> {
    let file = File::open(&config.input.dataset)
        .with_context(|| format!("Failed to open CSV file: {:?}", config.input.dataset))?;
    let mut rdr = ReaderBuilder::new().from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let cols = ColumnIndices::resolve(headers.iter().map(|s| s.as_str()))?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(Record {
            cutoff_year: row.get(cols.cutoff_year).and_then(parse_year),
            department: row.get(cols.department).unwrap_or("").trim().to_string(),
            company_type: row.get(cols.company_type).unwrap_or("").trim().to_string(),
            roe: row.get(cols.roe).and_then(parse_f64),
            roa: row.get(cols.roa).and_then(parse_f64),
        });
    }

    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_f64(s),
        _ => None,
    }
}

fn cell_year(cell: &Data) -> Option<i32> {
    use chrono::Datelike;
    match cell {
        // Date-formatted cutoff cells arrive as serial datetimes, not numbers.
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.year()),
        Data::DateTimeIso(s) => s.get(..4).and_then(|y| y.parse().ok()),
        _ => cell_f64(cell).map(|f| f as i32),
    }
}

fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn parse_year(raw: &str) -> Option<i32> {
    parse_f64(raw).map(|f| f as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputConfig, ServerConfig};
    use std::io::Write;

    fn config_for(path: std::path::PathBuf) -> AppConfig {
        AppConfig {
            input: InputConfig {
                dataset: path,
                sheet: None,
            },
            server: ServerConfig { port: 0 },
        }
    }

    fn write_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_preserving_order() {
        let path = write_csv(
            "pyme_loader_order.csv",
            "Fecha de Corte,Departamento de la dirección del domicilio,Tipo societario,ROE,ROA\n\
             2020,ANTIOQUIA,SAS,0.12,0.05\n\
             2021,VALLE,LTDA,0.08,0.03\n",
        );
        let records = load_data(&config_for(path)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cutoff_year, Some(2020));
        assert_eq!(records[0].department, "ANTIOQUIA");
        assert_eq!(records[1].company_type, "LTDA");
        assert_eq!(records[1].roe, Some(0.08));
    }

    #[test]
    fn date_typed_cutoff_cell_yields_year() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};
        // Excel serial 44196 = 2020-12-31
        let cell = Data::DateTime(ExcelDateTime::new(
            44196.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(cell_year(&cell), Some(2020));
        assert_eq!(
            cell_year(&Data::DateTimeIso("2021-12-31T00:00:00".to_string())),
            Some(2021)
        );
    }

    #[test]
    fn unparseable_year_row_is_kept_without_a_year() {
        let path = write_csv(
            "pyme_loader_bad_year.csv",
            "Fecha de Corte,Departamento de la dirección del domicilio,Tipo societario,ROE,ROA\n\
             2020,ANTIOQUIA,SAS,0.12,0.05\n\
             sin fecha,VALLE,LTDA,0.08,0.03\n",
        );
        let records = load_data(&config_for(path)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].cutoff_year, None);
        assert_eq!(records[1].department, "VALLE");
    }

    #[test]
    fn malformed_ratio_becomes_missing_not_error() {
        let path = write_csv(
            "pyme_loader_nan.csv",
            "Fecha de Corte,Departamento de la dirección del domicilio,Tipo societario,ROE,ROA\n\
             2020,ANTIOQUIA,SAS,not-a-number,\n",
        );
        let records = load_data(&config_for(path)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].roe, None);
        assert_eq!(records[0].roa, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = write_csv(
            "pyme_loader_missing_col.csv",
            "Fecha de Corte,Tipo societario,ROE,ROA\n2020,SAS,0.1,0.1\n",
        );
        let err = load_data(&config_for(path)).unwrap_err();
        assert!(err.to_string().contains(COL_DEPARTMENT));
    }

    #[test]
    fn missing_file_is_an_error() {
        let cfg = config_for(std::path::PathBuf::from("/does/not/exist.csv"));
        assert!(load_data(&cfg).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let cfg = config_for(std::path::PathBuf::from("data.parquet"));
        assert!(load_data(&cfg).is_err());
    }
}
