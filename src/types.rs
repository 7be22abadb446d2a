use serde::Serialize;

/// One row of the source spreadsheet. Column names are preserved verbatim in
/// the serialized form so the raw-table view shows the dataset as-is.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// None when the source cell is not a year; such rows stay visible in the
    /// raw table but never match the exact-year filter.
    #[serde(rename = "Fecha de Corte")]
    pub cutoff_year: Option<i32>,
    #[serde(rename = "Departamento de la dirección del domicilio")]
    pub department: String,
    #[serde(rename = "Tipo societario")]
    pub company_type: String,
    #[serde(rename = "ROE")]
    pub roe: Option<f64>,
    #[serde(rename = "ROA")]
    pub roa: Option<f64>,
}

/// (category, count) pair produced by the grouping aggregations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: u32,
}

/// One melted (ratio-kind, value) pair for the boxplot. `value` is None when
/// the source cell was blank or malformed; the chart skips nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioPoint {
    pub kind: &'static str,
    pub value: Option<f64>,
}

/// A department count joined with its plotting coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub name: String,
    pub count: u32,
    pub lat: f64,
    pub lon: f64,
}

/// The four chart payloads for one selected year.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViews {
    pub bar_series: Vec<CountEntry>,
    pub pie_series: Vec<CountEntry>,
    pub box_series: Vec<RatioPoint>,
    pub map_series: Vec<MapEntry>,
}
