use crate::coords;
use crate::types::{CountEntry, DashboardViews, MapEntry, RatioPoint, Record};
use std::collections::HashMap;

/// Compute the four chart payloads for one selected year.
///
/// Every call recomputes from the full record set; the dataset is small and
/// each aggregation is a single pass, so no caching is kept. A year with no
/// matching records yields four empty series.
pub fn render_views(records: &[Record], selected_year: i32) -> DashboardViews {
    let subset = filter_by_year(records, selected_year);

    let bar_series = bar_series(&subset);
    let pie_series = pie_series(&subset);
    let box_series = box_series(&subset);
    let map_series = map_series(&bar_series);

    DashboardViews {
        bar_series,
        pie_series,
        box_series,
        map_series,
    }
}

/// Records whose cutoff year equals `year` exactly. No range or nearest
/// matching; rows without a parseable year never match.
pub fn filter_by_year(records: &[Record], year: i32) -> Vec<&Record> {
    records
        .iter()
        .filter(|r| r.cutoff_year == Some(year))
        .collect()
}

/// Record count per department, descending by count. Equal counts are ordered
/// alphabetically by department name so the output is deterministic.
pub fn bar_series(subset: &[&Record]) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in subset {
        *counts.entry(record.department.as_str()).or_default() += 1;
    }

    let mut series: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    series.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    series
}

/// Record count per company type, in first-appearance order of the filtered
/// subset. No sort is applied.
pub fn pie_series(subset: &[&Record]) -> Vec<CountEntry> {
    let mut series: Vec<CountEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in subset {
        match positions.get(record.company_type.as_str()) {
            Some(&i) => series[i].count += 1,
            None => {
                positions.insert(record.company_type.as_str(), series.len());
                series.push(CountEntry {
                    name: record.company_type.clone(),
                    count: 1,
                });
            }
        }
    }

    series
}

/// Melt the ROE and ROA columns into long form: one (kind, value) pair per
/// record per ratio, so the output is exactly twice the subset length.
/// Missing values are carried through as None.
pub fn box_series(subset: &[&Record]) -> Vec<RatioPoint> {
    let mut series = Vec::with_capacity(subset.len() * 2);
    for record in subset {
        series.push(RatioPoint {
            kind: "ROE",
            value: record.roe,
        });
    }
    for record in subset {
        series.push(RatioPoint {
            kind: "ROA",
            value: record.roa,
        });
    }
    series
}

/// Join department counts with the coordinate table. Departments with no
/// coordinate entry are left out of the map; their bar entry is unaffected.
pub fn map_series(bar_series: &[CountEntry]) -> Vec<MapEntry> {
    bar_series
        .iter()
        .filter_map(|entry| {
            coords::coordinates_of(&entry.name).map(|point| MapEntry {
                name: entry.name.clone(),
                count: entry.count,
                lat: point.y(),
                lon: point.x(),
            })
        })
        .collect()
}

/// Distinct cutoff years present in the dataset, ascending. The first entry
/// is the default selection for the year slider.
pub fn distinct_years(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(|r| r.cutoff_year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
