//! Chart builders
//!
//! Each builder turns one cleaned table into a chart model. Builders are
//! pure: they read only their own table and never touch another artist's
//! data.

use encore_chart::{Axis, Chart, ChartType, DataReference, DataSeries};

use crate::table::{RankingTable, VisitsTable};

/// Build the daily-visits line chart.
///
/// Returns `None` when no row survived cleaning; the caller omits the page
/// and keeps going with the remaining charts.
pub fn visits_chart(artist: &str, table: &VisitsTable) -> Option<Chart> {
    if table.is_empty() {
        return None;
    }

    let series = DataSeries::new(DataReference::numbers(table.counts_in_millions()))
        .with_name("Daily visits")
        .with_categories(DataReference::strings(table.day_month_labels()));

    let mut chart = Chart::new(ChartType::LineMarkers)
        .with_title(format!("Daily Visits - {}", artist))
        .with_category_axis(Axis::new().with_title("Date"))
        .with_value_axis(Axis::new().with_title("Visits (millions)"));
    chart.add_series(series);
    Some(chart)
}

/// Build the top-cities column chart, one bar per city in sheet order.
///
/// Always renders, even when every count coerced to zero.
pub fn cities_chart(artist: &str, table: &RankingTable) -> Chart {
    let series = DataSeries::new(DataReference::numbers(table.values()))
        .with_name("Visits")
        .with_categories(DataReference::strings(table.names()));

    let mut chart = Chart::new(ChartType::ColumnClustered)
        .with_title(format!("Top Cities - {}", artist))
        .with_category_axis(Axis::new().with_title("City"))
        .with_value_axis(Axis::new().with_title("Visits"));
    chart.add_series(series);
    chart
}

/// Build the top-songs horizontal bar chart, one bar per song in sheet order
pub fn songs_chart(artist: &str, table: &RankingTable) -> Chart {
    let series = DataSeries::new(DataReference::numbers(table.values()))
        .with_name("Visits")
        .with_categories(DataReference::strings(table.names()));

    let mut chart = Chart::new(ChartType::BarClustered)
        .with_title(format!("Top Songs - {}", artist))
        .with_value_axis(Axis::new().with_title("Visits"));
    chart.add_series(series);
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::VisitRow;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_visits_chart_requires_rows() {
        let empty = VisitsTable::default();
        assert!(visits_chart("Drake", &empty).is_none());

        let table = VisitsTable {
            rows: vec![VisitRow {
                date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
                count: 2_000_000.0,
            }],
        };
        let chart = visits_chart("Drake", &table).expect("one row is enough");
        assert_eq!(chart.chart_type, ChartType::LineMarkers);
        assert_eq!(chart.title.as_deref(), Some("Daily Visits - Drake"));
        assert_eq!(chart.series[0].numbers(), &[2.0]);
        assert_eq!(chart.series[0].category_labels(), &["15-08".to_string()]);
    }

    #[test]
    fn test_cities_chart_renders_all_zero() {
        let table = RankingTable {
            rows: vec![("Bogotá".into(), 0.0), ("Lima".into(), 0.0)],
        };
        let chart = cities_chart("Drake", &table);
        assert_eq!(chart.chart_type, ChartType::ColumnClustered);
        assert_eq!(chart.series[0].numbers(), &[0.0, 0.0]);
    }

    #[test]
    fn test_songs_chart_is_horizontal_and_ordered() {
        let table = RankingTable {
            rows: vec![
                ("First".into(), 3_000_000.0),
                ("Second".into(), 1_000_000.0),
            ],
        };
        let chart = songs_chart("Drake", &table);
        assert_eq!(chart.chart_type, ChartType::BarClustered);
        assert_eq!(
            chart.series[0].category_labels(),
            &["First".to_string(), "Second".to_string()]
        );
    }
}
