//! Chart types

use crate::axis::Axis;
use crate::series::DataSeries;

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    /// Connected line with a marker on every point
    LineMarkers,
    /// Vertical bars, one per category
    ColumnClustered,
    /// Horizontal bars, one per category
    BarClustered,
}

/// Chart definition
#[derive(Debug, Clone)]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Data series
    pub series: Vec<DataSeries>,
    /// Category axis (X for columns, Y for horizontal bars)
    pub category_axis: Option<Axis>,
    /// Value axis
    pub value_axis: Option<Axis>,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            title: None,
            series: Vec::new(),
            category_axis: None,
            value_axis: None,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the category axis
    pub fn with_category_axis(mut self, axis: Axis) -> Self {
        self.category_axis = Some(axis);
        self
    }

    /// Set the value axis
    pub fn with_value_axis(mut self, axis: Axis) -> Self {
        self.value_axis = Some(axis);
        self
    }

    /// Add a data series
    pub fn add_series(&mut self, series: DataSeries) {
        self.series.push(series);
    }
}
