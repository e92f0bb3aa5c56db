//! Data series types

/// Data series for a chart
#[derive(Debug, Clone)]
pub struct DataSeries {
    /// Series name
    pub name: Option<String>,
    /// Values (Y data)
    pub values: DataReference,
    /// Categories (X data)
    pub categories: Option<DataReference>,
}

impl DataSeries {
    /// Create a new data series
    pub fn new(values: DataReference) -> Self {
        Self {
            name: None,
            values,
            categories: None,
        }
    }

    /// Set series name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set categories
    pub fn with_categories(mut self, categories: DataReference) -> Self {
        self.categories = Some(categories);
        self
    }

    /// The numeric values of the series
    pub fn numbers(&self) -> &[f64] {
        self.values.as_numbers()
    }

    /// The category labels of the series, empty when absent
    pub fn category_labels(&self) -> &[String] {
        self.categories
            .as_ref()
            .map(|c| c.as_strings())
            .unwrap_or(&[])
    }
}

/// Literal chart data
#[derive(Debug, Clone)]
pub enum DataReference {
    /// Numeric values
    Numbers(Vec<f64>),
    /// String values (for categories)
    Strings(Vec<String>),
}

impl DataReference {
    /// Create from numeric values
    pub fn numbers(values: Vec<f64>) -> Self {
        DataReference::Numbers(values)
    }

    /// Create from string values
    pub fn strings(values: Vec<String>) -> Self {
        DataReference::Strings(values)
    }

    /// Numeric view; empty for string data
    pub fn as_numbers(&self) -> &[f64] {
        match self {
            DataReference::Numbers(v) => v,
            DataReference::Strings(_) => &[],
        }
    }

    /// String view; empty for numeric data
    pub fn as_strings(&self) -> &[String] {
        match self {
            DataReference::Strings(v) => v,
            DataReference::Numbers(_) => &[],
        }
    }

    /// Number of data points
    pub fn len(&self) -> usize {
        match self {
            DataReference::Numbers(v) => v.len(),
            DataReference::Strings(v) => v.len(),
        }
    }

    /// Check for an empty reference
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
