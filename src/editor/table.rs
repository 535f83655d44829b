use crate::{
    error::{InvalidInput, RowError},
    mapping::CoordinateMapper,
};

use super::{Point, PointSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    X,
    Y,
}

/// Free text of one row, validated only when the table is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub x: String,
    pub y: String,
}

impl Row {
    fn is_blank(&self) -> bool {
        self.x.trim().is_empty() && self.y.trim().is_empty()
    }

    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::X => &self.x,
            Column::Y => &self.y,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: Vec<Row>,
}

impl DataTable {
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            rows: points
                .iter()
                .map(|point| Row {
                    x: point.x.to_string(),
                    y: point.y.to_string(),
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_empty_row(&mut self) {
        self.rows.push(Row::default())
    }

    /// Returns `false` when `row` does not exist.
    pub fn set_cell(&mut self, row: usize, column: Column, text: String) -> bool {
        match self.rows.get_mut(row) {
            Some(target) => {
                match column {
                    Column::X => target.x = text,
                    Column::Y => target.y = text,
                }
                true
            }
            None => false,
        }
    }

    /// Parses every row into a new point set. Fully blank rows are skipped,
    /// the first invalid row (counted from 1) aborts the whole commit.
    pub fn commit(&self, mapper: &CoordinateMapper) -> Result<PointSet, InvalidInput> {
        let parse = |text: &str| -> Result<f64, RowError> {
            let text = text.trim();
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => mapper.validate_value(value),
                _ => Err(RowError::NotANumber(text.to_string())),
            }
        };

        let mut points = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            let point = parse(&row.x)
                .and_then(|x| Ok(Point::new(x, parse(&row.y)?)))
                .map_err(|reason| InvalidInput::InvalidRow {
                    row: index + 1,
                    reason,
                })?;
            points.push(point);
        }
        Ok(points.into())
    }
}
