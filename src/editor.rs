use std::ops::Deref;

use log::{info, warn};

use crate::{
    error::InvalidInput,
    mapping::CoordinateMapper,
    regression::{self, RegressionResult, Statistics},
};

pub mod table;

pub use table::{Column, DataTable, Row};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Points in insertion order, which is also the table row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    pub fn push(&mut self, point: Point) {
        self.0.push(point)
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }
}

impl Deref for PointSet {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

/// One user interaction, in pixel coordinates of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PointerMoved(Option<(f64, f64)>),
    Clicked(f64, f64),
    AddRow,
    EditCell {
        row: usize,
        column: Column,
        text: String,
    },
    ComputeStats,
    Clear,
    DismissNotice,
}

/// Everything the editor shows. Each action consumes the old state and
/// returns the next one, derived values are recomputed from the points.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    points: PointSet,
    table: DataTable,
    hovered: Option<usize>,
    statistics: Option<Statistics>,
    notice: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        let mut table = DataTable::default();
        table.add_empty_row();
        Self {
            points: PointSet::default(),
            table,
            hovered: None,
            statistics: None,
            notice: None,
        }
    }
}

impl Editor {
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn hovered(&self) -> Option<Point> {
        self.hovered.and_then(|index| self.points.get(index).copied())
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The fitted line, once there are at least two points.
    pub fn fit(&self) -> Option<RegressionResult> {
        (self.points.len() >= 2).then(|| regression::linear_regression(&self.points))
    }

    pub fn update(mut self, mapper: &CoordinateMapper, action: Action) -> Self {
        match action {
            Action::PointerMoved(Some((px, py))) => {
                self.hovered = mapper.hit_test(&self.points, px, py);
            }
            Action::PointerMoved(None) => self.hovered = None,
            Action::Clicked(px, py) => {
                if self.hovered.is_some() {
                    return self;
                }
                match mapper.snap_to_logical(px, py) {
                    Ok(point) => {
                        self.points.push(point);
                        self.table = DataTable::from_points(&self.points);
                        self.statistics = None;
                    }
                    Err(err) => return self.reject(err),
                }
            }
            Action::AddRow => self.table.add_empty_row(),
            Action::EditCell { row, column, text } => {
                if !self.table.set_cell(row, column, text) {
                    warn!("tried to edit row {} which does not exist", row + 1);
                }
            }
            Action::ComputeStats => return self.compute_stats(mapper),
            Action::Clear => self = Self::default(),
            Action::DismissNotice => self.notice = None,
        }
        self
    }

    fn compute_stats(mut self, mapper: &CoordinateMapper) -> Self {
        if self.table.len() < 2 {
            let found = self.table.len();
            return self.reject(InvalidInput::TooFewPoints { found });
        }
        let points = match self.table.commit(mapper) {
            Ok(points) => points,
            Err(err) => return self.reject(err),
        };
        self.hovered = None;
        self.statistics = regression::statistics(&points);
        let found = points.len();
        self.points = points;
        match self.statistics {
            Some(stats) => {
                info!("{} from {} points", stats.fit, found);
                self
            }
            None => self.reject(InvalidInput::TooFewPoints { found }),
        }
    }

    fn reject(mut self, err: InvalidInput) -> Self {
        warn!("{}", err);
        self.notice = Some(err.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::DomainPolicy;

    fn click_at(editor: Editor, mapper: &CoordinateMapper, point: Point) -> Editor {
        let (px, py) = mapper.to_pixel(point);
        editor.update(mapper, Action::Clicked(px, py))
    }

    fn edit(editor: Editor, mapper: &CoordinateMapper, row: usize, x: &str, y: &str) -> Editor {
        let editor = editor.update(
            mapper,
            Action::EditCell {
                row,
                column: Column::X,
                text: x.to_string(),
            },
        );
        editor.update(
            mapper,
            Action::EditCell {
                row,
                column: Column::Y,
                text: y.to_string(),
            },
        )
    }

    #[test]
    fn starts_with_one_empty_row() {
        let editor = Editor::default();
        assert!(editor.points().is_empty());
        assert_eq!(editor.table().rows(), &[Row::default()]);
        assert!(editor.fit().is_none());
        assert!(editor.statistics().is_none());
    }

    #[test]
    fn clicks_add_snapped_points_and_rebuild_the_table() {
        let mapper = CoordinateMapper::default();
        let mut editor = Editor::default();
        for i in 0..3 {
            let v = i as f64 * 10.0;
            editor = click_at(editor, &mapper, Point::new(v + 0.2, v));
        }
        assert_eq!(
            editor.points().as_slice(),
            &[Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 20.0)]
        );
        assert_eq!(editor.table().len(), 3);
        assert_eq!(editor.table().rows()[2].x, "20");
        let fit = editor.fit().unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-12 && fit.intercept.abs() < 1e-9);
    }

    #[test]
    fn clicks_outside_the_domain_are_rejected() {
        let mapper = CoordinateMapper::default();
        let editor = click_at(Editor::default(), &mapper, Point::new(5.0, 5.0));
        let before = editor.points().clone();

        let editor = click_at(editor, &mapper, Point::new(200.0, 10.0));
        assert_eq!(editor.points(), &before);
        assert!(editor.notice().unwrap().contains("0 to 150"));

        let editor = editor.update(&mapper, Action::DismissNotice);
        assert!(editor.notice().is_none());
    }

    #[test]
    fn edge_clicks_show_an_unsigned_zero() {
        let mapper = CoordinateMapper::default();
        // one pixel left of the y axis rounds to x = -0
        let editor = Editor::default().update(&mapper, Action::Clicked(39.0, 300.0));
        assert!(editor.notice().is_none());
        assert_eq!(editor.table().rows()[0].x, "0");
        assert_eq!(DataTable::from_points(editor.points()).rows()[0].x, "0");
    }

    #[test]
    fn unbounded_clicks_inside_the_margin_are_negative_offsets() {
        let mapper = CoordinateMapper::new(800.0, 600.0, 40.0, DomainPolicy::Unbounded);
        let editor = Editor::default().update(&mapper, Action::Clicked(20.0, 580.0));
        assert!(editor.notice().is_none());
        assert_eq!(editor.points().as_slice(), &[Point::new(-20.0, -20.0)]);
        assert_eq!(editor.table().rows()[0].x, "-20");

        let editor = edit(editor.update(&mapper, Action::AddRow), &mapper, 1, "-5", "700");
        let editor = editor.update(&mapper, Action::ComputeStats);
        assert!(editor.notice().is_none());
        assert_eq!(editor.points().len(), 2);
        assert!(editor.statistics().is_some());

        let editor = edit(editor, &mapper, 1, "inf", "0");
        let before = editor.points().clone();
        let editor = editor.update(&mapper, Action::ComputeStats);
        assert_eq!(editor.points(), &before);
        assert!(editor.notice().unwrap().starts_with("Row 2"));
    }

    #[test]
    fn clicks_on_a_hovered_point_do_nothing() {
        let mapper = CoordinateMapper::default();
        let editor = click_at(Editor::default(), &mapper, Point::new(30.0, 40.0));
        let (px, py) = mapper.to_pixel(Point::new(30.0, 40.0));
        let editor = editor.update(&mapper, Action::PointerMoved(Some((px + 3.0, py - 3.0))));
        assert_eq!(editor.hovered(), Some(Point::new(30.0, 40.0)));

        let editor = editor.update(&mapper, Action::Clicked(px + 3.0, py - 3.0));
        assert_eq!(editor.points().len(), 1);

        let editor = editor.update(&mapper, Action::PointerMoved(None));
        assert_eq!(editor.hovered(), None);
    }

    #[test]
    fn compute_stats_commits_the_table() {
        let mapper = CoordinateMapper::default();
        let mut editor = Editor::default().update(&mapper, Action::AddRow);
        editor = editor.update(&mapper, Action::AddRow);
        editor = edit(editor, &mapper, 0, "0", "0");
        editor = edit(editor, &mapper, 1, "1", "1");
        editor = edit(editor, &mapper, 2, "2", "2");
        let editor = editor.update(&mapper, Action::ComputeStats);

        assert!(editor.notice().is_none());
        assert_eq!(editor.points().len(), 3);
        let stats = editor.statistics().unwrap();
        assert_eq!(stats.fit, RegressionResult { slope: 1.0, intercept: 0.0 });
        assert_eq!(stats.errors.rmse, 0.0);
    }

    #[test]
    fn invalid_rows_leave_points_unchanged() {
        let mapper = CoordinateMapper::default();
        let editor = click_at(Editor::default(), &mapper, Point::new(1.0, 1.0));
        let editor = click_at(editor, &mapper, Point::new(2.0, 3.0));
        let before = editor.points().clone();

        let editor = edit(editor, &mapper, 1, "200", "3");
        let editor = editor.update(&mapper, Action::ComputeStats);
        assert_eq!(editor.points(), &before);
        assert!(editor.statistics().is_none());
        assert!(editor.notice().unwrap().starts_with("Row 2 "));
    }

    #[test]
    fn compute_stats_needs_two_points() {
        let mapper = CoordinateMapper::default();
        let editor = Editor::default().update(&mapper, Action::ComputeStats);
        assert!(editor.notice().is_some());

        let editor = edit(Editor::default(), &mapper, 0, "4", "4")
            .update(&mapper, Action::AddRow)
            .update(&mapper, Action::ComputeStats);
        assert_eq!(editor.points().as_slice(), &[Point::new(4.0, 4.0)]);
        assert!(editor.statistics().is_none());
        assert!(editor.notice().unwrap().contains("found 1"));
    }

    #[test]
    fn new_clicks_discard_stale_statistics() {
        let mapper = CoordinateMapper::default();
        let editor = click_at(Editor::default(), &mapper, Point::new(1.0, 1.0));
        let editor = click_at(editor, &mapper, Point::new(2.0, 3.0))
            .update(&mapper, Action::ComputeStats);
        assert!(editor.statistics().is_some());

        let editor = click_at(editor, &mapper, Point::new(9.0, 3.0));
        assert!(editor.statistics().is_none());
        assert_eq!(editor.points().len(), 3);
    }

    #[test]
    fn clear_resets_everything() {
        let mapper = CoordinateMapper::default();
        let editor = click_at(Editor::default(), &mapper, Point::new(1.0, 1.0));
        let editor = click_at(editor, &mapper, Point::new(2.0, 3.0))
            .update(&mapper, Action::ComputeStats)
            .update(&mapper, Action::Clear);
        assert_eq!(editor, Editor::default());
    }

    #[test]
    fn updates_are_deterministic() {
        let mapper = CoordinateMapper::default();
        let actions = vec![
            Action::Clicked(100.0, 400.0),
            Action::Clicked(300.0, 200.0),
            Action::PointerMoved(Some((100.0, 400.0))),
            Action::ComputeStats,
        ];
        let run = || {
            actions
                .iter()
                .cloned()
                .fold(Editor::default(), |editor, action| editor.update(&mapper, action))
        };
        assert_eq!(run(), run());
    }
}
