//! Geometry and the bento grid layout.

/// A point in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns the larger of width and height.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Returns true if the point is inside the rectangle (right/bottom exclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if the point is inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Position of `point` as a percentage of this rectangle's width/height.
    ///
    /// Values fall outside 0..=100 when the point is outside the rectangle.
    /// A degenerate axis reports 50%.
    #[must_use]
    pub fn relative_percent(&self, point: Point) -> Point {
        let axis = |offset: f32, extent: f32| {
            if extent > 0.0 {
                offset / extent * 100.0
            } else {
                50.0
            }
        };
        Point::new(
            axis(point.x - self.x, self.width),
            axis(point.y - self.y, self.height),
        )
    }

    /// Returns the smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        self.expand(-amount)
    }
}

/// How many grid tracks a card occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    /// Columns covered. `None` spans the full row.
    pub columns: Option<usize>,
    /// Rows covered.
    pub rows: usize,
}

impl GridSpan {
    /// A single cell.
    pub const CELL: Self = Self {
        columns: Some(1),
        rows: 1,
    };

    /// A full-width row.
    pub const FULL_ROW: Self = Self {
        columns: None,
        rows: 1,
    };

    /// Spans `columns` x `rows` tracks.
    #[must_use]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: Some(columns),
            rows,
        }
    }
}

/// Result of arranging cards on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridArrangement {
    /// Card rectangles, in input order.
    pub cells: Vec<Rect>,
    /// Bounding rectangle of the grid element (padding included).
    pub bounds: Rect,
}

/// Responsive bento grid.
///
/// Auto-places cards row by row into the first free slot that fits, the way
/// a CSS grid with `grid-auto-flow: row` does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BentoGrid {
    /// Number of column tracks.
    pub columns: usize,
    /// Gap between tracks.
    pub gap: f32,
    /// Padding inside the grid element.
    pub padding: f32,
    /// Height of one row track.
    pub row_height: f32,
}

impl Default for BentoGrid {
    fn default() -> Self {
        Self {
            columns: 4,
            gap: 12.0,
            padding: 12.0,
            row_height: 180.0,
        }
    }
}

impl BentoGrid {
    /// Widest viewport that still uses two columns.
    pub const TABLET_MAX_WIDTH: f32 = 1024.0;
    /// Widest viewport that uses a single column.
    pub const PHONE_MAX_WIDTH: f32 = 640.0;

    /// Grid for a viewport of the given width (4 / 2 / 1 columns).
    #[must_use]
    pub fn for_viewport_width(width: f32) -> Self {
        let columns = if width <= Self::PHONE_MAX_WIDTH {
            1
        } else if width <= Self::TABLET_MAX_WIDTH {
            2
        } else {
            4
        };
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Lays out cards inside a grid element of the given width whose top-left
    /// corner sits at `origin`.
    #[must_use]
    pub fn arrange(&self, origin: Point, width: f32, spans: &[GridSpan]) -> GridArrangement {
        let columns = self.columns.max(1);
        let content_width = (width - self.padding * 2.0).max(0.0);
        #[allow(clippy::cast_precision_loss)]
        let column_width =
            ((content_width - self.gap * (columns - 1) as f32) / columns as f32).max(0.0);

        let mut occupied: Vec<Vec<bool>> = Vec::new();
        let mut cells = Vec::with_capacity(spans.len());
        let mut rows_used = 0;

        for span in spans {
            let span_cols = span.columns.unwrap_or(columns).clamp(1, columns);
            let span_rows = span.rows.max(1);
            let (row, col) = first_free_slot(&mut occupied, columns, span_cols, span_rows);

            for r in row..row + span_rows {
                for c in col..col + span_cols {
                    occupied[r][c] = true;
                }
            }
            rows_used = rows_used.max(row + span_rows);

            #[allow(clippy::cast_precision_loss)]
            let cell = Rect::new(
                origin.x + self.padding + col as f32 * (column_width + self.gap),
                origin.y + self.padding + row as f32 * (self.row_height + self.gap),
                span_cols as f32 * column_width + (span_cols - 1) as f32 * self.gap,
                span_rows as f32 * self.row_height + (span_rows - 1) as f32 * self.gap,
            );
            cells.push(cell);
        }

        #[allow(clippy::cast_precision_loss)]
        let content_height = if rows_used == 0 {
            0.0
        } else {
            rows_used as f32 * self.row_height + (rows_used - 1) as f32 * self.gap
        };

        GridArrangement {
            cells,
            bounds: Rect::new(origin.x, origin.y, width, content_height + self.padding * 2.0),
        }
    }
}

/// Finds the first row-major slot where a `span_cols` x `span_rows` block fits,
/// growing the occupancy grid as needed.
fn first_free_slot(
    occupied: &mut Vec<Vec<bool>>,
    columns: usize,
    span_cols: usize,
    span_rows: usize,
) -> (usize, usize) {
    let mut row = 0;
    loop {
        while occupied.len() < row + span_rows {
            occupied.push(vec![false; columns]);
        }
        for col in 0..=(columns - span_cols) {
            let fits = (row..row + span_rows)
                .all(|r| (col..col + span_cols).all(|c| !occupied[r][c]));
            if fits {
                return (row, col);
            }
        }
        row += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(50.0, 30.0)));
        assert!(!rect.contains(Point::new(5.0, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 80.0)));
        assert!(!rect.contains(Point::new(110.0, 30.0)));
        assert!(rect.contains_inclusive(Point::new(110.0, 70.0)));
    }

    #[test]
    fn test_relative_percent() {
        let rect = Rect::new(100.0, 100.0, 200.0, 50.0);
        assert_eq!(rect.relative_percent(rect.center()), Point::new(50.0, 50.0));
        assert_eq!(
            rect.relative_percent(Point::new(50.0, 175.0)),
            Point::new(-25.0, 150.0)
        );
        assert_eq!(
            Rect::new(0.0, 0.0, 0.0, 10.0).relative_percent(Point::ZERO),
            Point::new(50.0, 0.0)
        );
    }

    #[test]
    fn test_grid_columns_follow_viewport() {
        assert_eq!(BentoGrid::for_viewport_width(1440.0).columns, 4);
        assert_eq!(BentoGrid::for_viewport_width(1024.0).columns, 2);
        assert_eq!(BentoGrid::for_viewport_width(375.0).columns, 1);
    }

    #[test]
    fn test_grid_places_portfolio_shape() {
        // hero (full), projects (1x1), about (2x2), contact (1x1), resume (1x1)
        let grid = BentoGrid {
            columns: 4,
            gap: 10.0,
            padding: 0.0,
            row_height: 100.0,
        };
        let spans = [
            GridSpan::FULL_ROW,
            GridSpan::CELL,
            GridSpan::new(2, 2),
            GridSpan::CELL,
            GridSpan::CELL,
        ];

        let result = grid.arrange(Point::ZERO, 430.0, &spans);

        // column width = (430 - 30) / 4 = 100
        assert_eq!(result.cells[0], Rect::new(0.0, 0.0, 430.0, 100.0));
        assert_eq!(result.cells[1], Rect::new(0.0, 110.0, 100.0, 100.0));
        assert_eq!(result.cells[2], Rect::new(110.0, 110.0, 210.0, 210.0));
        assert_eq!(result.cells[3], Rect::new(330.0, 110.0, 100.0, 100.0));
        assert_eq!(result.cells[4], Rect::new(0.0, 220.0, 100.0, 100.0));
        assert_eq!(result.bounds, Rect::new(0.0, 0.0, 430.0, 320.0));
    }

    #[test]
    fn test_grid_clamps_span_to_columns() {
        let grid = BentoGrid {
            columns: 1,
            gap: 0.0,
            padding: 5.0,
            row_height: 50.0,
        };
        let result = grid.arrange(Point::new(10.0, 10.0), 110.0, &[GridSpan::new(2, 1)]);
        assert_eq!(result.cells[0], Rect::new(15.0, 15.0, 100.0, 50.0));
    }
}
