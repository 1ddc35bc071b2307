use tilepath_core::Point;

/// A route found by a search, walked one tile at a time.
///
/// The steps run from the start cell to the target cell. A single cursor
/// starts before the first step; [`advance`](Self::advance) moves it and
/// [`current`](Self::current) reads it.
///
/// ```
/// use tilepath::{Path, Point};
///
/// let mut path = Path::new(vec![Point::new(0, 0), Point::new(1, 1)], 1.4);
/// assert_eq!(path.current(), None);
/// assert!(path.advance());
/// assert_eq!(path.current(), Some(Point::new(0, 0)));
/// assert!(path.advance());
/// assert!(!path.advance());
/// assert_eq!(path.current(), Some(Point::new(1, 1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPath")
)]
pub struct Path {
    steps: Vec<Point>,
    cost: f64,
    destination: Point,
    cursor: Option<usize>,
}

impl Path {
    /// Create a path over `steps` with total cost `cost`. The destination
    /// is the last step.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is empty.
    pub fn new(steps: Vec<Point>, cost: f64) -> Self {
        let destination = *steps.last().expect("a path has at least one step");
        Self {
            steps,
            cost,
            destination,
            cursor: None,
        }
    }

    /// Replace the logical destination, for callers that searched towards
    /// a stand-in cell (e.g. the free tile next to an occupied one).
    pub fn with_destination(mut self, destination: Point) -> Self {
        self.destination = destination;
        self
    }

    /// The cell the caller wants to reach.
    #[inline]
    pub fn destination(&self) -> Point {
        self.destination
    }

    /// The step under the cursor, or `None` before the first
    /// [`advance`](Self::advance).
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.cursor.map(|i| self.steps[i])
    }

    /// Move the cursor to the next step. Returns `false`, leaving the
    /// cursor on the last step, when there is none.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next < self.steps.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// Put the cursor back before the first step.
    pub fn restart(&mut self) {
        self.cursor = None;
    }

    /// Steps after the cursor.
    pub fn remaining(&self) -> &[Point] {
        let from = self.cursor.map_or(0, |i| i + 1);
        &self.steps[from..]
    }

    /// Every step, start first.
    #[inline]
    pub fn steps(&self) -> &[Point] {
        &self.steps
    }

    /// Total cost of the route for the agent it was computed for.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cells, endpoints included. Never zero.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.steps[0]
    }

    /// The last cell of the route.
    #[inline]
    pub fn end(&self) -> Point {
        self.steps[self.steps.len() - 1]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Wire form of a [`Path`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPath {
    steps: Vec<Point>,
    cost: f64,
    destination: Point,
    cursor: Option<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPath> for Path {
    type Error = String;

    fn try_from(raw: RawPath) -> Result<Self, String> {
        if raw.steps.is_empty() {
            return Err("a path has at least one step".into());
        }
        if let Some(i) = raw.cursor.filter(|&i| i >= raw.steps.len()) {
            return Err(format!(
                "path cursor {i} is past the last of {} steps",
                raw.steps.len()
            ));
        }
        Ok(Self {
            steps: raw.steps,
            cost: raw.cost,
            destination: raw.destination,
            cursor: raw.cursor,
        })
    }
}
