use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A dense, bounded 2D grid stored in row-major order.
///
/// Used as the backing storage for the tile store and as scratch space
/// (visited indices, flood-fill radii) by the search and the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Tilemap<T> {
    /// Build a map by calling `init` once per cell, in row-major order.
    pub fn from_fn(width: usize, height: usize, mut init: impl FnMut(Point) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(init(Point::new(x as i32, y as i32)));
            }
        }
        Self { width, height, data }
    }

    /// Whether the point lies inside the map.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Offset of `point` into the backing storage, if it is inside the map.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        if self.contains(point) {
            Some(point.y as usize * self.width + point.x as usize)
        } else {
            None
        }
    }

    /// Coordinate stored at the given offset.
    pub fn point_at(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn get(&self, point: Point) -> Option<&T> {
        self.index_of(point).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, point: Point) -> Option<&mut T> {
        let idx = self.index_of(point)?;
        self.data.get_mut(idx)
    }

    pub fn set(&mut self, point: Point, value: T) {
        self[point] = value;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, val)| (self.point_at(idx), val))
    }

    /// Cell values in storage order.
    pub fn values(&self) -> &[T] {
        &self.data
    }
}

/// Indexing with an out-of-bounds point is a programming error and panics.
impl<T> Index<Point> for Tilemap<T> {
    type Output = T;

    fn index(&self, point: Point) -> &T {
        match self.index_of(point) {
            Some(idx) => &self.data[idx],
            None => panic!(
                "point {} is outside the {}x{} tilemap",
                point, self.width, self.height
            ),
        }
    }
}

impl<T> IndexMut<Point> for Tilemap<T> {
    fn index_mut(&mut self, point: Point) -> &mut T {
        match self.index_of(point) {
            Some(idx) => &mut self.data[idx],
            None => panic!(
                "point {} is outside the {}x{} tilemap",
                point, self.width, self.height
            ),
        }
    }
}
