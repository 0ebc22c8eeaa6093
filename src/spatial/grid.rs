//! Generic grid for spatial data

use serde::{Deserialize, Serialize};

use crate::core::types::GridPos;

/// Flat, row-major 2D grid with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a grid from row-major data
    ///
    /// Returns None if the data length does not match the dimensions.
    pub fn from_rows(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of a position, None if out of bounds
    #[inline]
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.index(pos).is_some()
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<T> {
        self.index(pos).map(|i| self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        self.index(pos).map(move |i| &mut self.data[i])
    }

    /// Write a cell; out-of-bounds writes are ignored
    #[inline]
    pub fn set(&mut self, pos: GridPos, value: T) {
        if let Some(i) = self.index(pos) {
            self.data[i] = value;
        }
    }

    /// Nearest in-bounds position
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        GridPos::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    /// In-bounds 4-neighbors, in [`GridPos::neighbors`] order
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        pos.neighbors().into_iter().filter(|&n| self.in_bounds(n))
    }

    /// Positions in the square window of half-width `radius`, clipped to bounds
    pub fn window(&self, center: GridPos, radius: usize) -> impl Iterator<Item = GridPos> {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let x0 = center.x.saturating_sub(r).max(0);
        let y0 = center.y.saturating_sub(r).max(0);
        let x1 = center.x.saturating_add(r).min(self.width as i32 - 1);
        let y1 = center.y.saturating_add(r).min(self.height as i32 - 1);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| GridPos::new(x, y)))
    }

    /// All cells with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, T)> + '_ {
        let width = self.width.max(1);
        self.data.iter().enumerate().map(move |(i, &value)| {
            (GridPos::new((i % width) as i32, (i / width) as i32), value)
        })
    }

    pub fn count(&self, mut predicate: impl FnMut(T) -> bool) -> usize {
        self.data.iter().filter(|&&value| predicate(value)).count()
    }

    /// Raw row-major cell data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
