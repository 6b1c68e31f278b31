use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single renderable unit on the track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    /// Content width in pixels
    pub width: u32,
    /// Left margin in pixels
    pub margin: u32,
}

impl Item {
    pub fn new(label: impl Into<String>, width: u32, margin: u32) -> Self {
        Self {
            label: label.into(),
            width,
            margin,
        }
    }

    /// Width the item occupies on the track (content plus left margin)
    #[inline]
    pub fn outer_width(&self) -> u32 {
        self.width + self.margin
    }
}

/// Ordered strip of items plus its offset and width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    items: Vec<Item>,
    offset: i32,
    width: u32,
}

impl Track {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            offset: 0,
            width: 0,
        }
    }

    /// Build a track of equally sized items from labels
    pub fn uniform<I, S>(labels: I, width: u32, margin: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            labels
                .into_iter()
                .map(|label| Item::new(label, width, margin))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Result<&Item> {
        self.items
            .get(index)
            .ok_or_else(|| Error::Viewport(format!("no item at index {}", index)))
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Labels in current order
    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|item| item.label.clone()).collect()
    }

    /// Move the item at `index` to the head
    pub fn rotate_to_front(&mut self, index: usize) -> Result<()> {
        self.get(index)?;
        let item = self.items.remove(index);
        self.items.insert(0, item);
        Ok(())
    }

    /// Move the item at `index` to the tail
    pub fn rotate_to_back(&mut self, index: usize) -> Result<()> {
        self.get(index)?;
        let item = self.items.remove(index);
        self.items.push(item);
        Ok(())
    }

    /// Map a track-space x coordinate to the item under it and the column
    /// inside that item. Returns `None` left of the first item or past the last.
    pub fn item_at(&self, x: i64) -> Option<(usize, u32)> {
        if x < 0 {
            return None;
        }
        let mut start = 0i64;
        for (idx, item) in self.items.iter().enumerate() {
            let end = start + item.outer_width() as i64;
            if x < end {
                return Some((idx, (x - start) as u32));
            }
            start = end;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Track {
        Track::uniform(["A", "B", "C", "D", "E"], 100, 5)
    }

    #[test]
    fn test_outer_width_includes_margin() {
        assert_eq!(Item::new("A", 100, 5).outer_width(), 105);
    }

    #[test]
    fn test_rotate_to_front_and_back() {
        let mut track = abc();
        track.rotate_to_front(4).unwrap();
        assert_eq!(track.labels(), vec!["E", "A", "B", "C", "D"]);
        track.rotate_to_back(0).unwrap();
        assert_eq!(track.labels(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_rotate_out_of_range() {
        let mut track = abc();
        assert!(matches!(track.rotate_to_back(5), Err(Error::Viewport(_))));
        assert_eq!(track.len(), 5);
    }

    #[test]
    fn test_item_at() {
        let track = abc();
        assert_eq!(track.item_at(-1), None);
        assert_eq!(track.item_at(0), Some((0, 0)));
        assert_eq!(track.item_at(104), Some((0, 104)));
        assert_eq!(track.item_at(105), Some((1, 0)));
        assert_eq!(track.item_at(524), Some((4, 104)));
        assert_eq!(track.item_at(525), None);
    }
}
