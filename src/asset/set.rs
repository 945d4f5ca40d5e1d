//! Resolved slideshow content.
//!
//! An [`AssetSet`] is built exactly once from the confirmed probe results
//! and never changes afterwards:
//!
//! ```text
//! [ Photo(order 1) , Photo(order 4) , Photo(order 7) , Wish ]
//!   └──────── sorted by catalog order ────────────┘   └ always last
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Asset {
    /// A photo confirmed to exist.
    Photo {
        path: PathBuf,
        /// Position of the candidate in the catalog.
        order: usize,
    },
    /// Closing birthday wish slide. Has no backing file.
    Wish,
}

impl Asset {
    /// Backing file path, `None` for the wish slide.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Photo { path, .. } => Some(path),
            Self::Wish => None,
        }
    }

    pub fn is_wish(&self) -> bool {
        matches!(self, Self::Wish)
    }
}

/// Ordered, immutable slide list terminated by exactly one [`Asset::Wish`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetSet {
    slides: Vec<Asset>,
}

impl AssetSet {
    /// Build from confirmed `(order, path)` pairs in any arrival order.
    ///
    /// Duplicate orders keep the first pair seen.
    pub fn from_confirmed(mut confirmed: Vec<(usize, PathBuf)>) -> Self {
        // Stable sort keeps arrival order among equal keys for dedup
        confirmed.sort_by_key(|(order, _)| *order);
        confirmed.dedup_by_key(|(order, _)| *order);

        let mut slides: Vec<Asset> = confirmed
            .into_iter()
            .map(|(order, path)| Asset::Photo { path, order })
            .collect();
        slides.push(Asset::Wish);

        Self { slides }
    }

    /// Set with no photos, only the wish slide.
    pub fn wish_only() -> Self {
        Self::from_confirmed(Vec::new())
    }

    /// Number of slides, wish included. Always at least 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.slides.iter()
    }

    /// Photo slides only, in catalog order.
    pub fn photos(&self) -> &[Asset] {
        &self.slides[..self.wish_index()]
    }

    pub fn photo_count(&self) -> usize {
        self.wish_index()
    }

    /// Index of the wish slide (always the last one).
    pub fn wish_index(&self) -> usize {
        self.slides.len() - 1
    }

    /// True when discovery found nothing and the presenter should show
    /// its "no photos" fallback.
    pub fn is_empty_of_photos(&self) -> bool {
        self.photo_count() == 0
    }

    /// Caption for the slide at `index`: `Memory N` for photos (1-based),
    /// `None` for the wish slide or an out-of-range index.
    pub fn caption(&self, index: usize) -> Option<String> {
        match self.slides.get(index)? {
            Asset::Photo { .. } => Some(format!("Memory {}", index + 1)),
            Asset::Wish => None,
        }
    }
}

impl<'a> IntoIterator for &'a AssetSet {
    type Item = &'a Asset;
    type IntoIter = std::slice::Iter<'a, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(path: &str, order: usize) -> Asset {
        Asset::Photo {
            path: PathBuf::from(path),
            order,
        }
    }

    #[test]
    fn test_from_confirmed_sorts_by_order() {
        let set = AssetSet::from_confirmed(vec![
            (7, PathBuf::from("7.jpg")),
            (1, PathBuf::from("1.jpg")),
            (4, PathBuf::from("4.png")),
        ]);

        let slides: Vec<_> = set.iter().cloned().collect();
        assert_eq!(
            slides,
            vec![photo("1.jpg", 1), photo("4.png", 4), photo("7.jpg", 7), Asset::Wish]
        );
    }

    #[test]
    fn test_wish_only() {
        let set = AssetSet::wish_only();
        assert_eq!(set.len(), 1);
        assert_eq!(set.wish_index(), 0);
        assert!(set.is_empty_of_photos());
        assert!(set.photos().is_empty());
        assert_eq!(set.get(0), Some(&Asset::Wish));
    }

    #[test]
    fn test_wish_is_last_and_unique() {
        let set = AssetSet::from_confirmed(vec![(0, "a.jpg".into()), (2, "c.jpg".into())]);
        assert_eq!(set.iter().filter(|a| a.is_wish()).count(), 1);
        assert!(set.get(set.len() - 1).unwrap().is_wish());
        assert_eq!(set.photo_count(), 2);
    }

    #[test]
    fn test_duplicate_order_keeps_first() {
        let set = AssetSet::from_confirmed(vec![(3, "first.jpg".into()), (3, "second.jpg".into())]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Some(&photo("first.jpg", 3)));
    }

    #[test]
    fn test_caption() {
        let set = AssetSet::from_confirmed(vec![(5, "5.jpg".into()), (9, "9.jpg".into())]);
        assert_eq!(set.caption(0).as_deref(), Some("Memory 1"));
        assert_eq!(set.caption(1).as_deref(), Some("Memory 2"));
        assert_eq!(set.caption(2), None);
        assert_eq!(set.caption(3), None);
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(photo("x.jpg", 0).path(), Some(Path::new("x.jpg")));
        assert_eq!(Asset::Wish.path(), None);
    }

    #[test]
    fn test_serialize_json() {
        let set = AssetSet::from_confirmed(vec![(1, "b.jpg".into())]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"photo","path":"b.jpg","order":1},{"kind":"wish"}]"#
        );
    }
}
