//! Candidate catalogs for photo discovery.
//!
//! A [`Catalog`] is the fixed, ordered list of paths the resolver probes.
//! The position of a name in the catalog becomes the photo's `order`, so
//! catalog order is slideshow order.
//!
//! Three sources are supported:
//!
//! | Source      | Order                                              |
//! |-------------|----------------------------------------------------|
//! | builtin     | `1..=20` jpg, jpeg, png, then `1..=10` gif, webp   |
//! | manifest    | as listed in the manifest file                     |
//! | directory   | numeric stems ascending, then names, then ext rank |

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use super::ImageFormat;

/// Builtin catalog layout: (extension, highest number).
const BUILTIN_LAYOUT: [(&str, usize); 5] = [
    ("jpg", 20),
    ("jpeg", 20),
    ("png", 20),
    ("gif", 10),
    ("webp", 10),
];

/// Errors while materialising a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error when reading manifest `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("manifest `{0}` is not valid")]
    Manifest(PathBuf, #[source] toml::de::Error),
}

/// Ordered list of candidate paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    names: Vec<PathBuf>,
}

impl Catalog {
    /// Build from names, dropping repeats (first occurrence wins).
    pub fn from_names<I, P>(names: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = FxHashSet::default();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|p: &PathBuf| seen.insert(p.clone()))
            .collect();
        Self { names }
    }

    /// The compiled-in catalog, every name prefixed with `dir`.
    pub fn builtin(dir: &Path) -> Self {
        let names = BUILTIN_LAYOUT.iter().flat_map(|&(ext, max)| {
            (1..=max).map(move |n| dir.join(format!("{n}.{ext}")))
        });
        Self::from_names(names)
    }

    /// Load a TOML manifest listing image names relative to `dir`.
    ///
    /// ```toml
    /// images = ["beach.jpg", "party.png", "cake.webp"]
    /// ```
    pub fn from_manifest(manifest: &Path, dir: &Path) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct Manifest {
            images: Vec<PathBuf>,
        }

        let content = std::fs::read_to_string(manifest)
            .map_err(|err| CatalogError::Io(manifest.to_path_buf(), err))?;
        let parsed: Manifest = toml::from_str(&content)
            .map_err(|err| CatalogError::Manifest(manifest.to_path_buf(), err))?;

        Ok(Self::from_names(
            parsed.images.into_iter().map(|name| dir.join(name)),
        ))
    }

    /// List `root/dir` and keep files with a supported image extension.
    ///
    /// Returned paths are relative to `root` (`dir/<name>`). A missing
    /// directory yields an empty catalog.
    pub fn from_directory(root: &Path, dir: &Path) -> Self {
        let Ok(entries) = std::fs::read_dir(root.join(dir)) else {
            return Self::default();
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| ImageFormat::from_path(Path::new(name)).is_some())
            .collect();

        names.sort_by(|a, b| natural_cmp(a, b));
        Self::from_names(names.into_iter().map(|name| dir.join(name)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Candidates with their catalog position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.names.iter().map(PathBuf::as_path).enumerate()
    }
}

/// Natural order for image file names.
///
/// Numeric stems sort first and numerically (`2.jpg` < `10.jpg`), other
/// stems sort lexicographically after them. Equal stems fall back to the
/// builtin extension rank.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_stem, a_ext) = split_name(a);
    let (b_stem, b_ext) = split_name(b);

    let stem_order = match (a_stem.parse::<u64>(), b_stem.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a_stem.cmp(b_stem),
    };

    stem_order
        .then_with(|| ext_rank(a_ext).cmp(&ext_rank(b_ext)))
        .then_with(|| a.cmp(b))
}

fn split_name(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or((name, ""))
}

fn ext_rank(ext: &str) -> u8 {
    ImageFormat::extension_rank(ext).unwrap_or(u8::MAX)
}
