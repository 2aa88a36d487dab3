use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::bands::ScoreBand;

/// Static description of a band's default bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Financial/advisory product recommended to farmers in a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product<B> {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score_band: B,
}

impl<B: ScoreBand> Product<B> {
    pub fn standard(band: B) -> Self {
        let bundle = band.bundle();
        Self {
            id: bundle.id.to_string(),
            title: bundle.title.to_string(),
            description: bundle.description.to_string(),
            score_band: band,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product catalog must contain at least one product")]
    Empty,
    #[error("product catalog lists band '{0}' more than once")]
    DuplicateBand(&'static str),
    #[error("failed to read product catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid product catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Band-keyed product table. Never empty, so [`ProductCatalog::lookup`] is total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProductCatalog<B> {
    products: Vec<Product<B>>,
}

impl<B: ScoreBand> ProductCatalog<B> {
    pub fn new(products: Vec<Product<B>>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.score_band) {
                return Err(CatalogError::DuplicateBand(product.score_band.key()));
            }
        }

        Ok(Self { products })
    }

    /// One product per band, declared from the lowest tier up.
    pub fn standard() -> Self {
        Self {
            products: B::ordered().iter().copied().map(Product::standard).collect(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let products: Vec<Product<B>> = serde_json::from_reader(reader)?;
        Self::new(products)
    }

    /// Exact match on band.
    pub fn find(&self, band: B) -> Option<&Product<B>> {
        self.products
            .iter()
            .find(|product| product.score_band == band)
    }

    /// Product for `band`, or the first-declared product when the catalog has no entry for it.
    /// The fallback is not a signal that the band matched.
    pub fn lookup(&self, band: B) -> &Product<B> {
        self.find(band).unwrap_or_else(|| self.fallback())
    }

    /// First-declared product, served for bands without an entry.
    pub fn fallback(&self) -> &Product<B> {
        &self.products[0]
    }

    pub fn products(&self) -> &[Product<B>] {
        &self.products
    }

    /// Bands in the active enumeration that have no catalog entry.
    pub fn missing_bands(&self) -> Vec<B> {
        B::ordered()
            .iter()
            .copied()
            .filter(|band| self.find(*band).is_none())
            .collect()
    }
}

impl<B: ScoreBand> Default for ProductCatalog<B> {
    fn default() -> Self {
        Self::standard()
    }
}
