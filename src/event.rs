use ahash::AHashMap;
#[cfg(feature = "dump")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Collision event as handed over by the event-access layer
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "dump", derive(Deserialize, Serialize))]
pub struct Event {
    /// Run, luminosity block, and event number
    #[cfg_attr(feature = "dump", serde(flatten))]
    pub id: EventId,
    /// Labelled product collections
    #[cfg_attr(feature = "dump", serde(default))]
    pub products: AHashMap<String, Product>,
}

/// Three-part identifier of a recorded collision
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "dump", derive(Deserialize, Serialize))]
pub struct EventId {
    pub run: u32,
    /// Luminosity block
    pub lumi: u32,
    pub event: u64,
}

/// A product collection stored under some label
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(Deserialize, Serialize))]
#[cfg_attr(
    feature = "dump",
    serde(tag = "type", content = "items", rename_all = "snake_case")
)]
pub enum Product {
    Jets(Vec<Jet>),
    Subjets(Vec<Subjet>),
}

impl Product {
    /// Name of the stored type, as the framework spells it
    pub fn type_name(&self) -> &'static str {
        match self {
            Product::Jets(_) => <Vec<Jet> as FromProduct>::TYPE_NAME,
            Product::Subjets(_) => <Vec<Subjet> as FromProduct>::TYPE_NAME,
        }
    }
}

/// Large-radius jet
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "dump", derive(Deserialize, Serialize))]
pub struct Jet {
    /// Transverse momentum in GeV
    pub pt: f64,
    /// Groomed subjets, keyed by grooming algorithm
    #[cfg_attr(feature = "dump", serde(default))]
    pub subjets: AHashMap<String, Vec<Subjet>>,
}

impl Jet {
    pub fn new(pt: f64) -> Self {
        Self {
            pt,
            subjets: AHashMap::new(),
        }
    }

    pub fn with_subjets(
        mut self,
        algorithm: &str,
        subjets: impl IntoIterator<Item = Subjet>,
    ) -> Self {
        self.subjets
            .entry(algorithm.to_owned())
            .or_default()
            .extend(subjets);
        self
    }

    /// Subjets produced by the named grooming algorithm
    ///
    /// Empty if the jet carries none for this algorithm.
    pub fn subjets(&self, algorithm: &str) -> &[Subjet] {
        self.subjets
            .get(algorithm)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "dump", derive(Deserialize, Serialize))]
pub struct Subjet {
    /// Transverse momentum in GeV
    pub pt: f64,
}

impl Subjet {
    pub fn new(pt: f64) -> Self {
        Self { pt }
    }
}

/// Product types that can be looked up by label
pub trait FromProduct {
    const TYPE_NAME: &'static str;

    fn from_product(product: &Product) -> Option<&Self>;
}

impl FromProduct for Vec<Jet> {
    const TYPE_NAME: &'static str = "std::vector<pat::Jet>";

    fn from_product(product: &Product) -> Option<&Self> {
        match product {
            Product::Jets(jets) => Some(jets),
            _ => None,
        }
    }
}

impl FromProduct for Vec<Subjet> {
    const TYPE_NAME: &'static str = "std::vector<pat::Jet> (subjets)";

    fn from_product(product: &Product) -> Option<&Self> {
        match product {
            Product::Subjets(subjets) => Some(subjets),
            _ => None,
        }
    }
}

impl Event {
    pub fn new(run: u32, lumi: u32, event: u64) -> Self {
        Self {
            id: EventId { run, lumi, event },
            products: AHashMap::new(),
        }
    }

    pub fn with_product(mut self, label: &str, product: Product) -> Self {
        self.products.insert(label.to_owned(), product);
        self
    }

    /// Look up the product stored under `label` as type `T`
    pub fn fetch<T: FromProduct>(&self, label: &str) -> Result<&T, Error> {
        let product = self
            .products
            .get(label)
            .ok_or_else(|| Error::MissingProduct {
                label: label.to_owned(),
                expected: T::TYPE_NAME,
            })?;
        T::from_product(product).ok_or_else(|| Error::ProductType {
            label: label.to_owned(),
            expected: T::TYPE_NAME,
            found: product.type_name(),
        })
    }
}
