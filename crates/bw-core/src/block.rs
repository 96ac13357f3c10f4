//! Block descriptors.
//!
//! A block is recognised only by how it looks: its shape, size and colour.
//! Some agents cannot perceive colour, so a [`Visualization`] may carry an
//! unknown colour, and every comparison has to tolerate that.

use std::cmp::Ordering;
use std::fmt;

/// A colour as the host engine reports it, e.g. `"#ff0000"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Colour(pub String);

impl Colour {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The observable descriptor of a block.
///
/// Field order matches the wire form (`{"size": .., "shape": .., "colour": ..}`).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visualization {
    pub size: f64,
    pub shape: u8,
    /// `None` when the colour channel is suppressed for the observer.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "colour_serde::deserialize"))]
    pub colour: Option<Colour>,
}

impl Visualization {
    pub fn new(shape: u8, size: f64, colour: Option<Colour>) -> Self {
        Self { size, shape, colour }
    }

    /// Same block with the colour channel removed.
    pub fn without_colour(&self) -> Visualization {
        Visualization { colour: None, ..self.clone() }
    }

    /// Loose equality: shape and size must agree; colour is compared only
    /// when both sides know it.
    pub fn matches(&self, other: &Visualization) -> bool {
        let same_form = self.shape == other.shape
            && self.size.total_cmp(&other.size) == Ordering::Equal;
        match (&self.colour, &other.colour) {
            (Some(a), Some(b)) => same_form && a == b,
            _ => same_form,
        }
    }
}

/// Free-function form of [`Visualization::matches`].
#[inline]
pub fn visualizations_match(a: &Visualization, b: &Visualization) -> bool {
    a.matches(b)
}

/// Strict equality, colour included.  Use [`Visualization::matches`] for
/// block recognition.
impl PartialEq for Visualization {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.size.total_cmp(&other.size) == Ordering::Equal
            && self.colour == other.colour
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.colour {
            Some(c) => write!(f, "shape {} size {} colour {}", self.shape, self.size, c),
            None    => write!(f, "shape {} size {} colour ?", self.shape, self.size),
        }
    }
}

#[cfg(feature = "serde")]
mod colour_serde {
    use serde::{Deserialize, Deserializer};

    use super::Colour;

    /// Accepts `null`, a colour string, or the legacy `"None"` placeholder
    /// that colour-blind senders write.
    pub fn deserialize<'de, D>(de: D) -> Result<Option<Colour>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(de)?;
        Ok(raw.filter(|s| s != "None").map(Colour))
    }
}
