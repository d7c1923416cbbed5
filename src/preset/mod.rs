//! Named parameter sets: XML documents, the factory bank and a directory store.

pub mod factory;
pub mod store;
pub mod xml;

pub use factory::{factory_preset, factory_presets};
pub use store::PresetStore;

use crate::error::Result;
use crate::state::ChainState;

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub state: ChainState,
}

impl Preset {
    pub fn new(name: impl Into<String>, state: ChainState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        xml::write_preset(&self.name, &self.state)
    }

    /// Parse a document on top of the default state.
    pub fn from_xml(document: &str) -> Result<Self> {
        Self::from_xml_onto(document, &ChainState::default())
    }

    /// Parse a document on top of `base`; attributes the document leaves out keep `base`'s values.
    pub fn from_xml_onto(document: &str, base: &ChainState) -> Result<Self> {
        let (name, state) = xml::read_preset(document, base)?;
        Ok(Self::new(name.unwrap_or_default(), state))
    }
}
