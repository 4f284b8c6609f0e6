//! Static reference tables for the gable configuration language.
//!
//! Everything in this crate is immutable `&'static` data constructed at
//! compile time: section (node) names, bare flags, properties with their
//! declared value kinds, bind actions, key modifiers and special key names.
//! The analysis layer consumes these tables read-only for the lifetime of
//! the process; there is no registry to mutate and nothing to initialize.

pub mod actions;
pub mod keys;
pub mod nodes;
pub mod properties;

pub use actions::{action, ActionDef, ACTIONS};
pub use keys::{key_modifier, special_key, KeyDef, KEY_MODIFIERS, SPECIAL_KEYS};
pub use nodes::{flag, is_flag, is_node, node, FlagDef, NodeDef, FLAGS, NODES, RECOGNIZED_BLOCKS};
pub use properties::{
    literal_doc, properties_for_block, property, PropertyDef, ValueKind, LITERALS, PROPERTIES,
};
