//! protocol::params
//!
//! Flat parameter binding for the URL-scheme transport.
//!
//! # Design
//!
//! The URL scheme delivers a flat string-to-string map. [`FlatParams`] wraps
//! that map and extracts the recognized keys, parsing booleans tolerantly:
//! case-insensitive `"true"`/`"false"` are recognized, anything else
//! (including absence) is unset. Binding is purely syntactic; it never
//! enforces business rules.

use std::collections::HashMap;

use super::request::{AddPayload, EditPayload, RenamePayload};

/// Recognized parameter keys of the URL-scheme transport.
pub mod keys {
    /// Project identifier.
    pub const PROJECT: &str = "project";
    /// Changelist name.
    pub const NAME: &str = "name";
    /// New changelist name (rename).
    pub const NEW_NAME: &str = "new-name";
    /// Changelist comment.
    pub const COMMENT: &str = "comment";
    /// Activation flag.
    pub const ACTIVE: &str = "active";
    /// Substitute the canonical default changelist name (activate verb).
    pub const DEFAULT: &str = "default";
}

/// View over a flat parameter map with typed accessors.
#[derive(Debug, Clone, Copy)]
pub struct FlatParams<'a> {
    map: &'a HashMap<String, String>,
}

impl<'a> FlatParams<'a> {
    /// Wrap a raw parameter map.
    pub fn new(map: &'a HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Raw string value of a key.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).map(String::as_str)
    }

    /// The `project` parameter.
    pub fn project(&self) -> Option<&'a str> {
        self.get(keys::PROJECT)
    }

    /// The `name` parameter.
    pub fn name(&self) -> Option<&'a str> {
        self.get(keys::NAME)
    }

    /// The `new-name` parameter.
    pub fn new_name(&self) -> Option<&'a str> {
        self.get(keys::NEW_NAME)
    }

    /// Whether the caller supplied `new-name` at all (routes `update` to
    /// rename instead of edit).
    pub fn has_new_name(&self) -> bool {
        self.map.contains_key(keys::NEW_NAME)
    }

    /// The `comment` parameter.
    pub fn comment(&self) -> Option<&'a str> {
        self.get(keys::COMMENT)
    }

    /// The `active` flag, if parseable.
    pub fn active(&self) -> Option<bool> {
        self.get(keys::ACTIVE).and_then(parse_bool)
    }

    /// The `default` flag, if parseable.
    pub fn default_flag(&self) -> Option<bool> {
        self.get(keys::DEFAULT).and_then(parse_bool)
    }

    /// Bind the creation payload of the `add` verb.
    pub fn add_payload(&self) -> AddPayload {
        AddPayload {
            name: self.name().map(str::to_owned),
            comment: self.comment().map(str::to_owned),
            active: self.active(),
        }
    }

    /// Bind the edit payload of the `update` verb.
    pub fn edit_payload(&self) -> EditPayload {
        EditPayload {
            comment: self.comment().map(str::to_owned),
            active: self.active(),
        }
    }

    /// Bind the rename payload of the `update` verb with `new-name`.
    pub fn rename_payload(&self) -> RenamePayload {
        RenamePayload {
            new_name: self.new_name().map(str::to_owned),
            comment: self.comment().map(str::to_owned),
            active: self.active(),
        }
    }
}

/// Parse a boolean parameter: case-insensitive `"true"`/`"false"`, anything
/// else is unset.
fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
