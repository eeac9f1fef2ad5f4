//! Interface model structs for serde deserialization.
//!
//! This module defines the abstract model of the Go package under mock:
//! packages, interfaces, methods, parameters, and a renderable type
//! descriptor. The model is produced by an external discovery collaborator
//! (source parsing or reflection) and handed over as JSON; this core only
//! reads it.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::generator::PackageMap;

/// A package containing the interfaces to mock.
#[derive(Debug, Deserialize)]
pub struct Package {
    /// Declared package name (e.g., "io").
    pub name: String,
    /// Import path of the package (e.g., "io" or "github.com/acme/store").
    #[serde(default)]
    pub pkg_path: Option<String>,
    /// Interfaces to generate mocks for.
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

impl Package {
    /// Parse a package model from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse interface model: {e}"))
    }
}

/// A single interface with its method set.
#[derive(Debug, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// One method of an interface.
///
/// Parameter order in `in_params` is significant: position determines both
/// synthetic naming and output ordering. A variadic parameter, when
/// present, occupies the final positional slot after `in_params`.
#[derive(Debug, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub in_params: Vec<Parameter>,
    #[serde(default)]
    pub variadic: Option<Parameter>,
    #[serde(default)]
    pub out_params: Vec<Parameter>,
}

/// A formal argument or result of a method.
#[derive(Debug, Deserialize)]
pub struct Parameter {
    /// Declared name. `None`, `""`, and `"_"` all mean "no usable name".
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: GoType,
}

/// Go type descriptor, renderable to its source spelling.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoType {
    /// Named type: `io.Reader`, `int`, `time.Time`.
    ///
    /// Predeclared and same-package types carry no import path. Types that
    /// this core never needs to decompose (function types, anonymous
    /// structs) are spelled here with a pre-rendered `name`.
    Named {
        #[serde(default)]
        import_path: Option<String>,
        name: String,
    },
    /// Pointer type: `*T`.
    Pointer { elem: Box<GoType> },
    /// Slice type: `[]T`.
    Slice { elem: Box<GoType> },
    /// Fixed-size array type: `[N]T`.
    Array { len: usize, elem: Box<GoType> },
    /// Map type: `map[K]V`.
    Map { key: Box<GoType>, value: Box<GoType> },
    /// Channel type: `chan T`, `<-chan T`, `chan<- T`.
    Chan { dir: ChanDir, elem: Box<GoType> },
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    Both,
    Recv,
    Send,
}

impl GoType {
    /// Render the Go spelling of this type.
    ///
    /// Named types whose import path has an entry in `packages` are
    /// qualified as `ident.Name`. A missing entry renders the bare name:
    /// the generated file then under-qualifies the reference and the Go
    /// compiler surfaces it, rather than this core guessing an alias.
    pub fn render(&self, packages: &PackageMap) -> String {
        match self {
            GoType::Named { import_path, name } => match import_path {
                Some(path) => match packages.get(path) {
                    Some(ident) => format!("{ident}.{name}"),
                    None => name.clone(),
                },
                None => name.clone(),
            },
            GoType::Pointer { elem } => format!("*{}", elem.render(packages)),
            GoType::Slice { elem } => format!("[]{}", elem.render(packages)),
            GoType::Array { len, elem } => format!("[{}]{}", len, elem.render(packages)),
            GoType::Map { key, value } => {
                format!("map[{}]{}", key.render(packages), value.render(packages))
            }
            GoType::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Recv => "<-chan ",
                    ChanDir::Send => "chan<- ",
                };
                format!("{}{}", prefix, elem.render(packages))
            }
        }
    }

    /// Collect every import path mentioned in this type tree.
    pub fn collect_imports(&self, out: &mut BTreeSet<String>) {
        match self {
            GoType::Named { import_path, .. } => {
                if let Some(path) = import_path {
                    out.insert(path.clone());
                }
            }
            GoType::Pointer { elem } | GoType::Slice { elem } | GoType::Chan { elem, .. } => {
                elem.collect_imports(out);
            }
            GoType::Array { elem, .. } => elem.collect_imports(out),
            GoType::Map { key, value } => {
                key.collect_imports(out);
                value.collect_imports(out);
            }
        }
    }
}

impl Parameter {
    /// The declared name, if it is usable as an identifier in emitted code.
    ///
    /// `""` and `"_"` never leak through; both mean the parameter needs a
    /// synthetic name.
    pub fn usable_name(&self) -> Option<&str> {
        match self.name.as_deref() {
            Some("") | Some("_") | None => None,
            Some(name) => Some(name),
        }
    }
}
