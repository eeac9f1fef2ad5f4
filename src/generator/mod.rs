//! Generation planning: model to rendered signature fragments.
//!
//! This module composes the three helpers into a single pass over a
//! package model:
//! 1. Collect the import paths referenced anywhere in the model.
//! 2. Resolve them to package identifiers (once per generation pass).
//! 3. Per method: assign argument names, render type spellings against the
//!    package map, and format the grouped parameter list.
//!
//! The resulting [`PackagePlan`] is what the mock-body emitter consumes;
//! emitting struct bodies, recorders, and files is its job, not ours.

mod args;
mod packages;

pub use args::{arg_names, arg_string};
pub use packages::{create_package_map, GoListLoader, PackageLoader, PackageMap};

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{Interface, Method, Package};

/// Rendered fragments for one method, ready for signature emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPlan {
    pub name: String,
    /// One display name per parameter, in declaration order.
    pub arg_names: Vec<String>,
    /// Grouped parameter-list fragment, e.g. `"arg0, arg1 int, arg2 bool"`.
    pub arg_string: String,
    /// Result-list fragment: `""`, `"error"`, or `"(int, error)"`.
    pub return_string: String,
}

/// All method plans for one interface.
#[derive(Debug, Clone)]
pub struct InterfacePlan {
    pub name: String,
    /// Name of the generated mock type, e.g. `MockStore`.
    pub mock_name: String,
    pub methods: Vec<MethodPlan>,
}

/// Output of one generation pass over a package model.
#[derive(Debug, Clone)]
pub struct PackagePlan {
    pub interfaces: Vec<InterfacePlan>,
    /// Import path to package identifier mapping for the emitter to
    /// qualify references and build the import block.
    pub packages: PackageMap,
}

/// Walks a package model and produces the fragments the emitter needs.
///
/// Stateless across calls; each [`plan`](Generator::plan) invocation is a
/// self-contained transformation over its input.
#[derive(Debug)]
pub struct Generator<'a, L: PackageLoader + ?Sized> {
    loader: &'a L,
}

impl<'a, L: PackageLoader + ?Sized> Generator<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Generator { loader }
    }

    /// Plan one generation pass over `package`.
    ///
    /// Structural violations in the model (an interface or method without
    /// a name) abort the pass; they signal a defect in the upstream model
    /// builder. Unresolvable import paths do not: the affected references
    /// render unqualified and the import is left out of the map.
    pub fn plan(&self, package: &Package) -> Result<PackagePlan, String> {
        let import_paths = collect_import_paths(package);
        debug!(
            package = %package.name,
            interfaces = package.interfaces.len(),
            import_paths = import_paths.len(),
            "Planning mock generation."
        );
        let packages = create_package_map(&import_paths, self.loader);

        let interfaces = package
            .interfaces
            .iter()
            .map(|iface| plan_interface(iface, &packages))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PackagePlan {
            interfaces,
            packages,
        })
    }
}

/// Collect the distinct import paths referenced by any type in the model.
///
/// The mocked package's own path is excluded: references to it render
/// unqualified, since the generated mock lives in that package.
fn collect_import_paths(package: &Package) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for iface in &package.interfaces {
        for method in &iface.methods {
            for param in method
                .in_params
                .iter()
                .chain(method.variadic.iter())
                .chain(method.out_params.iter())
            {
                param.ty.collect_imports(&mut paths);
            }
        }
    }
    if let Some(own_path) = &package.pkg_path {
        paths.remove(own_path);
    }
    paths.into_iter().collect()
}

fn plan_interface(iface: &Interface, packages: &PackageMap) -> Result<InterfacePlan, String> {
    if iface.name.is_empty() {
        return Err("Interface with empty name in model.".to_string());
    }
    let methods = iface
        .methods
        .iter()
        .map(|method| plan_method(iface, method, packages))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(InterfacePlan {
        name: iface.name.clone(),
        mock_name: format!("Mock{}", iface.name),
        methods,
    })
}

fn plan_method(
    iface: &Interface,
    method: &Method,
    packages: &PackageMap,
) -> Result<MethodPlan, String> {
    if method.name.is_empty() {
        return Err(format!(
            "Method with empty name on interface '{}'.",
            iface.name
        ));
    }

    let names = arg_names(method);
    let mut types: Vec<String> = method
        .in_params
        .iter()
        .map(|p| p.ty.render(packages))
        .collect();
    if let Some(variadic) = &method.variadic {
        types.push(format!("...{}", variadic.ty.render(packages)));
    }
    let arg_string = arg_string(&names, &types);

    let rets: Vec<String> = method
        .out_params
        .iter()
        .map(|p| p.ty.render(packages))
        .collect();
    let return_string = match rets.len() {
        0 => String::new(),
        1 => rets.into_iter().next().unwrap_or_default(),
        _ => format!("({})", rets.join(", ")),
    };

    Ok(MethodPlan {
        name: method.name.clone(),
        arg_names: names,
        arg_string,
        return_string,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::model::{GoType, Parameter};

    struct StubLoader {
        names: HashMap<&'static str, &'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl StubLoader {
        fn new() -> Self {
            StubLoader {
                names: HashMap::from([
                    ("context", "context"),
                    ("io", "io"),
                    ("golang.org/x/tools/present", "present"),
                ]),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PackageLoader for StubLoader {
        fn load(&self, import_path: &str) -> Option<String> {
            self.calls.lock().unwrap().push(import_path.to_string());
            self.names.get(import_path).map(|name| name.to_string())
        }
    }

    fn named(path: Option<&str>, name: &str) -> GoType {
        GoType::Named {
            import_path: path.map(str::to_string),
            name: name.to_string(),
        }
    }

    fn param(name: Option<&str>, ty: GoType) -> Parameter {
        Parameter {
            name: name.map(str::to_string),
            ty,
        }
    }

    fn store_package() -> Package {
        Package {
            name: "store".to_string(),
            pkg_path: Some("github.com/acme/store".to_string()),
            interfaces: vec![Interface {
                name: "Store".to_string(),
                methods: vec![
                    Method {
                        name: "Get".to_string(),
                        in_params: vec![
                            param(Some("ctx"), named(Some("context"), "Context")),
                            param(None, named(None, "string")),
                        ],
                        variadic: None,
                        out_params: vec![
                            param(None, named(None, "string")),
                            param(None, named(None, "error")),
                        ],
                    },
                    Method {
                        name: "Put".to_string(),
                        in_params: vec![
                            param(Some("key"), named(None, "string")),
                            param(Some("value"), named(None, "string")),
                        ],
                        variadic: None,
                        out_params: vec![param(None, named(None, "error"))],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_plan_renders_method_fragments() {
        let loader = StubLoader::new();
        let plan = Generator::new(&loader).plan(&store_package()).unwrap();

        assert_eq!(plan.interfaces.len(), 1);
        let iface = &plan.interfaces[0];
        assert_eq!(iface.mock_name, "MockStore");

        let get = &iface.methods[0];
        assert_eq!(get.arg_names, vec!["ctx", "arg1"]);
        assert_eq!(get.arg_string, "ctx context.Context, arg1 string");
        assert_eq!(get.return_string, "(string, error)");

        let put = &iface.methods[1];
        // Adjacent string parameters share one grouped run.
        assert_eq!(put.arg_string, "key, value string");
        assert_eq!(put.return_string, "error");
    }

    #[test]
    fn test_plan_resolves_each_import_path_once() {
        let loader = StubLoader::new();
        let mut package = store_package();
        package.interfaces.push(Interface {
            name: "Watcher".to_string(),
            methods: vec![Method {
                name: "Watch".to_string(),
                in_params: vec![param(Some("ctx"), named(Some("context"), "Context"))],
                variadic: None,
                out_params: vec![param(
                    None,
                    GoType::Chan {
                        dir: crate::model::ChanDir::Recv,
                        elem: Box::new(named(Some("io"), "Reader")),
                    },
                )],
            }],
        });

        let plan = Generator::new(&loader).plan(&package).unwrap();
        assert_eq!(plan.packages.len(), 2);

        let mut calls = loader.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["context".to_string(), "io".to_string()]);
    }

    #[test]
    fn test_plan_excludes_own_package_path() {
        let loader = StubLoader::new();
        let mut package = store_package();
        package.interfaces[0].methods[0].out_params[0] =
            param(None, named(Some("github.com/acme/store"), "Record"));

        let plan = Generator::new(&loader).plan(&package).unwrap();
        assert!(!plan.packages.contains_key("github.com/acme/store"));
        // Same-package references render unqualified.
        assert_eq!(plan.interfaces[0].methods[0].return_string, "(Record, error)");
    }

    #[test]
    fn test_plan_variadic_renders_ellipsis() {
        let loader = StubLoader::new();
        let package = Package {
            name: "log".to_string(),
            pkg_path: None,
            interfaces: vec![Interface {
                name: "Sink".to_string(),
                methods: vec![Method {
                    name: "Emit".to_string(),
                    in_params: vec![param(Some("format"), named(None, "string"))],
                    variadic: Some(param(None, GoType::Slice {
                        elem: Box::new(named(None, "byte")),
                    })),
                    out_params: vec![],
                }],
            }],
        };

        let plan = Generator::new(&loader).plan(&package).unwrap();
        let emit = &plan.interfaces[0].methods[0];
        assert_eq!(emit.arg_names, vec!["format", "arg1"]);
        assert_eq!(emit.arg_string, "format string, arg1 ...[]byte");
        assert_eq!(emit.return_string, "");
    }

    #[test]
    fn test_plan_rejects_unnamed_method() {
        let loader = StubLoader::new();
        let mut package = store_package();
        package.interfaces[0].methods[0].name = String::new();

        let err = Generator::new(&loader).plan(&package).unwrap_err();
        assert!(err.contains("empty name"));
        assert!(err.contains("Store"));
    }
}
