//! Argument naming and parameter-list formatting.
//!
//! Both helpers are pure: naming assigns one display name per positional
//! parameter, formatting renders the grouped Go parameter-list fragment
//! consumed verbatim inside an emitted function signature.

use crate::model::Method;

/// Assign a display name to every parameter of `method`, in order.
///
/// The declared name is used verbatim when present; a missing name (or the
/// `_` placeholder) is replaced by `arg{i}` where `i` is the parameter's
/// absolute position over the full list, variadic slot included. Synthetic
/// names therefore never collide with each other; a collision with a
/// caller-supplied name (e.g., a real parameter literally named `arg1`) is
/// not detected here.
pub fn arg_names(method: &Method) -> Vec<String> {
    let mut names = Vec::with_capacity(method.in_params.len() + 1);
    for (i, param) in method
        .in_params
        .iter()
        .chain(method.variadic.iter())
        .enumerate()
    {
        match param.usable_name() {
            Some(name) => names.push(name.to_string()),
            None => names.push(format!("arg{i}")),
        }
    }
    names
}

/// Render a Go parameter-list fragment from parallel name/type sequences.
///
/// Maximal contiguous runs of parameters sharing the same type string are
/// grouped, Go declaration style: `["a", "b", "c"]` with
/// `["int", "int", "bool"]` renders `"a, b int, c bool"`. Only adjacent
/// equal types merge; merging non-adjacent repeats would reorder
/// parameters in the rendered text. Type equality is exact string
/// equality of the rendered spellings.
///
/// # Panics
///
/// Panics if the sequences differ in length. That is a caller bug in the
/// upstream model builder, never input variance, and silently truncating
/// would emit a signature missing parameters.
pub fn arg_string(names: &[String], types: &[String]) -> String {
    assert_eq!(
        names.len(),
        types.len(),
        "mismatched argument name/type counts"
    );

    let mut groups: Vec<String> = Vec::new();
    let mut run_names: Vec<&str> = Vec::new();

    for (i, (name, ty)) in names.iter().zip(types.iter()).enumerate() {
        run_names.push(name);
        let run_ends = match types.get(i + 1) {
            Some(next) => next != ty,
            None => true,
        };
        if run_ends {
            groups.push(format!("{} {}", run_names.join(", "), ty));
            run_names.clear();
        }
    }

    groups.join(", ")
}
