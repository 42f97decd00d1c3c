//! Namespace binding resolution.
//!
//! Maps every local identifier bound to a translation function to the namespace it
//! was created with:
//!
//! ```ignore
//! const t = useTranslations("payment");               // t → "payment"
//! const common = useTranslations();                   // common → ""
//! const s = await getTranslations(locale, "server");  // s → "server"
//! ```
//!
//! The table is flat per file. Block and function scopes are not distinguished,
//! so when the same name is bound twice in one file the last binding wins for
//! every call in that file.

use std::collections::HashMap;

use swc_ecma_ast::{
    AssignExpr, AssignOp, AssignTarget, CallExpr, Expr, Module, Pat, SimpleAssignTarget,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::literals::{callee_name, object_static_prop, static_arg, unwrap_expr};

/// Hooks called as `ident = hook(optionalNamespace)`.
pub const TRANSLATION_HOOKS: &[&str] = &["useTranslations"];

/// Async factories called as `ident = await factory(locale, namespace)`.
pub const TRANSLATION_FACTORIES: &[&str] = &["getTranslations"];

/// Local identifier → namespace (empty string = default namespace).
pub type NamespaceBindings = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct NamespaceResolver {
    bindings: NamespaceBindings,
}

impl NamespaceResolver {
    /// Collect all namespace bindings of a module in one pass.
    pub fn resolve(module: &Module) -> NamespaceBindings {
        let mut resolver = Self::default();
        module.visit_with(&mut resolver);
        resolver.bindings
    }

    fn bind(&mut self, name: &str, init: &Expr) {
        if let Some(namespace) = binding_namespace(init) {
            self.bindings.insert(name.to_string(), namespace);
        }
    }
}

/// Namespace of a binding initializer, or `None` if it is not a translation binding.
fn binding_namespace(init: &Expr) -> Option<String> {
    match unwrap_expr(init) {
        Expr::Call(call) => {
            let name = callee_name(call)?;
            if !TRANSLATION_HOOKS.contains(&name) {
                return None;
            }
            Some(call.args.first().and_then(static_arg).unwrap_or_default())
        }
        Expr::Await(await_expr) => {
            let Expr::Call(call) = unwrap_expr(&await_expr.arg) else {
                return None;
            };
            let name = callee_name(call)?;
            if !TRANSLATION_FACTORIES.contains(&name) {
                return None;
            }
            Some(factory_namespace(call))
        }
        _ => None,
    }
}

/// Namespace argument of an async factory call.
///
/// - `getTranslations(locale, "ns")` → second argument
/// - `getTranslations("ns")` → the only argument
/// - `getTranslations({ locale, namespace: "ns" })` → the `namespace` property
fn factory_namespace(call: &CallExpr) -> String {
    match call.args.as_slice() {
        [] => String::new(),
        [only] if only.spread.is_none() => match unwrap_expr(&only.expr) {
            Expr::Object(object) => object_static_prop(object, "namespace").unwrap_or_default(),
            _ => static_arg(only).unwrap_or_default(),
        },
        [_] => String::new(),
        [_, namespace, ..] => static_arg(namespace).unwrap_or_default(),
    }
}

impl Visit for NamespaceResolver {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Pat::Ident(binding) = &node.name
            && let Some(init) = &node.init
        {
            self.bind(binding.id.sym.as_str(), init);
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if node.op == AssignOp::Assign
            && let AssignTarget::Simple(SimpleAssignTarget::Ident(binding)) = &node.left
        {
            self.bind(binding.id.sym.as_str(), &node.right);
        }
        node.visit_children_with(self);
    }
}
