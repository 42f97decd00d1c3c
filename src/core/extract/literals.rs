//! Static string evaluation for AST expressions.
//!
//! Only string literals and template literals without interpolation count as
//! static. Anything else (identifiers, calls, `${...}` templates) is dynamic and
//! cannot be extracted.

use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit, ObjectLit, Prop, PropName, PropOrSpread};

/// Look through parentheses and TypeScript-only wrappers.
///
/// `(await getTranslations("ns")) as Translator` → `await getTranslations("ns")`
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsNonNull(non_null) => unwrap_expr(&non_null.expr),
        Expr::TsSatisfies(satisfies) => unwrap_expr(&satisfies.expr),
        Expr::TsConstAssertion(assertion) => unwrap_expr(&assertion.expr),
        _ => expr,
    }
}

/// Evaluate an expression to a static string, if it is one.
///
/// - `"key"` → `Some("key")`
/// - `` `key` `` → `Some("key")`
/// - `` `key.${x}` `` → `None`
/// - `keyName` → `None`
pub fn static_string(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let mut value = String::new();
            for quasi in &tpl.quasis {
                let cooked = quasi.cooked.as_ref()?;
                value.push_str(cooked.as_str()?);
            }
            Some(value)
        }
        _ => None,
    }
}

/// Static string value of a call argument; spread arguments are never static.
pub fn static_arg(arg: &ExprOrSpread) -> Option<String> {
    if arg.spread.is_some() {
        return None;
    }
    static_string(&arg.expr)
}

/// Name of the function being called when the callee is a bare identifier.
pub fn callee_name(call: &CallExpr) -> Option<&str> {
    match &call.callee {
        Callee::Expr(expr) => match &**expr {
            Expr::Ident(ident) => Some(ident.sym.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Static value of a named property in an object literal.
///
/// `{ locale, namespace: "Common" }` with `name = "namespace"` → `Some("Common")`
pub fn object_static_prop(object: &ObjectLit, name: &str) -> Option<String> {
    object.props.iter().find_map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return None;
        };
        let matches_name = match &kv.key {
            PropName::Ident(ident) => ident.sym.as_str() == name,
            PropName::Str(s) => s.value.as_str() == Some(name),
            _ => false,
        };
        if matches_name {
            static_string(&kv.value)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swc_common::SourceMap;
    use swc_ecma_ast::{ModuleItem, Stmt};

    use super::*;
    use crate::core::parsers::jsx::parse_jsx_source;

    /// Parse a single expression statement.
    fn parse_expr(code: &str) -> Box<Expr> {
        let parsed = parse_jsx_source(
            format!("({});", code),
            "test.tsx",
            Arc::new(SourceMap::default()),
        )
        .unwrap();
        match parsed.module.body.into_iter().next() {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => stmt.expr,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_string_literals_are_static() {
        assert_eq!(static_string(&parse_expr(r#""title""#)), Some("title".to_string()));
        assert_eq!(static_string(&parse_expr("'title'")), Some("title".to_string()));
        assert_eq!(static_string(&parse_expr("`title`")), Some("title".to_string()));
        assert_eq!(
            static_string(&parse_expr(r#""title" as const"#)),
            Some("title".to_string())
        );
    }

    #[test]
    fn test_dynamic_expressions_are_not_static() {
        assert_eq!(static_string(&parse_expr("keyName")), None);
        assert_eq!(static_string(&parse_expr("`prefix.${key}`")), None);
        assert_eq!(static_string(&parse_expr(r#""a" + "b""#)), None);
        assert_eq!(static_string(&parse_expr("42")), None);
    }

    #[test]
    fn test_object_static_prop() {
        let expr = parse_expr(r#"{ locale, namespace: "Common", other: dynamic }"#);
        let Expr::Object(object) = unwrap_expr(&expr) else {
            panic!("Expected object literal");
        };
        assert_eq!(
            object_static_prop(object, "namespace"),
            Some("Common".to_string())
        );
        assert_eq!(object_static_prop(object, "other"), None);
        assert_eq!(object_static_prop(object, "missing"), None);
    }
}
