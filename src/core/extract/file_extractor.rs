//! Call-site and marker-element extraction for a single parsed file.

use std::sync::Arc;

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXElementName, JSXExpr, JSXOpeningElement, MemberProp,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::{
    bindings::NamespaceBindings,
    literals::{static_arg, static_string, unwrap_expr},
    record::TranslationRecord,
};
use crate::{config::CustomJsxPattern, utils::is_numeric_key};

/// Methods on a translation function that take a message key as first argument.
const TRANSLATION_METHODS: &[&str] = &["t", "rich", "markup", "raw"];

pub struct FileExtractor<'a> {
    file_path: &'a str,
    source_map: Arc<SourceMap>,
    bindings: &'a NamespaceBindings,
    patterns: &'a [CustomJsxPattern],
    records: Vec<TranslationRecord>,
}

impl<'a> FileExtractor<'a> {
    pub fn new(
        file_path: &'a str,
        source_map: Arc<SourceMap>,
        bindings: &'a NamespaceBindings,
        patterns: &'a [CustomJsxPattern],
    ) -> Self {
        Self {
            file_path,
            source_map,
            bindings,
            patterns,
            records: Vec::new(),
        }
    }

    pub fn into_records(self) -> Vec<TranslationRecord> {
        self.records
    }

    fn line_of(&self, span: Span) -> usize {
        self.source_map.lookup_char_pos(span.lo).line
    }

    /// Namespace of the translation function being called, and whether it was
    /// called directly (`t(...)`) rather than through a method (`t.rich(...)`).
    fn bound_namespace(&self, call: &CallExpr) -> Option<(&'a str, bool)> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let (ident, direct) = match unwrap_expr(callee) {
            Expr::Ident(ident) => (ident, true),
            Expr::Member(member) => {
                let MemberProp::Ident(method) = &member.prop else {
                    return None;
                };
                if !TRANSLATION_METHODS.contains(&method.sym.as_str()) {
                    return None;
                }
                let Expr::Ident(object) = unwrap_expr(&member.obj) else {
                    return None;
                };
                (object, false)
            }
            _ => return None,
        };
        self.bindings
            .get(ident.sym.as_str())
            .map(|namespace| (namespace.as_str(), direct))
    }

    fn push(&mut self, namespace: String, key: String, default_value: String, span: Span) {
        if key.is_empty() || is_numeric_key(&key) {
            return;
        }
        let line = self.line_of(span);
        self.records.push(TranslationRecord {
            namespace,
            message_key: key,
            default_value,
            source_file: self.file_path.to_string(),
            line,
        });
    }
}

/// Static string value of a JSX attribute: `name="x"` or `name={"x"}`.
fn attr_static_value(attr: &JSXAttr) -> Option<String> {
    match attr.value.as_ref()? {
        JSXAttrValue::Str(s) => s.value.as_str().map(str::to_string),
        JSXAttrValue::JSXExprContainer(container) => match &container.expr {
            JSXExpr::Expr(expr) => static_string(expr),
            _ => None,
        },
        _ => None,
    }
}

fn find_attr<'n>(node: &'n JSXOpeningElement, name: &str) -> Option<&'n JSXAttr> {
    node.attrs.iter().find_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => match &attr.name {
            JSXAttrName::Ident(ident) if ident.sym.as_str() == name => Some(attr),
            _ => None,
        },
        _ => None,
    })
}

impl Visit for FileExtractor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some((namespace, direct)) = self.bound_namespace(node)
            && let Some(key) = node.args.first().and_then(static_arg)
        {
            let default_value = node
                .args
                .get(2)
                .filter(|_| direct)
                .and_then(static_arg)
                .unwrap_or_else(|| key.clone());
            self.push(namespace.to_string(), key, default_value, node.span);
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if let JSXElementName::Ident(ident) = &node.name {
            let name = ident.sym.as_str();
            let matched = self.patterns.iter().find(|p| p.element == name);
            if let Some(pattern) = matched {
                let attributes = &pattern.attributes;
                let value_of = |attr_name: &str| {
                    find_attr(node, attr_name).and_then(attr_static_value)
                };
                if let (Some(namespace), Some(key), Some(text)) = (
                    value_of(&attributes.namespace),
                    value_of(&attributes.message_key),
                    value_of(&attributes.string),
                ) {
                    self.push(namespace, key, text, node.span);
                }
            }
        }
        node.visit_children_with(self);
    }
}
