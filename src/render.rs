//! Render compiled module plans as Rust source.
//!
//! Every generated module refers to the runtime support file through
//! `super::util` and to other domains through `super::<module>`, so the emitted
//! package can be dropped into any crate as a single module tree.

use crate::command::CommandBinding;
use crate::decl::{AliasDecl, Declaration, EnumDecl, RecordDecl};
use crate::domain::ModulePlan;
use crate::event::EventRecord;
use crate::naming::{module_name, pascal_case};
use crate::shape::FieldPlan;

pub const SHARED_HEADER: &str = "// DO NOT EDIT THIS FILE!
//
// This file is generated from the CDP specification. If you need to make
// changes, edit the generator and regenerate all of the modules.";

/// Contents of the package's `README.md`.
pub const GENERATED_PACKAGE_NOTICE: &str = "## Generated by cdpgen
The modules of this package were generated by `cdpgen`. Do not modify their
contents: changes are overwritten by the next generation.
";

/// Runtime support shipped as the package's `util.rs`.
pub const RUNTIME_SUPPORT: &str = include_str!("templates/util.rs");

/// Line buffer with indentation.
#[derive(Default)]
struct Out {
    buf: String,
    indent: usize,
}

impl Out {
    fn line(&mut self, text: &str) {
        for l in text.lines() {
            if !l.is_empty() {
                for _ in 0..self.indent {
                    self.buf.push_str("    ");
                }
                self.buf.push_str(l);
            }
            self.buf.push('\n');
        }
        if text.is_empty() {
            self.buf.push('\n');
        }
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    /// `///` or `//!` comment lines; blank description lines stay as bare markers.
    fn doc(&mut self, marker: &str, text: &str) {
        for l in text.lines() {
            let l = l.trim_end();
            if l.is_empty() {
                self.line(marker);
            } else {
                self.line(&format!("{} {}", marker, l));
            }
        }
    }
}

/// Source of `<module>.rs` for one compiled domain.
pub fn render_module(plan: &ModulePlan) -> String {
    let mut out = Out::default();
    out.line(SHARED_HEADER);
    out.line("//");
    let flags: Vec<&str> = [(plan.experimental, "experimental"), (plan.deprecated, "deprecated")]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| *flag)
        .collect();
    if flags.is_empty() {
        out.line(&format!("// CDP domain: {}", plan.domain));
    } else {
        out.line(&format!("// CDP domain: {} ({})", plan.domain, flags.join(", ")));
    }
    out.line("");
    if let Some(d) = &plan.description {
        out.doc("//!", d);
    }
    for (i, flag) in flags.iter().enumerate() {
        if i > 0 || plan.description.is_some() {
            out.line("//!");
        }
        out.line(&format!("//! *This CDP domain is {}.*", flag));
    }
    if plan.has_deprecated() {
        out.line("#![allow(deprecated)]");
    }
    out.line("");
    out.line("use super::util;");
    for domain in &plan.imports {
        out.line(&format!("use super::{};", module_name(domain)));
    }

    for decl in &plan.declarations {
        out.line("");
        match decl {
            Declaration::Enum(e) => render_enum(&mut out, e),
            Declaration::Record(r) => render_record(&mut out, r),
            Declaration::Alias(a) => render_alias(&mut out, a),
        }
    }
    for c in &plan.commands {
        out.line("");
        render_command(&mut out, c);
    }
    for e in &plan.events {
        out.line("");
        render_event(&mut out, e);
    }
    out.buf
}

fn render_enum(out: &mut Out, e: &EnumDecl) {
    if let Some(d) = &e.description {
        out.doc("///", d);
    }
    out.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    out.open(&format!("pub enum {} {{", e.name));
    for (variant, _) in &e.variants {
        out.line(&format!("{},", variant));
    }
    out.close("}");
    out.line("");
    out.open(&format!("impl {} {{", e.name));
    out.open("pub fn as_str(&self) -> &'static str {");
    out.open("match self {");
    for (variant, wire) in &e.variants {
        out.line(&format!("{}::{} => \"{}\",", e.name, variant, escape(wire)));
    }
    out.close("}");
    out.close("}");
    out.line("");
    out.open("pub fn to_json(&self) -> serde_json::Value {");
    out.line("serde_json::Value::from(self.as_str())");
    out.close("}");
    out.line("");
    out.open("pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {");
    out.open("match util::as_str(json)? {");
    for (variant, wire) in &e.variants {
        out.line(&format!("\"{}\" => Ok({}::{}),", escape(wire), e.name, variant));
    }
    out.open("other => Err(util::CdpError::InvalidEnumValue {");
    out.line(&format!("type_name: \"{}\",", e.name));
    out.line("value: other.to_owned(),");
    out.close("}),");
    out.close("}");
    out.close("}");
    out.close("}");
}

fn render_record(out: &mut Out, r: &RecordDecl) {
    if let Some(d) = &r.description {
        out.doc("///", d);
    }
    render_struct(out, &r.name, &r.fields);
    out.line("");
    out.open(&format!("impl {} {{", r.name));
    render_to_json(out, &r.fields);
    out.line("");
    out.open("pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {");
    if r.fields.is_empty() {
        out.line("util::as_object(json)?;");
    } else {
        out.line("let json = util::as_object(json)?;");
    }
    render_construct(out, &r.name, &r.fields, "json");
    out.close("}");
    out.close("}");
}

fn render_alias(out: &mut Out, a: &AliasDecl) {
    if let Some(d) = &a.description {
        out.doc("///", d);
    }
    if a.is_eq() {
        out.line("#[derive(Debug, Clone, PartialEq, Eq, Hash)]");
    } else {
        out.line("#[derive(Debug, Clone, PartialEq)]");
    }
    out.line(&format!("pub struct {}(pub {});", a.name, a.shape.type_expr()));
    out.line("");
    out.open(&format!("impl {} {{", a.name));
    out.open("pub fn to_json(&self) -> serde_json::Value {");
    out.line(&a.shape.encode_expr("self.0"));
    out.close("}");
    out.line("");
    out.open("pub fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {");
    out.line(&format!("{}.map({})", a.shape.decode_expr("json"), a.name));
    out.close("}");
    out.close("}");
}

fn render_command(out: &mut Out, c: &CommandBinding) {
    let mut docs = Vec::new();
    if let Some(d) = &c.description {
        docs.push(d.clone());
    }
    if c.experimental {
        docs.push("**EXPERIMENTAL**".to_string());
    }
    if !c.parameters.is_empty() {
        let lines: Vec<String> = c.parameters.iter().map(FieldPlan::doc_line).collect();
        docs.push(format!("# Parameters\n{}", lines.join("\n")));
    }
    if !c.returns.is_empty() {
        let lines: Vec<String> = c.returns.iter().map(FieldPlan::doc_line).collect();
        docs.push(format!("# Returns\n{}", lines.join("\n")));
    }
    out.doc("///", &docs.join("\n\n"));
    if let Some(version) = &c.deprecated_since {
        out.line(&format!("#[deprecated(since = \"{}\")]", version));
    }
    let args: Vec<String> = c.parameters.iter().map(FieldPlan::declaration).collect();
    out.open(&format!(
        "pub fn {}({}) -> util::Command<{}> {{",
        c.ident,
        args.join(", "),
        c.output_type()
    ));
    let params = if c.has_params {
        out.line("let mut params = util::JsonMap::new();");
        for p in &c.parameters {
            out.line(&p.encode_stmt("params", &p.ident));
        }
        "Some(params)"
    } else {
        "None"
    };
    let arg = if c.returns.is_empty() { "_json" } else { "json" };
    out.line(&format!(
        "util::Command::new(\"{}\", {}, |{}| {})",
        c.method,
        params,
        arg,
        c.decode_body()
    ));
    out.close("}");
}

fn render_event(out: &mut Out, e: &EventRecord) {
    let mut docs = Vec::new();
    if let Some(d) = &e.description {
        docs.push(d.clone());
    }
    if e.experimental {
        docs.push("**EXPERIMENTAL**".to_string());
    }
    if !docs.is_empty() {
        out.doc("///", &docs.join("\n\n"));
    }
    if let Some(version) = &e.deprecated_since {
        out.line(&format!("#[deprecated(since = \"{}\")]", version));
    }
    render_struct(out, &e.ident, &e.fields);
    out.line("");
    out.open(&format!("impl util::Event for {} {{", e.ident));
    out.line(&format!("const METHOD: &'static str = \"{}\";", e.method));
    out.line("");
    if e.fields.is_empty() {
        out.open("fn from_json(_json: &serde_json::Value) -> Result<Self, util::CdpError> {");
        out.line(&format!("Ok({} {{}})", e.ident));
    } else {
        out.open("fn from_json(json: &serde_json::Value) -> Result<Self, util::CdpError> {");
        out.line("let json = util::event_params(json)?;");
        render_construct(out, &e.ident, &e.fields, "&json");
    }
    out.close("}");
    out.close("}");
}

fn render_struct(out: &mut Out, name: &str, fields: &[FieldPlan]) {
    out.line("#[derive(Debug, Clone, PartialEq)]");
    if fields.is_empty() {
        out.line(&format!("pub struct {} {{}}", name));
        return;
    }
    out.open(&format!("pub struct {} {{", name));
    for f in fields {
        let doc = f.doc_line();
        if !doc.is_empty() {
            out.doc("///", &doc);
        }
        out.line(&format!("{},", f.declaration()));
    }
    out.close("}");
}

fn render_to_json(out: &mut Out, fields: &[FieldPlan]) {
    out.open("pub fn to_json(&self) -> serde_json::Value {");
    if fields.is_empty() {
        out.line("serde_json::Value::Object(util::JsonMap::new())");
    } else {
        out.line("let mut json = util::JsonMap::new();");
        for f in fields {
            out.line(&f.encode_stmt("json", &format!("self.{}", f.ident)));
        }
        out.line("serde_json::Value::Object(json)");
    }
    out.close("}");
}

fn render_construct(out: &mut Out, name: &str, fields: &[FieldPlan], map: &str) {
    if fields.is_empty() {
        out.line(&format!("Ok({} {{}})", name));
        return;
    }
    out.open(&format!("Ok({} {{", name));
    for f in fields {
        out.line(&format!("{}: {},", f.ident, f.decode_expr(map)));
    }
    out.close("})");
}

/// Source of the package's `mod.rs`: the support module, one module per domain
/// and the `CdpEvent` registry that routes notifications by method.
pub fn render_mod_rs(modules: &[ModulePlan]) -> String {
    let mut out = Out::default();
    out.line(SHARED_HEADER);
    out.line("");
    let events: Vec<(&ModulePlan, &EventRecord)> =
        modules.iter().flat_map(|m| m.events.iter().map(move |e| (m, e))).collect();
    if events.iter().any(|(_, e)| e.deprecated_since.is_some()) {
        out.line("#![allow(deprecated)]");
        out.line("");
    }
    out.line("pub mod util;");
    out.line("");
    for m in modules {
        out.line(&format!("pub mod {};", m.module));
    }

    out.line("");
    out.line("/// Every event of the package, tagged by domain.");
    out.line("#[derive(Debug, Clone, PartialEq)]");
    out.open("pub enum CdpEvent {");
    for (m, e) in &events {
        out.line(&format!("{}({}::{}),", event_variant(m, e), m.module, e.ident));
    }
    out.close("}");
    out.line("");
    out.line("/// Decode a notification. `Ok(None)` for a method no module declares.");
    let params = if events.is_empty() { "_params" } else { "params" };
    out.open(&format!(
        "pub fn parse_event(method: &str, {}: &serde_json::Value) -> Result<Option<CdpEvent>, util::CdpError> {{",
        params
    ));
    out.open("match method {");
    for (m, e) in &events {
        out.line(&format!(
            "\"{}\" => <{}::{} as util::Event>::from_json(params).map(|e| Some(CdpEvent::{}(e))),",
            escape(&e.method),
            m.module,
            e.ident,
            event_variant(m, e)
        ));
    }
    out.line("_ => Ok(None),");
    out.close("}");
    out.close("}");
    out.buf
}

/// `Page` + `LoadEventFired` → `PageLoadEventFired`.
fn event_variant(module: &ModulePlan, event: &EventRecord) -> String {
    format!("{}{}", pascal_case(&module.domain), event.ident)
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
