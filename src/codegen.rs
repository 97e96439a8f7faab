//! Source synthesis for one document.
//!
//! Every document becomes one C# file:
//!
//! ```text
//! using Ivy;
//! using Ivy.Apps;
//!
//! namespace Acme.Apps.Setup;
//!
//! [App(order:1, icon:Icons.Rocket, title:"Intro")]
//! public class IntroApp : ViewBase
//! {
//!     public override object? Build()
//!     {
//!         return new Markdown(
//!             """
//!             # Hi, "you"
//!             """);
//!     }
//! }
//! ```
//!
//! A metadata-only document (empty body) returns `null` from `Build()`
//! instead of wrapping an empty string.

use crate::config::{OrderPrecedence, TargetConfig};
use crate::frontmatter::Metadata;
use crate::literal;
use crate::naming::to_identifier;
use std::fmt::Write;

const BODY_INDENT: &str = "            ";

/// Everything synthesis needs besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub namespace: &'a str,
    pub target: &'a TargetConfig,
}

/// Resolve the order written into the attribute.
///
/// `file_order` is the filename ordinal, or the parent folder's ordinal for
/// index documents. With [`OrderPrecedence::Filename`] it wins over the
/// frontmatter `order`; with [`OrderPrecedence::Metadata`] the frontmatter
/// wins. Neither present means 0.
pub fn resolve_order(
    file_order: Option<i32>,
    metadata: &Metadata,
    precedence: OrderPrecedence,
) -> i32 {
    let sources = match precedence {
        OrderPrecedence::Filename => [file_order, metadata.order],
        OrderPrecedence::Metadata => [metadata.order, file_order],
    };
    sources.into_iter().flatten().next().unwrap_or(0)
}

/// `{Stem}App`, sanitized to an identifier.
pub fn class_name(stem: &str) -> String {
    format!("{}App", to_identifier(stem))
}

/// The attribute line: order always, then icon, title and groupExpanded
/// when the metadata sets them.
pub fn attribute_line(order: i32, metadata: &Metadata, target: &TargetConfig) -> String {
    let mut args = vec![format!("order:{order}")];
    if let Some(icon) = metadata.icon.as_deref().filter(|s| !s.trim().is_empty()) {
        args.push(format!(
            "icon:{}.{}",
            target.icon_type,
            to_identifier(icon.trim())
        ));
    }
    if let Some(title) = &metadata.title {
        args.push(format!("title:{}", literal::escaped(title)));
    }
    if metadata.group_expanded {
        args.push("groupExpanded:true".to_string());
    }
    format!("[{}({})]", target.attribute, args.join(", "))
}

/// Assemble the complete generated file.
pub fn synthesize(
    ctx: &SynthesisContext<'_>,
    class_name: &str,
    order: i32,
    metadata: &Metadata,
    body: &str,
) -> String {
    let target = ctx.target;
    let view_base = metadata
        .view_base
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&target.view_base);

    let mut out = String::new();
    for import in &target.imports {
        let _ = writeln!(out, "using {import};");
    }
    if !target.imports.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "namespace {};", ctx.namespace);
    out.push('\n');
    let _ = writeln!(out, "{}", attribute_line(order, metadata, target));
    let _ = writeln!(out, "public class {class_name} : {view_base}");
    out.push_str("{\n");
    out.push_str("    public override object? Build()\n");
    out.push_str("    {\n");
    if body.is_empty() {
        out.push_str("        return null;\n");
    } else {
        let literal = literal::format_literal(body, BODY_INDENT);
        if literal.contains('\n') {
            let _ = writeln!(
                out,
                "        return new {}(\n{BODY_INDENT}{literal});",
                target.view_type
            );
        } else {
            let _ = writeln!(out, "        return new {}({literal});", target.view_type);
        }
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}
