//! SDK interface extraction.
//!
//! Reads a TypeScript source file into a small tagged declaration tree
//! (interfaces and classes, with the methods declared directly on each) and
//! collects fully qualified method signatures from the one declaration a
//! [`ModuleSpec`] names. The scanner is comment- and string-aware but never
//! looks at types: only declaration names, method names, parameter names
//! and `?` optional markers matter to the audit.

use crate::config::{DeclTarget, ModuleSpec, Plan};
use crate::docs::normalize_heading;
use crate::report::Report;
use anyhow::{bail, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(interface|class)\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap());

// Interface method signature head: optional readonly, name, optional `?`,
// then either the parameter list or a generic type-parameter list. Anchored
// to line start so call expressions in nested positions never match. The
// generic list itself is skipped depth-aware in `param_open`; a regex group
// cannot match nested angle brackets.
static RE_IFACE_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:readonly[ \t]+)?([A-Za-z_$][A-Za-z0-9_$]*)[ \t]*\??[ \t]*[<(]")
        .unwrap()
});

// Class method declaration head: any run of modifiers, then the name.
static RE_CLASS_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|static|async|override|readonly)[ \t]+)*([A-Za-z_$][A-Za-z0-9_$]*)[ \t]*[<(]",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Interface,
    Class,
}

/// One interface or class declaration, with any declarations found inside
/// its body (method bodies included) attached as children.
#[derive(Debug)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Methods declared directly on this declaration, in source order.
    pub methods: Vec<Method>,
    pub nested: Vec<Declaration>,
}

#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub params: Vec<Param>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub optional: bool,
}

/// Collect the expected method signatures for every module spec. Unreadable
/// source files and absent declarations are recorded as failures rather
/// than surfacing later as spurious coverage noise.
pub fn expected_signatures(plan: &Plan, sdk_root: &Path, report: &mut Report) -> Vec<String> {
    let mut expected = Vec::new();
    for spec in &plan.module_specs {
        let path = sdk_root.join(spec.file);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(_) => {
                report.fail(format!("Missing SDK source file: {}", path.display()));
                continue;
            }
        };
        match collect_signatures(spec, &source) {
            Ok(signatures) => expected.extend(signatures),
            Err(err) => report.fail(format!("{err} in {}", path.display())),
        }
    }
    expected.sort();
    expected
}

/// Extract the signatures a single module spec contributes.
pub fn collect_signatures(spec: &ModuleSpec, source: &str) -> Result<Vec<String>> {
    let declarations = parse_declarations(source);
    let (kind, name, only_method) = match spec.target {
        DeclTarget::Interface(name) => (DeclKind::Interface, name, None),
        DeclTarget::Class { name, method } => (DeclKind::Class, name, Some(method)),
    };
    let Some(declaration) = find_declaration(&declarations, kind, name) else {
        bail!("Declaration `{name}` not found");
    };
    Ok(declaration
        .methods
        .iter()
        .filter(|method| only_method.map_or(true, |only| method.name == only))
        .map(|method| signature(spec.prefix, method))
        .collect())
}

/// `prefix.method(p1, p2?, ...)` — the join key against doc headings.
fn signature(prefix: &str, method: &Method) -> String {
    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| {
            if p.optional {
                format!("{}?", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect();
    normalize_heading(&format!("{prefix}.{}({})", method.name, params.join(", ")))
}

/// Parse every interface/class declaration in the file, at any depth.
pub fn parse_declarations(source: &str) -> Vec<Declaration> {
    parse_region(&sanitize(source))
}

/// Depth-first name/kind matching visitor over the declaration tree.
fn find_declaration<'a>(
    declarations: &'a [Declaration],
    kind: DeclKind,
    name: &str,
) -> Option<&'a Declaration> {
    for declaration in declarations {
        if declaration.kind == kind && declaration.name == name {
            return Some(declaration);
        }
        if let Some(found) = find_declaration(&declaration.nested, kind, name) {
            return Some(found);
        }
    }
    None
}

/// Scan one already-sanitized region for declarations. Declarations inside
/// a body become children of the enclosing declaration.
fn parse_region(src: &str) -> Vec<Declaration> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < src.len() {
        let Some(caps) = RE_DECL.captures_at(src, pos) else {
            break;
        };
        let whole = caps.get(0).unwrap();
        let kind = match &caps[1] {
            "interface" => DeclKind::Interface,
            _ => DeclKind::Class,
        };
        let name = caps[2].to_string();
        // Body opens at the first brace after the extends/implements clause.
        let Some(open_rel) = src[whole.end()..].find('{') else {
            break;
        };
        let open = whole.end() + open_rel;
        let Some(close) = matching(src, open, '{', '}') else {
            break;
        };
        let body = &src[open + 1..close];
        let methods = match kind {
            DeclKind::Interface => interface_methods(body),
            DeclKind::Class => class_methods(body),
        };
        out.push(Declaration {
            kind,
            name,
            methods,
            nested: parse_region(body),
        });
        pos = close + 1;
    }
    out
}

/// Method signatures declared directly on an interface body. Properties,
/// including function-typed ones, and members of inline object types do not
/// count.
fn interface_methods(body: &str) -> Vec<Method> {
    let mut methods = Vec::new();
    for caps in RE_IFACE_METHOD.captures_iter(body) {
        let whole = caps.get(0).unwrap();
        if brace_depth(body, whole.start()) != 0 {
            continue;
        }
        let name = caps[1].to_string();
        // `new (...)` in an interface is a construct signature, not a method.
        if name == "new" {
            continue;
        }
        let Some(open) = param_open(body, whole.end()) else {
            continue;
        };
        let Some(close) = matching(body, open, '(', ')') else {
            continue;
        };
        methods.push(Method {
            name,
            params: split_params(&body[open + 1..close]),
        });
    }
    methods
}

/// Method declarations directly on a class body. Constructors and accessors
/// are not methods; local functions inside method bodies sit at brace depth
/// ≥ 1 and never match.
fn class_methods(body: &str) -> Vec<Method> {
    let mut methods = Vec::new();
    for caps in RE_CLASS_METHOD.captures_iter(body) {
        let whole = caps.get(0).unwrap();
        if brace_depth(body, whole.start()) != 0 {
            continue;
        }
        let name = caps[1].to_string();
        if name == "constructor" {
            continue;
        }
        let Some(open) = param_open(body, whole.end()) else {
            continue;
        };
        let Some(close) = matching(body, open, '(', ')') else {
            continue;
        };
        methods.push(Method {
            name,
            params: split_params(&body[open + 1..close]),
        });
    }
    methods
}

/// Opening paren of a member's parameter list. The head match ends on `<`
/// or `(`; a generic type-parameter list (nesting allowed, e.g.
/// `<T extends Map<string, string>>`) is skipped before the paren.
fn param_open(body: &str, head_end: usize) -> Option<usize> {
    let at = head_end - 1;
    if body[at..].starts_with('(') {
        return Some(at);
    }
    let close = matching(body, at, '<', '>')?;
    let offset = body[close + 1..].find(|c: char| !c.is_whitespace())?;
    let open = close + 1 + offset;
    body[open..].starts_with('(').then_some(open)
}

/// Split a parameter list on top-level commas and keep declared names with
/// their `?` optional markers. Types and default values are dropped.
fn split_params(text: &str) -> Vec<Param> {
    let mut params = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    let mut pieces = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            // `depth > 0` guard: the `>` of `=>` in a function-typed
            // parameter is not a closer.
            ')' | ']' | '}' | '>' if depth > 0 => depth -= 1,
            ',' if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    for piece in pieces {
        if let Some(param) = parse_param(piece) {
            params.push(param);
        }
    }
    params
}

fn parse_param(piece: &str) -> Option<Param> {
    let piece = piece.trim();
    let piece = piece.strip_prefix("...").unwrap_or(piece);
    let mut depth = 0u32;
    let mut name_end = piece.len();
    let mut optional = false;
    for (i, c) in piece.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' if depth > 0 => depth -= 1,
            '?' if depth == 0 => {
                optional = true;
                name_end = i;
                break;
            }
            ':' | '=' if depth == 0 => {
                name_end = i;
                break;
            }
            _ => {}
        }
    }
    let name = normalize_heading(&piece[..name_end]);
    if name.is_empty() {
        return None;
    }
    Some(Param { name, optional })
}

/// Brace nesting depth at `offset`, counting from the start of `src`.
fn brace_depth(src: &str, offset: usize) -> u32 {
    let mut depth = 0u32;
    for c in src[..offset].chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// Index of the closer matching the opener at `open`.
fn matching(src: &str, open: usize, opener: char, closer: char) -> Option<usize> {
    let mut depth = 0u32;
    for (i, c) in src[open..].char_indices() {
        if c == opener {
            depth += 1;
        } else if c == closer {
            depth -= 1;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}

/// Blank out comment and string-literal interiors (structure-preserving:
/// same line layout, quotes kept) so brace and paren matching cannot be
/// thrown off by braces in prose.
fn sanitize(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("  ");
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                    out.push(' ');
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str("  ");
                let mut prev = '\0';
                for next in chars.by_ref() {
                    out.push(if next == '\n' { '\n' } else { ' ' });
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            '\'' | '"' | '`' => {
                out.push(c);
                let mut escaped = false;
                while let Some(next) = chars.next() {
                    if escaped {
                        escaped = false;
                        out.push(' ');
                        continue;
                    }
                    if next == '\\' {
                        escaped = true;
                        out.push(' ');
                    } else if next == c {
                        out.push(c);
                        break;
                    } else {
                        out.push(if next == '\n' { '\n' } else { ' ' });
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
