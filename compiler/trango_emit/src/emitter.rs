//! The per-module emitter state machine.
//!
//! One [`GoEmitter`] serves one module. State accumulated while walking
//! the IR (indentation, the import set, the tuple intern table, the
//! current class context and receiver name) is cleared by [`reset`],
//! so an embedder reusing an emitter across modules starts each one
//! clean.
//!
//! [`reset`]: GoEmitter::reset

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use trango_config::Config;
use trango_diagnostic::DiagnosticQueue;
use trango_ir::{Declaration, ExprKind, IRType, Module, SourceLocation, Stmt, StmtKind};
use trango_types::map_type;

use crate::output::OutputBuffer;
use crate::sourcemap::{RawMapping, SourceMap};

/// The result of emitting one module.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EmitResult {
    /// The target source text.
    pub code: String,
    /// Standard-library packages the code requires, sorted.
    pub imports: BTreeSet<String>,
    /// Raw source map, when enabled.
    pub source_map: Option<SourceMap>,
}

/// Emit one module to target source.
pub fn emit_module(
    module: &Module,
    config: &Config,
    diagnostics: &mut DiagnosticQueue,
) -> EmitResult {
    let mut emitter = GoEmitter::new(module, config, diagnostics);
    emitter.reset();
    let result = emitter.emit();
    tracing::debug!(
        module = %module.name,
        bytes = result.code.len(),
        imports = result.imports.len(),
        "emitted module"
    );
    result
}

/// Context while emitting a class's members.
pub(crate) struct ClassContext {
    pub name: String,
    pub private_fields: FxHashSet<String>,
    /// Field name → mapped target type, used for receiver-field reads
    /// and method return refinement.
    pub field_types: FxHashMap<String, String>,
}

/// Context while emitting a function or method body.
#[derive(Clone)]
pub(crate) struct FnContext {
    pub is_async: bool,
    /// Mapped return type; `None` for void.
    pub ret_repr: Option<String>,
}

/// Top-level item shapes, for the blank-line policy.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum TopShape {
    VarScalar,
    VarInferred,
    VarTypedArray,
    /// Variables whose names hint at the top type; always isolated.
    VarAny,
    Func,
    Type,
}

pub(crate) struct GoEmitter<'a> {
    pub(crate) module: &'a Module,
    pub(crate) config: &'a Config,
    pub(crate) diagnostics: &'a mut DiagnosticQueue,

    pub(crate) out: OutputBuffer,
    pub(crate) indent: usize,
    pub(crate) imports: BTreeSet<String>,
    /// Interned tuple shapes in first-seen order: `(canonical name,
    /// element types)`.
    pub(crate) tuple_interned: Vec<(String, Vec<IRType>)>,
    /// Tuple names whose record definition is already in the output.
    pub(crate) tuples_generated: FxHashSet<String>,
    pub(crate) class_ctx: Option<ClassContext>,
    pub(crate) receiver: Option<String>,
    /// Lexical scopes: local name → mapped target type.
    pub(crate) locals: Vec<FxHashMap<String, String>>,
    pub(crate) current_fn: Option<FnContext>,
    /// Distinguishes the error variables of sibling try blocks.
    pub(crate) try_counter: usize,
    pub(crate) source_map: Option<SourceMap>,
}

impl<'a> GoEmitter<'a> {
    pub(crate) fn new(
        module: &'a Module,
        config: &'a Config,
        diagnostics: &'a mut DiagnosticQueue,
    ) -> Self {
        GoEmitter {
            module,
            config,
            diagnostics,
            out: OutputBuffer::new(),
            indent: 0,
            imports: BTreeSet::new(),
            tuple_interned: Vec::new(),
            tuples_generated: FxHashSet::default(),
            class_ctx: None,
            receiver: None,
            locals: Vec::new(),
            current_fn: None,
            try_counter: 0,
            source_map: None,
        }
    }

    /// Clear all per-module state. Called at the start of every module
    /// so nothing leaks between pipelines.
    pub(crate) fn reset(&mut self) {
        self.out = OutputBuffer::new();
        self.indent = 0;
        self.imports.clear();
        self.tuple_interned.clear();
        self.tuples_generated.clear();
        self.class_ctx = None;
        self.receiver = None;
        self.locals.clear();
        self.current_fn = None;
        self.try_counter = 0;
        self.source_map = if self.config.source_map {
            Some(SourceMap::new())
        } else {
            None
        };
    }

    /// Emit the module: body first (collecting imports), then the
    /// package header and import block are prepended.
    pub(crate) fn emit(&mut self) -> EmitResult {
        let mut previous: Option<TopShape> = None;
        let mut forced_separator = false;
        let module = self.module;
        let mut init_statements: Vec<&'a Stmt> = Vec::new();

        for stmt in &module.body {
            match &stmt.kind {
                StmtKind::Decl(decl) => {
                    let shape = shape_of(decl);
                    if self.needs_blank(previous, shape, forced_separator) {
                        self.out.blank();
                    }
                    forced_separator = false;
                    previous = Some(shape);
                    self.emit_top_decl(decl);
                }
                // Module-level assignments have no meaningful lowering;
                // dropping one still separates its neighbors.
                StmtKind::Expr(expr) if matches!(expr.kind, ExprKind::Assignment { .. }) => {
                    forced_separator = true;
                }
                _ => init_statements.push(stmt),
            }
        }

        // Module-scope side effects run from an initializer function,
        // in source order.
        if !init_statements.is_empty() {
            if !self.out.is_empty() {
                self.out.blank();
            }
            self.out.line(0, "func init() {");
            self.indent = 1;
            for stmt in init_statements {
                self.emit_stmt(stmt);
            }
            self.indent = 0;
            self.out.line(0, "}");
        }

        self.assemble()
    }

    fn assemble(&mut self) -> EmitResult {
        let mut header = OutputBuffer::new();
        header.line(0, &format!("package {}", package_name(&self.module.name)));

        if !self.imports.is_empty() {
            header.blank();
            if self.imports.len() == 1 {
                let only = self.imports.iter().next().cloned().unwrap_or_default();
                header.line(0, &format!("import \"{only}\""));
            } else {
                header.line(0, "import (");
                for package in &self.imports {
                    header.line(1, &format!("\"{package}\""));
                }
                header.line(0, ")");
            }
        }
        header.blank();

        let header_lines = header.as_str().matches('\n').count();
        let mut body = std::mem::take(&mut self.out).finish();
        while body.starts_with('\n') {
            body.remove(0);
        }
        let code = format!("{}{}", header.as_str(), body);

        // Mappings were recorded body-relative; shift them under the
        // header.
        let source_map = self.source_map.take().map(|mut map| {
            let offset = u32::try_from(header_lines).unwrap_or(0);
            for mapping in &mut map.mappings {
                mapping.generated_line += offset;
            }
            map
        });

        EmitResult {
            code,
            imports: std::mem::take(&mut self.imports),
            source_map,
        }
    }

    // Shared helpers

    /// Record a standard-library dependency.
    pub(crate) fn require_import(&mut self, package: &str) {
        self.imports.insert(package.to_string());
    }

    /// Map a type, absorbing its import requirements.
    pub(crate) fn mapped(&mut self, ty: &IRType) -> String {
        let mapped = map_type(ty, self.config);
        for package in &mapped.imports {
            self.require_import(package);
        }
        self.intern_tuples(ty);
        mapped.repr
    }

    /// Record a raw source mapping for the next line to be emitted.
    pub(crate) fn record_mapping(&mut self, loc: &SourceLocation, name: Option<&str>) {
        if loc.is_synthetic() {
            return;
        }
        let line = self.out.current_line();
        let column = self.out.current_column();
        if let Some(map) = &mut self.source_map {
            let source = map.add_source(&loc.file);
            let name = name.map(|n| map.add_name(n));
            map.record(RawMapping {
                generated_line: line,
                generated_column: column,
                source,
                original_line: loc.start.line,
                original_column: loc.start.column,
                name,
            });
        }
    }

    // Scope tracking

    pub(crate) fn push_scope(&mut self) {
        self.locals.push(FxHashMap::default());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.locals.pop();
    }

    pub(crate) fn bind_local(&mut self, name: &str, repr: String) {
        if let Some(scope) = self.locals.last_mut() {
            scope.insert(name.to_string(), repr);
        }
    }

    /// The mapped type of a local, innermost scope first.
    pub(crate) fn local_type(&self, name: &str) -> Option<&str> {
        self.locals
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(String::as_str))
    }

    // Blank-line policy between top-level items.

    fn needs_blank(&self, previous: Option<TopShape>, next: TopShape, forced: bool) -> bool {
        let Some(previous) = previous else {
            return false;
        };
        if forced {
            return true;
        }
        // Any-hinted variables never group.
        if previous == TopShape::VarAny || next == TopShape::VarAny {
            return true;
        }
        // Functions and types always stand alone.
        if matches!(previous, TopShape::Func | TopShape::Type)
            || matches!(next, TopShape::Func | TopShape::Type)
        {
            return true;
        }
        // Compatible simple variables group without separation.
        previous != next
    }
}

/// Classify a top-level declaration for the blank-line policy.
pub(crate) fn shape_of(decl: &Declaration) -> TopShape {
    match decl {
        Declaration::Variable(var) => {
            let lowered = var.name.to_lowercase();
            if lowered.contains("any") || lowered.contains("unknown") {
                return TopShape::VarAny;
            }
            match &var.ty {
                Some(IRType::Array(_)) => TopShape::VarTypedArray,
                Some(ty) if ty.is_top() && var.init.is_some() => TopShape::VarInferred,
                Some(_) => TopShape::VarScalar,
                None => TopShape::VarInferred,
            }
        }
        Declaration::Function(_) => TopShape::Func,
        Declaration::Class(_)
        | Declaration::Interface(_)
        | Declaration::TypeAlias(_)
        | Declaration::Enum(_) => TopShape::Type,
    }
}

/// Derive a legal package name from the module name.
pub(crate) fn package_name(module_name: &str) -> String {
    let mut name: String = module_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if name.is_empty() {
        name.push_str("module");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, 'm');
    }
    name
}

/// The zero value of a mapped target type.
pub(crate) fn zero_value(repr: &str) -> String {
    match repr {
        "string" => "\"\"".to_string(),
        "int" | "float64" => "0".to_string(),
        "bool" => "false".to_string(),
        "interface{}" => "nil".to_string(),
        _ if repr.starts_with('*') || repr.starts_with("map[") || repr.starts_with("[]") => {
            "nil".to_string()
        }
        _ if repr.starts_with("func(") => "nil".to_string(),
        // Named records zero to their empty composite literal.
        _ => format!("{repr}{{}}"),
    }
}

/// Escape a string for a double-quoted target literal.
pub(crate) fn escape_go_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Format a numeric literal: whole numbers print without a decimal
/// point, everything else in shortest round-trip form.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
