//! Type-alias emission.
//!
//! Simple aliases delegate to the type mapper. Unions and
//! intersections receive their full generated form here: tagged records
//! with discrimination helpers, marker interfaces with per-arm records,
//! or embedded records, per the configured strategy.

use trango_config::UnionStrategy;
use trango_diagnostic::{Diagnostic, ErrorCode};
use trango_ir::{IRType, TypeAliasDecl};
use trango_types::{capitalize, nullable, simplify_union, Mapped};

use crate::emitter::GoEmitter;

/// Unions wider than this refuse to lower.
const MAX_UNION_ARMS: usize = 16;

impl GoEmitter<'_> {
    pub(crate) fn emit_type_alias(&mut self, alias: &TypeAliasDecl) {
        let name = capitalize(&alias.name);
        match &alias.ty {
            IRType::Union(arms) => self.emit_union_alias(alias, &name, arms),
            IRType::Intersection(parts) => self.emit_intersection_alias(&name, parts),
            other => {
                let repr = self.mapped(other);
                self.out.line(0, &format!("type {name} = {repr}"));
            }
        }
    }

    fn emit_union_alias(&mut self, alias: &TypeAliasDecl, name: &str, arms: &[IRType]) {
        // Shared collapse rules first (single arm, optional shape,
        // any-strategy literal widening); only a union that keeps its
        // strategy form generates artifacts below.
        if let Some(collapsed) = simplify_union(arms, self.config) {
            for package in &collapsed.imports {
                self.require_import(package);
            }
            for arm in arms {
                self.intern_tuples(arm);
            }
            self.out
                .line(0, &format!("type {name} = {}", collapsed.repr));
            return;
        }

        if arms.len() > MAX_UNION_ARMS {
            self.diagnostics.push(
                Diagnostic::new(
                    ErrorCode::E2001,
                    format!("union has {} arms; at most {MAX_UNION_ARMS} lower", arms.len()),
                    alias.loc.clone(),
                )
                .with_help("split the union or select the any strategy"),
            );
            self.out.line(0, &format!("type {name} = interface{{}}"));
            return;
        }

        match self.config.union_strategy {
            UnionStrategy::Tagged => self.emit_tagged_union(name, arms),
            UnionStrategy::Interface => self.emit_interface_union(name, arms),
            UnionStrategy::Any => {
                // Discrimination happens through the reflection helper
                // at use sites.
                self.out.line(0, &format!("type {name} = interface{{}}"));
            }
        }
    }

    /// One storable arm: named records are generated for object arms,
    /// everything else uses its mapped form directly.
    fn arm_repr(&mut self, union_name: &str, index: usize, arm: &IRType) -> String {
        if let IRType::Object { props, index: sig } = arm {
            if sig.is_none() && !props.is_empty() {
                let arm_name = format!("{union_name}Arm{index}");
                self.out.line(0, &format!("type {arm_name} struct {{"));
                let props = props.clone();
                for prop in props {
                    let mut repr = self.mapped(&prop.ty);
                    if prop.optional {
                        repr = nullable(Mapped::new(repr), self.config).repr;
                    }
                    self.out
                        .line(1, &format!("{} {}", capitalize(&prop.name), repr));
                }
                self.out.line(0, "}");
                self.out.blank();
                return arm_name;
            }
        }
        self.mapped(arm)
    }

    /// The tagged form: a record holding a tag and one nullable field
    /// per arm, with `IsTypeN`/`AsTypeN` helpers and per-arm
    /// constructors.
    fn emit_tagged_union(&mut self, name: &str, arms: &[IRType]) {
        let reprs: Vec<String> = arms
            .iter()
            .enumerate()
            .map(|(i, arm)| self.arm_repr(name, i, arm))
            .collect();

        self.out.line(0, &format!("type {name} struct {{"));
        self.out.line(1, "tag int");
        for (i, repr) in reprs.iter().enumerate() {
            self.out.line(1, &format!("value{i} *{repr}"));
        }
        self.out.line(0, "}");

        for (i, repr) in reprs.iter().enumerate() {
            self.out.blank();
            self.out
                .line(0, &format!("func (v {name}) IsType{i}() bool {{"));
            self.out.line(1, &format!("return v.tag == {i}"));
            self.out.line(0, "}");
            self.out.blank();
            self.out
                .line(0, &format!("func (v {name}) AsType{i}() *{repr} {{"));
            self.out.line(1, &format!("return v.value{i}"));
            self.out.line(0, "}");
            self.out.blank();
            self.out.line(
                0,
                &format!("func New{name}FromArm{i}(value {repr}) {name} {{"),
            );
            self.out.line(
                1,
                &format!("return {name}{{tag: {i}, value{i}: &value}}"),
            );
            self.out.line(0, "}");
        }
    }

    /// The interface form: a nominal marker interface with a private
    /// marker method; one record per arm implements it, and use sites
    /// discriminate with a type switch.
    fn emit_interface_union(&mut self, name: &str, arms: &[IRType]) {
        let marker = format!("is{name}");
        self.out.line(0, &format!("type {name} interface {{"));
        self.out.line(1, &format!("{marker}()"));
        self.out.line(0, "}");
        self.out.blank();

        for (i, arm) in arms.iter().enumerate() {
            let repr = if matches!(arm, IRType::Object { .. }) {
                self.arm_repr(name, i, arm)
            } else {
                // Wrap non-record arms so they can carry the marker.
                let inner = self.mapped(arm);
                let arm_name = format!("{name}Arm{i}");
                self.out.line(0, &format!("type {arm_name} struct {{"));
                self.out.line(1, &format!("Value {inner}"));
                self.out.line(0, "}");
                self.out.blank();
                arm_name
            };
            self.out.line(0, &format!("func ({repr}) {marker}() {{}}"));
            if i + 1 < arms.len() {
                self.out.blank();
            }
        }
    }

    /// The intersection form: one embedded or inlined field per
    /// constituent; colliding field names are prefixed with their
    /// constituent's name.
    fn emit_intersection_alias(&mut self, name: &str, parts: &[IRType]) {
        let mut used: Vec<String> = Vec::new();

        self.out.line(0, &format!("type {name} struct {{"));
        for (i, part) in parts.iter().enumerate() {
            match part {
                IRType::Reference {
                    name: ref_name, ..
                } => {
                    // Embed the named constituent.
                    self.out.line(1, &capitalize(ref_name));
                }
                IRType::Object { props, .. } => {
                    let constituent = format!("T{i}");
                    let props = props.clone();
                    for prop in props {
                        let mut field = capitalize(&prop.name);
                        if used.contains(&field) {
                            field = format!("{constituent}{field}");
                        }
                        let repr = self.mapped(&prop.ty);
                        used.push(field.clone());
                        self.out.line(1, &format!("{field} {repr}"));
                    }
                    continue;
                }
                other => {
                    let repr = self.mapped(other);
                    self.out.line(1, &format!("T{i} {repr}"));
                }
            }
            used.push(capitalize(part_name(part)));
        }
        self.out.line(0, "}");
    }
}

fn part_name(part: &IRType) -> &str {
    match part {
        IRType::Reference { name, .. } => name,
        _ => "",
    }
}
