use pretty_assertions::assert_eq;
use trango_config::OptLevel;
use trango_ir::{
    decl_stmt, BinaryOp, Declaration, EnumDecl, EnumMember, Expr, ExprKind, IRType, InterfaceDecl,
    Lit, Modifiers, Module, PrimitiveKind, SourceLocation, Stmt, StmtKind, VariableDecl,
};

use crate::{optimize, passes_for_level, Pass};

use super::{ConstFold, DeadCodeElimination};

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Identifier(name.to_string()), loc())
}

fn number(value: f64) -> Expr {
    Expr::new(ExprKind::Literal(Lit::Number(value)), loc())
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        loc(),
    )
}

fn var(name: &str, init: Option<Expr>, modifiers: Modifiers) -> Stmt {
    decl_stmt(
        Declaration::Variable(VariableDecl {
            name: name.to_string(),
            ty: None,
            init,
            is_const: true,
            modifiers,
            loc: loc(),
        }),
        loc(),
    )
}

fn module_with(body: Vec<Stmt>) -> Module {
    let mut module = Module::new("m", "m.ts");
    module.body = body;
    module
}

#[test]
fn dce_drops_unreferenced_declarations() {
    let module = module_with(vec![
        var("used", Some(number(1.0)), Modifiers::EXPORT),
        var("helper", Some(ident("used")), Modifiers::empty()),
        var("dead", Some(number(2.0)), Modifiers::empty()),
    ]);
    let out = DeadCodeElimination.run(&module);
    let names: Vec<&str> = out.declarations().map(Declaration::name).collect();
    assert_eq!(names, vec!["used"]);
}

#[test]
fn dce_keeps_declarations_reached_from_exports() {
    let module = module_with(vec![
        var("a", Some(ident("b")), Modifiers::EXPORT),
        var("b", Some(ident("c")), Modifiers::empty()),
        var("c", Some(number(3.0)), Modifiers::empty()),
        var("island", Some(ident("island2")), Modifiers::empty()),
        var("island2", Some(number(9.0)), Modifiers::empty()),
    ]);
    let out = DeadCodeElimination.run(&module);
    let names: Vec<&str> = out.declarations().map(Declaration::name).collect();
    // The a→b→c chain survives; the island referenced only by another
    // dropped declaration does not.
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn dce_retains_side_effect_statements_and_their_references() {
    let call = Stmt::new(
        StmtKind::Expr(Expr::new(
            ExprKind::Call {
                callee: Box::new(ident("boot")),
                args: vec![],
            },
            loc(),
        )),
        loc(),
    );
    let pure = Stmt::new(StmtKind::Expr(ident("noise")), loc());
    let module = module_with(vec![
        call,
        pure,
        var("boot", Some(number(0.0)), Modifiers::empty()),
        var("noise", Some(number(0.0)), Modifiers::empty()),
    ]);
    let out = DeadCodeElimination.run(&module);
    let names: Vec<&str> = out.declarations().map(Declaration::name).collect();
    // `boot` is referenced from the retained call; the pure expression
    // statement and `noise` both go away.
    assert_eq!(names, vec!["boot"]);
    assert_eq!(out.body.len(), 2);
}

#[test]
fn dce_sees_type_references() {
    let shape = Declaration::Interface(InterfaceDecl {
        name: "Shape".to_string(),
        type_params: vec![],
        extends: vec![],
        props: vec![],
        modifiers: Modifiers::empty(),
        loc: loc(),
    });
    let user = VariableDecl {
        name: "s".to_string(),
        ty: Some(IRType::reference("Shape")),
        init: None,
        is_const: false,
        modifiers: Modifiers::EXPORT,
        loc: loc(),
    };
    let module = module_with(vec![
        decl_stmt(shape, loc()),
        decl_stmt(Declaration::Variable(user), loc()),
    ]);
    let out = DeadCodeElimination.run(&module);
    let names: Vec<&str> = out.declarations().map(Declaration::name).collect();
    assert_eq!(names, vec!["Shape", "s"]);
}

#[test]
fn dce_is_idempotent() {
    let module = module_with(vec![
        var("kept", Some(number(1.0)), Modifiers::EXPORT),
        var("dropped", Some(number(2.0)), Modifiers::empty()),
    ]);
    let once = DeadCodeElimination.run(&module);
    let twice = DeadCodeElimination.run(&once);
    assert_eq!(once, twice);
}

#[test]
fn const_fold_evaluates_literal_arithmetic() {
    let init = binary(
        BinaryOp::Add,
        number(1.0),
        binary(BinaryOp::Mul, number(2.0), number(3.0)),
    );
    let module = module_with(vec![var("x", Some(init), Modifiers::EXPORT)]);
    let out = ConstFold.run(&module);
    let Some(Declaration::Variable(decl)) = out.declaration("x") else {
        panic!("expected variable");
    };
    assert_eq!(
        decl.init.as_ref().map(|e| &e.kind),
        Some(&ExprKind::Literal(Lit::Number(7.0)))
    );
}

#[test]
fn const_fold_leaves_division_by_zero_alone() {
    let init = binary(BinaryOp::Div, number(1.0), number(0.0));
    let module = module_with(vec![var("x", Some(init.clone()), Modifiers::EXPORT)]);
    let out = ConstFold.run(&module);
    let Some(Declaration::Variable(decl)) = out.declaration("x") else {
        panic!("expected variable");
    };
    assert_eq!(decl.init, Some(init));
}

#[test]
fn const_fold_concatenates_strings_and_compares() {
    let concat = binary(
        BinaryOp::Add,
        Expr::new(ExprKind::Literal(Lit::String("go".to_string())), loc()),
        Expr::new(ExprKind::Literal(Lit::String("pher".to_string())), loc()),
    );
    let compare = binary(BinaryOp::StrictEq, number(2.0), number(2.0));
    let module = module_with(vec![
        var("s", Some(concat), Modifiers::EXPORT),
        var("b", Some(compare), Modifiers::EXPORT),
    ]);
    let out = ConstFold.run(&module);
    let Some(Declaration::Variable(s)) = out.declaration("s") else {
        panic!("expected variable");
    };
    assert_eq!(
        s.init.as_ref().map(|e| &e.kind),
        Some(&ExprKind::Literal(Lit::String("gopher".to_string())))
    );
    let Some(Declaration::Variable(b)) = out.declaration("b") else {
        panic!("expected variable");
    };
    assert_eq!(
        b.init.as_ref().map(|e| &e.kind),
        Some(&ExprKind::Literal(Lit::Boolean(true)))
    );
}

#[test]
fn const_fold_eliminates_dead_branches() {
    let taken = Stmt::new(StmtKind::Expr(ident("kept")), loc());
    let dropped = Stmt::new(StmtKind::Expr(ident("gone")), loc());
    let stmt = Stmt::new(
        StmtKind::If {
            cond: Expr::new(ExprKind::Literal(Lit::Boolean(true)), loc()),
            then_branch: Box::new(taken),
            else_branch: Some(Box::new(dropped)),
        },
        loc(),
    );
    let module = module_with(vec![stmt]);
    let out = ConstFold.run(&module);
    assert_eq!(out.body.len(), 1);
    let StmtKind::Expr(expr) = &out.body[0].kind else {
        panic!("expected the taken branch");
    };
    assert_eq!(expr.as_identifier(), Some("kept"));
}

#[test]
fn const_fold_resolves_nullish_coalescing_on_literals() {
    let coalesce = binary(
        BinaryOp::Coalesce,
        Expr::new(ExprKind::Literal(Lit::Undefined), loc()),
        number(5.0),
    );
    let module = module_with(vec![var("x", Some(coalesce), Modifiers::EXPORT)]);
    let out = ConstFold.run(&module);
    let Some(Declaration::Variable(decl)) = out.declaration("x") else {
        panic!("expected variable");
    };
    assert_eq!(
        decl.init.as_ref().map(|e| &e.kind),
        Some(&ExprKind::Literal(Lit::Number(5.0)))
    );
}

#[test]
fn const_fold_reduces_enum_initializers() {
    let decl = Declaration::Enum(EnumDecl {
        name: "Flags".to_string(),
        members: vec![EnumMember {
            name: "Both".to_string(),
            value: Some(binary(BinaryOp::Add, number(1.0), number(2.0))),
            loc: loc(),
        }],
        heterogeneous: false,
        modifiers: Modifiers::empty(),
        loc: loc(),
    });
    let module = module_with(vec![decl_stmt(decl, loc())]);
    let out = ConstFold.run(&module);
    let Some(Declaration::Enum(decl)) = out.declaration("Flags") else {
        panic!("expected enum");
    };
    assert_eq!(
        decl.members[0].value.as_ref().map(|e| &e.kind),
        Some(&ExprKind::Literal(Lit::Number(3.0)))
    );
}

#[test]
fn simplify_flattens_and_dedupes_unions() {
    let nested = IRType::Union(vec![
        IRType::primitive(PrimitiveKind::String),
        IRType::Union(vec![
            IRType::primitive(PrimitiveKind::String),
            IRType::primitive(PrimitiveKind::Number),
        ]),
    ]);
    let simplified = super::simplify::simplify(&nested);
    assert_eq!(
        simplified,
        IRType::Union(vec![
            IRType::primitive(PrimitiveKind::String),
            IRType::primitive(PrimitiveKind::Number),
        ])
    );

    let single = IRType::Union(vec![IRType::Union(vec![IRType::primitive(
        PrimitiveKind::Boolean,
    )])]);
    assert_eq!(
        super::simplify::simplify(&single),
        IRType::primitive(PrimitiveKind::Boolean)
    );
}

#[test]
fn pass_lists_grow_with_level() {
    assert_eq!(passes_for_level(OptLevel::O0).len(), 0);
    let l1: Vec<&str> = passes_for_level(OptLevel::O1)
        .iter()
        .map(|p| p.name())
        .collect();
    assert_eq!(l1, vec!["dead-code-elimination", "constant-folding"]);
    assert_eq!(passes_for_level(OptLevel::O2).len(), 5);
}

#[test]
fn optimize_level_zero_is_identity() {
    let module = module_with(vec![var("dead", Some(number(1.0)), Modifiers::empty())]);
    let out = optimize(module.clone(), OptLevel::O0);
    assert_eq!(out, module);
}
