//! Node construction API.
//!
//! The parser hands already-validated syntactic pieces (names, child nodes,
//! operator tags) to these constructors. Names are interned on the way in,
//! so the resulting nodes only carry `Name`s.

use crate::ast::{
    ArrayRef, BinaryOp, Expr, FunctionDef, LValue, LValueOp, ListOp, Literal, UnaryOp, VarOp,
};
use crate::{Name, StringInterner};

/// Builds AST nodes against one interner.
#[derive(Clone, Copy, Debug)]
pub struct AstFactory<'a> {
    interner: &'a StringInterner,
}

impl<'a> AstFactory<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self { interner }
    }

    /// Intern a name.
    #[inline]
    pub fn name(&self, name: &str) -> Name {
        self.interner.intern(name)
    }

    // Literals

    pub fn nil(&self) -> Expr {
        Expr::Literal(Literal::Nil)
    }

    pub fn t(&self) -> Expr {
        Expr::Literal(Literal::T)
    }

    /// `T` for `true`, `NIL` for `false`.
    pub fn bool(&self, value: bool) -> Expr {
        if value {
            self.t()
        } else {
            self.nil()
        }
    }

    pub fn int(&self, value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn float(&self, value: f64) -> Expr {
        Expr::Literal(Literal::Float(value))
    }

    pub fn string(&self, value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::Str(value.into()))
    }

    // Lvalues

    /// Identifier as an assignable place.
    pub fn place(&self, name: &str) -> LValue {
        LValue::Ident(self.name(name))
    }

    /// Array element as an assignable place.
    pub fn array_place(&self, name: &str, index: Expr) -> LValue {
        LValue::ArrayRef(ArrayRef {
            name: self.name(name),
            index: Box::new(index),
        })
    }

    /// Identifier read.
    pub fn ident(&self, name: &str) -> Expr {
        Expr::Ident(self.name(name))
    }

    /// Array element read.
    pub fn aref(&self, name: &str, index: Expr) -> Expr {
        self.array_place(name, index).into()
    }

    // Operators

    pub fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn list(&self, op: ListOp, operands: Vec<Expr>) -> Expr {
        Expr::List { op, operands }
    }

    // Variable forms

    pub fn var_op(&self, op: VarOp, name: &str, value: Expr) -> Expr {
        Expr::VarOp {
            op,
            name: self.name(name),
            value: Box::new(value),
        }
    }

    pub fn defvar(&self, name: &str, value: Expr) -> Expr {
        self.var_op(VarOp::Defvar, name, value)
    }

    pub fn setq(&self, name: &str, value: Expr) -> Expr {
        self.var_op(VarOp::Setq, name, value)
    }

    pub fn lvalue_op(&self, op: LValueOp, target: LValue, value: Expr) -> Expr {
        Expr::LValueOp {
            op,
            target,
            value: Box::new(value),
        }
    }

    pub fn setf(&self, target: LValue, value: Expr) -> Expr {
        self.lvalue_op(LValueOp::Setf, target, value)
    }

    pub fn incf(&self, target: LValue, delta: Expr) -> Expr {
        self.lvalue_op(LValueOp::Incf, target, delta)
    }

    pub fn decf(&self, target: LValue, delta: Expr) -> Expr {
        self.lvalue_op(LValueOp::Decf, target, delta)
    }

    // Control flow

    pub fn if_expr(&self, cond: Expr, then_branch: Expr, else_branch: Option<Expr>) -> Expr {
        Expr::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn loop_forever(&self, body: Vec<Expr>) -> Expr {
        Expr::LoopForever { body }
    }

    pub fn loop_for(&self, var: &str, start: Expr, end: Expr, body: Vec<Expr>) -> Expr {
        Expr::LoopFor {
            var: self.name(var),
            start: Box::new(start),
            end: Box::new(end),
            body,
        }
    }

    pub fn dotimes(&self, var: &str, count: Expr, body: Vec<Expr>) -> Expr {
        Expr::LoopDoTimes {
            var: self.name(var),
            count: Box::new(count),
            body,
        }
    }

    pub fn return_expr(&self, value: Expr) -> Expr {
        Expr::Return(Box::new(value))
    }

    // Functions

    pub fn call(&self, func: &str, args: Vec<Expr>) -> Expr {
        Expr::Call {
            func: self.name(func),
            args,
        }
    }

    pub fn function(&self, name: &str, params: &[&str], body: Vec<Expr>) -> FunctionDef {
        FunctionDef {
            name: self.name(name),
            params: params.iter().map(|p| self.name(p)).collect(),
            body,
        }
    }
}
