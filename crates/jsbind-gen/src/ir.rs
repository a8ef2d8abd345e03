//! Conversion IR: the expressions and statements the resolver emits.
//!
//! The vocabulary is deliberately small (declarations, assignments, a guard
//! conditional, a counted loop, accessor calls, field/index access and
//! literals). A printer renders it to concrete syntax; see [`crate::printer`].

use jsbind_common::TypeShape;
use serde::Serialize;

/// A call on the dynamic-value capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Accessor {
    Bool,
    String,
    Int,
    Float,
    /// The runtime kind of the value (undefined, null, object, ...).
    Type,
    Length,
    /// Property lookup by name.
    Get,
    /// Element lookup by integer index.
    Index,
}

impl Accessor {
    pub fn method_name(self) -> &'static str {
        match self {
            Accessor::Bool => "Bool",
            Accessor::String => "String",
            Accessor::Int => "Int",
            Accessor::Float => "Float",
            Accessor::Type => "Type",
            Accessor::Length => "Length",
            Accessor::Get => "Get",
            Accessor::Index => "Index",
        }
    }
}

/// Runtime kinds a guard compares against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    Undefined,
    Null,
}

impl ValueKind {
    pub fn const_name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "TypeUndefined",
            ValueKind::Null => "TypeNull",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    Eq,
    Ne,
    Lt,
    And,
    Or,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Ne | BinOp::Lt => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Expr {
    Ident(String),
    Int(u64),
    Str(String),
    /// `value.Accessor(args...)`
    Access {
        value: Box<Expr>,
        accessor: Accessor,
        args: Vec<Expr>,
    },
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// Narrowing conversion to a named scalar type.
    Cast { ty: String, expr: Box<Expr> },
    Field { base: Box<Expr>, name: String },
    Index { base: Box<Expr>, index: Box<Expr> },
    Deref(Box<Expr>),
    Not(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A kind constant of the runtime package, e.g. `js.TypeNull`.
    Kind { pkg: String, kind: ValueKind },
    /// Fresh zeroed pointee storage.
    New(TypeShape),
    /// Growable buffer of the given slice type and length.
    Make { ty: TypeShape, len: Box<Expr> },
    /// Zero-valued composite literal.
    Composite(TypeShape),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn access(value: Expr, accessor: Accessor, args: Vec<Expr>) -> Expr {
        Expr::Access {
            value: Box::new(value),
            accessor,
            args,
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn cast(ty: impl Into<String>, expr: Expr) -> Expr {
        Expr::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    pub fn field(base: Expr, name: impl Into<String>) -> Expr {
        Expr::Field {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn index(base: Expr, index: Expr) -> Expr {
        Expr::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn deref(inner: Expr) -> Expr {
        Expr::Deref(Box::new(inner))
    }

    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn make(ty: TypeShape, len: Expr) -> Expr {
        Expr::Make {
            ty,
            len: Box::new(len),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stmt {
    /// `var name T` (zero-initialized)
    VarDecl { name: String, ty: TypeShape },
    /// `name := value`
    Define { name: String, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    /// `if init; cond { body }`
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `for counter := 0; counter < bound; counter++ { body }`
    CountedLoop {
        counter: String,
        bound: Expr,
        body: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn define(name: impl Into<String>, value: Expr) -> Stmt {
        Stmt::Define {
            name: name.into(),
            value,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assign { target, value }
    }
}
