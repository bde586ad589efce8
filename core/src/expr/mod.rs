//! Expressions as seen by the conversion engine.
//!
//! Parsing and flow analysis happen elsewhere; an [`Expr`] only carries what
//! code generation needs: how to evaluate it, the flow-sensitive
//! [`TypeHint`] and the optional compile-time value.

mod place;

pub use place::{LocalPlace, ParamPlace, Place};

use core::cell::Cell;
use core::ops::Range;

use bumpalo::Bump;
use cinder_types::{Constant, Repr, TypeHint};

/// Byte range in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span(start..end)
    }
}

/// How the value of an expression is consumed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Access {
    /// The value is discarded.
    #[default]
    None,
    /// Read by value.
    Read,
    /// Read by reference, an alias must be materialized.
    ReadRef,
}

#[derive(Debug)]
pub enum ExprKind<'a> {
    Literal(Constant<'a>),
    /// Read of a storage location.
    Load(&'a dyn Place),
    /// Call of a user routine; opaque and side-effecting.
    Invoke { routine: &'a str, returns: Repr },
}

#[derive(Debug)]
pub struct Expr<'a> {
    pub kind: ExprKind<'a>,
    pub hint: TypeHint,
    pub span: Span,
    /// Value proven by constant propagation.
    value: Option<Constant<'a>>,
    access: Cell<Access>,
}

impl<'a> Expr<'a> {
    pub fn new(kind: ExprKind<'a>, hint: TypeHint, span: Span) -> Self {
        Self {
            kind,
            hint,
            span,
            value: None,
            access: Cell::new(Access::None),
        }
    }

    pub fn access(&self) -> Access {
        self.access.get()
    }

    /// Binds the access mode. Done by the converter right before emission.
    pub fn set_access(&self, access: Access) {
        self.access.set(access)
    }

    /// The compile-time value, if known.
    ///
    /// Invocations never have one: folding them would drop their effects.
    pub fn constant(&self) -> Option<Constant<'a>> {
        match self.kind {
            ExprKind::Literal(constant) => Some(constant),
            ExprKind::Load(_) => self.value,
            ExprKind::Invoke { .. } => None,
        }
    }

    /// Evaluating the expression has no observable effect.
    pub fn is_pure(&self) -> bool {
        !matches!(self.kind, ExprKind::Invoke { .. })
    }
}

/// Allocates expressions in an arena.
pub struct ExprBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    fn alloc(&self, expr: Expr<'a>) -> &'a Expr<'a> {
        self.arena.alloc(expr)
    }

    pub fn literal(&self, constant: Constant<'a>) -> &'a Expr<'a> {
        let hint = match constant {
            Constant::Null => TypeHint::NULL,
            other => other.natural_repr().hint(),
        };
        self.alloc(Expr::new(ExprKind::Literal(constant), hint, Span::default()))
    }

    pub fn null(&self) -> &'a Expr<'a> {
        self.literal(Constant::Null)
    }

    pub fn bool(&self, value: bool) -> &'a Expr<'a> {
        self.literal(Constant::Bool(value))
    }

    pub fn long(&self, value: i64) -> &'a Expr<'a> {
        self.literal(Constant::Long(value))
    }

    pub fn double(&self, value: f64) -> &'a Expr<'a> {
        self.literal(Constant::Double(value))
    }

    pub fn text(&self, value: &str) -> &'a Expr<'a> {
        let value = self.arena.alloc_str(value);
        self.literal(Constant::Text(value))
    }

    pub fn local(&self, slot: u32, repr: Repr) -> &'a dyn Place {
        self.arena.alloc(LocalPlace { slot, repr })
    }

    pub fn param(&self, index: u32, repr: Repr) -> &'a dyn Place {
        self.arena.alloc(ParamPlace { index, repr })
    }

    pub fn load(&self, place: &'a dyn Place, hint: TypeHint) -> &'a Expr<'a> {
        self.alloc(Expr::new(ExprKind::Load(place), hint, Span::default()))
    }

    /// A load whose value constant propagation has proven.
    pub fn known_load(
        &self,
        place: &'a dyn Place,
        hint: TypeHint,
        value: Constant<'a>,
    ) -> &'a Expr<'a> {
        let mut expr = Expr::new(ExprKind::Load(place), hint, Span::default());
        expr.value = Some(value);
        self.alloc(expr)
    }

    pub fn invoke(&self, routine: &str, returns: Repr, hint: TypeHint) -> &'a Expr<'a> {
        let routine = self.arena.alloc_str(routine);
        self.alloc(Expr::new(
            ExprKind::Invoke { routine, returns },
            hint,
            Span::default(),
        ))
    }
}
