//! Registry of the runtime operations conversions may call.
//!
//! The catalog is an immutable table injected into the
//! [`Converter`](crate::compiler::Converter) at construction time. It binds
//! each [`Op`] to the concrete runtime member implementing it, together with
//! the member's signature (used for stack accounting and listings).
//!
//! Tests substitute a stub catalog with [`RuntimeCatalog::builder`] or
//! [`RuntimeCatalog::without`].

mod op;
mod standard;

pub use op::Op;

use core::fmt;

use cinder_types::Repr;
use smallvec::SmallVec;

/// How the receiver of a runtime member is passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Receiver {
    /// Static member, arguments only.
    Static,
    /// Instance member of a value type, invoked on its address.
    Address(Repr),
    /// Virtual instance member of a reference type.
    Instance(Repr),
    /// Constructor producing a new instance of the given representation.
    Constructor(Repr),
}

/// A parameter of a runtime member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Param {
    /// A value of the given representation.
    Repr(Repr),
    /// The ambient runtime context.
    Context,
    /// A runtime type handle of the class in scope.
    TypeHandle,
}

/// Binding of an [`Op`] to a runtime member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeMethod {
    pub owner: &'static str,
    pub name: &'static str,
    pub receiver: Receiver,
    pub params: SmallVec<[Param; 2]>,
    pub returns: Repr,
}

impl RuntimeMethod {
    pub fn new(
        owner: &'static str,
        name: &'static str,
        receiver: Receiver,
        params: &[Param],
        returns: Repr,
    ) -> Self {
        Self {
            owner,
            name,
            receiver,
            params: SmallVec::from_slice(params),
            returns,
        }
    }

    /// Number of stack slots consumed by a call, receiver included.
    pub fn pops(&self) -> usize {
        let receiver = match self.receiver {
            Receiver::Address(_) | Receiver::Instance(_) => 1,
            Receiver::Static | Receiver::Constructor(_) => 0,
        };
        receiver + self.params.len()
    }

    /// Number of stack slots produced by a call.
    pub fn pushes(&self) -> usize {
        if self.returns == Repr::Void { 0 } else { 1 }
    }
}

impl fmt::Display for RuntimeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match param {
                Param::Repr(repr) => write!(f, "{}", repr)?,
                Param::Context => write!(f, "ctx")?,
                Param::TypeHandle => write!(f, "type")?,
            }
        }
        write!(f, ") -> {}", self.returns)
    }
}

/// Immutable table of runtime operations.
#[derive(Clone, Debug)]
pub struct RuntimeCatalog {
    methods: hashbrown::HashMap<Op, RuntimeMethod>,
}

impl RuntimeCatalog {
    /// The catalog of the standard runtime, binding every [`Op`].
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for op in Op::ALL {
            builder = builder.register(op, standard::method(op));
        }
        builder.build()
    }

    /// Starts an empty catalog.
    pub fn builder() -> RuntimeCatalogBuilder {
        RuntimeCatalogBuilder {
            methods: hashbrown::HashMap::new(),
        }
    }

    /// A copy of this catalog lacking `op`.
    pub fn without(&self, op: Op) -> Self {
        let mut methods = self.methods.clone();
        methods.remove(&op);
        Self { methods }
    }

    pub fn get(&self, op: Op) -> Option<&RuntimeMethod> {
        self.methods.get(&op)
    }

    pub fn contains(&self, op: Op) -> bool {
        self.methods.contains_key(&op)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

pub struct RuntimeCatalogBuilder {
    methods: hashbrown::HashMap<Op, RuntimeMethod>,
}

impl RuntimeCatalogBuilder {
    /// Binds `op`, replacing a previous binding.
    pub fn register(mut self, op: Op, method: RuntimeMethod) -> Self {
        self.methods.insert(op, method);
        self
    }

    /// Binds `op` the way the standard runtime does.
    pub fn register_standard(self, op: Op) -> Self {
        self.register(op, standard::method(op))
    }

    pub fn build(self) -> RuntimeCatalog {
        RuntimeCatalog {
            methods: self.methods,
        }
    }
}
