use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::repr::Repr;

/// Index of a class in a [`ClassTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// The root class every class derives from.
    pub const OBJECT: ClassId = ClassId(0);

    pub fn index(self) -> u32 {
        self.0
    }
}

bitflags! {
    /// Capabilities a class declares.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        /// Instances implement the callable contract.
        const CALLABLE = 1;
        /// Instances know how to convert themselves to an array.
        const CONVERTIBLE = 1 << 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub base: Option<ClassId>,
    pub flags: ClassFlags,
}

/// Class hierarchy visible to the code generator.
///
/// Owned by symbol resolution; the conversion engine only queries it.
#[derive(Clone, Debug)]
pub struct ClassTable {
    classes: Vec<ClassInfo>,
    by_name: hashbrown::HashMap<String, ClassId>,
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassTable {
    /// Creates a table holding only the root class `object`.
    pub fn new() -> Self {
        let mut table = ClassTable {
            classes: Vec::new(),
            by_name: hashbrown::HashMap::new(),
        };
        table.push("object", None, ClassFlags::empty());
        table
    }

    /// Declares a class deriving from `base` (the root class if `None`).
    pub fn declare(&mut self, name: &str, base: Option<ClassId>, flags: ClassFlags) -> ClassId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        self.push(name, Some(base.unwrap_or(ClassId::OBJECT)), flags)
    }

    fn push(&mut self, name: &str, base: Option<ClassId>, flags: ClassFlags) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            name: String::from(name),
            base,
            flags,
        });
        self.by_name.insert(String::from(name), id);
        id
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: ClassId) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or("<unknown>")
    }

    /// Whether `class` is `ancestor` or derives from it.
    pub fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|c| c.base);
        }
        false
    }

    /// Whether `class` or one of its ancestors declares `flags`.
    pub fn has_flags(&self, class: ClassId, flags: ClassFlags) -> bool {
        let mut current = Some(class);
        while let Some(id) = current {
            let Some(info) = self.get(id) else {
                return false;
            };
            if info.flags.contains(flags) {
                return true;
            }
            current = info.base;
        }
        false
    }

    /// Reference compatibility: a value of `from` may be used as `to`
    /// without any conversion.
    ///
    /// Only reference representations take part; every one of them is
    /// assignable to the root class.
    pub fn is_assignable(&self, from: Repr, to: Repr) -> bool {
        if from == to {
            return true;
        }
        if !from.is_reference_type() || !to.is_reference_type() {
            return false;
        }
        match (from, to) {
            (_, Repr::Object(ClassId::OBJECT)) => true,
            (Repr::Object(a), Repr::Object(b)) => self.is_subclass_of(a, b),
            (Repr::Object(a), Repr::Callable) => self.has_flags(a, ClassFlags::CALLABLE),
            _ => false,
        }
    }
}
