//! Options controlling the conversion engine.
//!
//! None of them changes the behavior of the emitted code, only its cost.

/// Options of a [`Converter`](crate::compiler::Converter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emit known compile-time values directly in the target representation.
    pub fold_constants: bool,

    /// Use typed operations on the address of numeric and dynamic union
    /// places instead of loading a copy first.
    pub place_fast_paths: bool,

    /// Emit nothing for side-effect free expressions whose value is discarded.
    pub elide_pure_discards: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fold_constants: true,
            place_fast_paths: true,
            elide_pure_discards: true,
        }
    }
}

impl ConvertOptions {
    /// Every optimization disabled; only the general conversion paths are used.
    pub fn unoptimized() -> Self {
        Self {
            fold_constants: false,
            place_fast_paths: false,
            elide_pure_discards: false,
        }
    }

    pub fn override_with(&mut self, overrides: &ConvertOptionsOverride) {
        if let Some(fold_constants) = overrides.fold_constants {
            self.fold_constants = fold_constants;
        }
        if let Some(place_fast_paths) = overrides.place_fast_paths {
            self.place_fast_paths = place_fast_paths;
        }
        if let Some(elide_pure_discards) = overrides.elide_pure_discards {
            self.elide_pure_discards = elide_pure_discards;
        }
    }
}

/// Per-method overrides of [`ConvertOptions`]; `None` keeps the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptionsOverride {
    pub fold_constants: Option<bool>,
    pub place_fast_paths: Option<bool>,
    pub elide_pure_discards: Option<bool>,
}
