/// Debug-only structural invariant checks.
pub mod assertions;
