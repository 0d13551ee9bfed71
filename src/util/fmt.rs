use std::fmt::{self, Debug, Formatter};

/// Writes the contained text as-is when formatted with [`Debug`], without quotes or escapes.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
