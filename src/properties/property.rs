//! Property definition type.

/// Documentation for a CSS property. Values are not validated against it.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Property name (e.g., "margin")
    pub name: &'static str,
    /// Value syntax (e.g., "<length> | auto")
    pub syntax: &'static str,
    pub description: &'static str,
    pub example: Option<&'static str>,
}
