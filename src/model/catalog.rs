use serde::{Deserialize, Serialize};

/// One row of an option lookup table, as exposed to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub name: String,
}

/// The four option categories a product is configured from.
///
/// The enum order is the fixed order in which option ids are concatenated
/// into a composite product key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Aluminum,
    Handle,
    Glass,
    Part,
}

impl OptionKind {
    pub const ALL: [OptionKind; 4] = [
        OptionKind::Aluminum,
        OptionKind::Handle,
        OptionKind::Glass,
        OptionKind::Part,
    ];

    /// Backing collection for this option category.
    pub fn collection(&self) -> &'static str {
        match self {
            OptionKind::Aluminum => "aluminum_types",
            OptionKind::Handle => "handle_types",
            OptionKind::Glass => "glass_types",
            OptionKind::Part => "part_types",
        }
    }

    /// Human-readable label used in notification emails.
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Aluminum => "Aluminum type",
            OptionKind::Handle => "Handle type",
            OptionKind::Glass => "Glass type",
            OptionKind::Part => "Part type",
        }
    }
}
