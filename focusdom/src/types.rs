/// Main axis for laying out children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Accessibility role exposed by an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Generic,
    Dialog,
    AlertDialog,
    Heading,
    Button,
    Menu,
    MenuItem,
}

impl Role {
    /// Roles that must carry an accessible name.
    pub fn requires_name(&self) -> bool {
        matches!(
            self,
            Role::Dialog | Role::AlertDialog | Role::Button | Role::MenuItem
        )
    }

    pub fn is_dialog(&self) -> bool {
        matches!(self, Role::Dialog | Role::AlertDialog)
    }
}
