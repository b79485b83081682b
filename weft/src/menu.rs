//! Context-menu model.
//!
//! A menu is an ordered tree of actionable items, separators, and submenus.
//! Menus are built fresh for every context-menu request from the current
//! selection and are never cached.

use std::fmt;
use std::sync::Arc;

use crate::input::{Key, Modifiers};

/// Visual role of an actionable menu item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuRole {
    /// Ordinary action.
    #[default]
    Standard,
    /// Destructive action (delete, remove).
    Destructive,
    /// Dismisses the menu without effect.
    Cancel,
}

/// Keyboard shortcut decoration on a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuShortcut {
    /// The key equivalent.
    pub key: Key,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl MenuShortcut {
    /// Create a new shortcut.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Handler invoked when an actionable menu item is chosen.
pub type MenuHandler = Arc<dyn Fn() + Send + Sync>;

/// The kind of a menu entry.
#[derive(Clone)]
pub enum MenuItemKind {
    /// An actionable item.
    Action {
        /// Display title.
        title: String,
        /// Optional icon name.
        image: Option<String>,
        /// Visual role.
        role: MenuRole,
        /// Invoked when the item is chosen.
        handler: MenuHandler,
    },
    /// A separator line.
    Separator,
    /// A nested submenu.
    Submenu {
        /// Display title.
        title: String,
        /// Optional icon name.
        image: Option<String>,
        /// Child entries.
        items: Vec<MenuItem>,
    },
}

impl fmt::Debug for MenuItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItemKind::Action { title, image, role, .. } => f
                .debug_struct("Action")
                .field("title", title)
                .field("image", image)
                .field("role", role)
                .finish_non_exhaustive(),
            MenuItemKind::Separator => f.write_str("Separator"),
            MenuItemKind::Submenu { title, image, items } => f
                .debug_struct("Submenu")
                .field("title", title)
                .field("image", image)
                .field("items", items)
                .finish(),
        }
    }
}

/// One entry in a context menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// What kind of entry this is.
    pub kind: MenuItemKind,
    /// Whether the entry is greyed out.
    pub disabled: bool,
    /// Optional keyboard shortcut decoration.
    pub shortcut: Option<MenuShortcut>,
}

impl MenuItem {
    /// Create an actionable item.
    pub fn action(title: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            kind: MenuItemKind::Action {
                title: title.into(),
                image: None,
                role: MenuRole::Standard,
                handler: Arc::new(handler),
            },
            disabled: false,
            shortcut: None,
        }
    }

    /// Create a separator.
    pub fn separator() -> Self {
        Self {
            kind: MenuItemKind::Separator,
            disabled: false,
            shortcut: None,
        }
    }

    /// Create a submenu.
    pub fn submenu(title: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            kind: MenuItemKind::Submenu {
                title: title.into(),
                image: None,
                items,
            },
            disabled: false,
            shortcut: None,
        }
    }

    /// Set the icon name.
    pub fn image(mut self, name: impl Into<String>) -> Self {
        match &mut self.kind {
            MenuItemKind::Action { image, .. } | MenuItemKind::Submenu { image, .. } => {
                *image = Some(name.into());
            }
            MenuItemKind::Separator => {}
        }
        self
    }

    /// Set the visual role.
    pub fn role(mut self, new_role: MenuRole) -> Self {
        if let MenuItemKind::Action { role, .. } = &mut self.kind {
            *role = new_role;
        }
        self
    }

    /// Grey the item out.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Decorate with a keyboard shortcut.
    pub fn shortcut(mut self, key: Key, modifiers: Modifiers) -> Self {
        self.shortcut = Some(MenuShortcut::new(key, modifiers));
        self
    }

    /// The display title, if the entry has one.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            MenuItemKind::Action { title, .. } | MenuItemKind::Submenu { title, .. } => {
                Some(title)
            }
            MenuItemKind::Separator => None,
        }
    }

    /// Invoke the handler if this is an enabled actionable item.
    pub fn activate(&self) {
        if self.disabled {
            return;
        }
        if let MenuItemKind::Action { handler, .. } = &self.kind {
            handler();
        }
    }
}
