use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a block node. Generated once at creation and never
/// reused; every lookup and mutation in the store keys on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListStyle {
    Bullet,
    Numbered,
    Task,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutVariant {
    Info,
    Warning,
    Danger,
    Success,
}

/// The closed set of block shapes. Variant payloads hold the fields that are
/// only meaningful for that shape, so a heading can never carry a `checked`
/// flag and a rule can never carry an image source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Heading {
        level: HeadingLevel,
    },
    Paragraph,
    Quote,
    Code,
    ListItem {
        style: ListStyle,
        /// Meaningful for `ListStyle::Task` only.
        checked: bool,
    },
    Rule,
    Image {
        src: String,
        alt: String,
    },
    Callout {
        variant: CalloutVariant,
    },
    EntryRef {
        entry: String,
        note: Option<String>,
    },
}

impl BlockKind {
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockKind::ListItem { .. })
    }
}

/// One node of the outline tree. `children` is always present (possibly
/// empty); only headings are expected to acquire children in normal use, but
/// the model does not forbid it elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            content: String::new(),
            collapsed: false,
            children: Vec::new(),
        }
    }

    /// The default node: the one substituted whenever the root sequence
    /// would otherwise become empty.
    pub fn new_heading(level: HeadingLevel) -> Self {
        Self::new(BlockKind::Heading { level })
    }

    pub fn new_paragraph() -> Self {
        Self::new(BlockKind::Paragraph)
    }

    pub fn new_quote() -> Self {
        Self::new(BlockKind::Quote)
    }

    pub fn new_code() -> Self {
        Self::new(BlockKind::Code)
    }

    pub fn new_list_item(style: ListStyle) -> Self {
        Self::new(BlockKind::ListItem {
            style,
            checked: false,
        })
    }

    pub fn new_rule() -> Self {
        Self::new(BlockKind::Rule)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn with_checked(mut self, value: bool) -> Self {
        if let BlockKind::ListItem { checked, .. } = &mut self.kind {
            *checked = value;
        }
        self
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new_heading(HeadingLevel::One)
    }
}

/// Partial update applied by `Outline::update`. `None` fields leave the node
/// untouched, `Some` fields overwrite. `checked` and `list_style` are
/// shortcuts into a list item's payload and are ignored on other kinds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockPatch {
    pub kind: Option<BlockKind>,
    pub content: Option<String>,
    pub collapsed: Option<bool>,
    pub checked: Option<bool>,
    pub list_style: Option<ListStyle>,
}

impl BlockPatch {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn kind(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn checked(value: bool) -> Self {
        Self {
            checked: Some(value),
            ..Self::default()
        }
    }

    pub fn collapsed(value: bool) -> Self {
        Self {
            collapsed: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.content.is_none()
            && self.collapsed.is_none()
            && self.checked.is_none()
            && self.list_style.is_none()
    }
}

/// Render-time display numbers for a sibling list: a 1-based counter over
/// each run of consecutive numbered list items, reset by any other sibling.
/// Never stored on the nodes themselves.
pub fn numbered_ordinals(siblings: &[Block]) -> Vec<Option<u64>> {
    let mut next = 1u64;
    siblings
        .iter()
        .map(|block| {
            if matches!(
                block.kind,
                BlockKind::ListItem {
                    style: ListStyle::Numbered,
                    ..
                }
            ) {
                let ordinal = next;
                next += 1;
                Some(ordinal)
            } else {
                next = 1;
                None
            }
        })
        .collect()
}
