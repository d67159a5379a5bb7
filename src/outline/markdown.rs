use super::node::{BlockKind, HeadingLevel, ListStyle};
use super::{Outline, Slot};

/// Pre-order flatten of the tree into the publish dialect: one fragment per
/// node, joined with a blank line. Depth starts at 0 for root nodes and
/// increments only when descending into a heading's children; it feeds the
/// list-item indent and nothing else.
pub(super) fn render(outline: &Outline) -> String {
    let mut fragments = Vec::new();
    for &id in &outline.roots {
        collect(outline, id, 0, &mut fragments);
    }
    fragments.join("\n\n")
}

fn collect(outline: &Outline, id: super::BlockId, depth: usize, out: &mut Vec<String>) {
    let Some(slot) = outline.arena.get(&id) else {
        return;
    };
    out.push(fragment(slot, depth));
    let child_depth = if slot.kind.is_heading() {
        depth + 1
    } else {
        depth
    };
    for &child in &slot.children {
        collect(outline, child, child_depth, out);
    }
}

fn fragment(slot: &Slot, depth: usize) -> String {
    match &slot.kind {
        BlockKind::Heading { level } => {
            let marks = match level {
                HeadingLevel::One => "#",
                HeadingLevel::Two => "##",
                HeadingLevel::Three => "###",
            };
            format!("{} {}", marks, slot.content)
        }
        BlockKind::Quote => format!("> {}", slot.content),
        BlockKind::Code => format!("```\n{}\n```", slot.content),
        BlockKind::Rule => "---".to_string(),
        BlockKind::Image { src, alt } => format!("![{alt}]({src})"),
        BlockKind::ListItem { style, checked } => {
            // Numbered items always emit a literal "1.": the original never
            // renumbered on publish, and the preview renderer computes its
            // own display numbers. Preserved as-is.
            let marker = match style {
                ListStyle::Numbered => "1.",
                ListStyle::Task => {
                    if *checked {
                        "- [x]"
                    } else {
                        "- [ ]"
                    }
                }
                ListStyle::Bullet => "-",
            };
            format!("{}{} {}", "  ".repeat(depth), marker, slot.content)
        }
        BlockKind::Paragraph | BlockKind::Callout { .. } | BlockKind::EntryRef { .. } => {
            slot.content.clone()
        }
    }
}
