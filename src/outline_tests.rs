use super::*;

fn heading(content: &str) -> Block {
    Block::new_heading(HeadingLevel::One).with_content(content)
}

fn paragraph(content: &str) -> Block {
    Block::new_paragraph().with_content(content)
}

fn bullet(content: &str) -> Block {
    Block::new_list_item(ListStyle::Bullet).with_content(content)
}

fn numbered(content: &str) -> Block {
    Block::new_list_item(ListStyle::Numbered).with_content(content)
}

fn all_ids(blocks: &[Block], out: &mut Vec<BlockId>) {
    for block in blocks {
        out.push(block.id);
        all_ids(&block.children, out);
    }
}

#[test]
fn empty_seed_gets_a_default_heading() {
    let outline = Outline::new();
    let blocks = outline.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].kind,
        BlockKind::Heading {
            level: HeadingLevel::One
        }
    );
    assert_eq!(blocks[0].content, "");
    assert!(blocks[0].children.is_empty());
}

#[test]
fn insert_child_appends_under_the_parent() {
    let root = heading("Factions");
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);

    let first = outline.insert_child(root_id, BlockKind::Paragraph).unwrap();
    let second = outline.insert_child(root_id, BlockKind::Quote).unwrap();

    let blocks = outline.blocks();
    assert_eq!(blocks[0].children.len(), 2);
    assert_eq!(blocks[0].children[0].id, first);
    assert_eq!(blocks[0].children[1].id, second);
    assert_eq!(blocks[0].children[0].content, "");
    assert_eq!(outline.parent_of(first), Some(root_id));
}

#[test]
fn insert_child_unfolds_a_collapsed_parent() {
    let root = heading("Bestiary");
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);
    assert!(outline.update(root_id, BlockPatch::collapsed(true)));

    outline.insert_child(root_id, BlockKind::Paragraph).unwrap();

    assert!(!outline.blocks()[0].collapsed);
}

#[test]
fn ids_stay_unique_across_insert_sequences() {
    let root = heading("Chronicle");
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);

    let mut target = root_id;
    for _ in 0..16 {
        let child = outline.insert_child(target, BlockKind::Paragraph).unwrap();
        assert!(outline.insert_sibling(child, bullet("entry"), Placement::After));
        target = child;
    }

    let mut ids = Vec::new();
    all_ids(&outline.blocks(), &mut ids);
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(total, outline.len());
}

#[test]
fn insert_sibling_respects_placement() {
    let first = paragraph("middle");
    let first_id = first.id;
    let mut outline = Outline::seed(vec![first]);

    let before = paragraph("start");
    let before_id = before.id;
    let after = paragraph("end");
    let after_id = after.id;
    assert!(outline.insert_sibling(first_id, before, Placement::Before));
    assert!(outline.insert_sibling(first_id, after, Placement::After));

    let order: Vec<BlockId> = outline.blocks().iter().map(|block| block.id).collect();
    assert_eq!(order, vec![before_id, first_id, after_id]);
}

#[test]
fn insert_sibling_works_inside_a_child_list() {
    let child = paragraph("first");
    let child_id = child.id;
    let root = heading("Relics").with_children(vec![child]);
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);

    let sibling = bullet("second");
    let sibling_id = sibling.id;
    assert!(outline.insert_sibling(child_id, sibling, Placement::After));

    let blocks = outline.blocks();
    assert_eq!(blocks[0].children.len(), 2);
    assert_eq!(blocks[0].children[1].id, sibling_id);
    assert_eq!(outline.parent_of(sibling_id), Some(root_id));
}

#[test]
fn insert_sibling_refuses_a_duplicate_id() {
    let root = heading("Maps");
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);
    let before = outline.blocks();

    let mut duplicate = paragraph("impostor");
    duplicate.id = root_id;
    assert!(!outline.insert_sibling(root_id, duplicate, Placement::After));
    assert_eq!(outline.blocks(), before);
}

#[test]
fn remove_cascades_through_the_subtree() {
    let grandchild = bullet("deep");
    let grandchild_id = grandchild.id;
    let child = paragraph("mid").with_children(vec![grandchild]);
    let child_id = child.id;
    let root = heading("Ruins").with_children(vec![child]);
    let root_id = root.id;
    let keeper = paragraph("survives");
    let keeper_id = keeper.id;
    let mut outline = Outline::seed(vec![root, keeper]);

    assert!(outline.remove(root_id));

    assert!(!outline.contains(root_id));
    assert!(!outline.contains(child_id));
    assert!(!outline.contains(grandchild_id));
    assert!(outline.contains(keeper_id));
    assert_eq!(outline.blocks().len(), 1);
}

#[test]
fn removing_every_node_leaves_a_default_heading() {
    let first = heading("One");
    let first_id = first.id;
    let second = paragraph("Two");
    let second_id = second.id;
    let mut outline = Outline::seed(vec![first, second]);

    assert!(outline.remove(first_id));
    assert!(outline.remove(second_id));

    let blocks = outline.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].kind,
        BlockKind::Heading {
            level: HeadingLevel::One
        }
    );
    assert_eq!(blocks[0].content, "");
    assert_ne!(blocks[0].id, first_id);
    assert_ne!(blocks[0].id, second_id);
}

#[test]
fn update_changes_only_the_targeted_node() {
    let left_child = paragraph("left text");
    let left = heading("Left").with_children(vec![left_child]);
    let target = paragraph("old");
    let target_id = target.id;
    let right = heading("Right").with_children(vec![target]);
    let mut outline = Outline::seed(vec![left, right]);
    let before = outline.blocks();

    assert!(outline.update(target_id, BlockPatch::content("new")));

    let after = outline.blocks();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1].id, before[1].id);
    assert_eq!(after[1].content, before[1].content);
    assert_eq!(after[1].children[0].content, "new");
    assert_eq!(after[1].children[0].id, target_id);
    assert_eq!(after[1].children[0].kind, before[1].children[0].kind);
}

#[test]
fn update_preserves_fields_the_patch_omits() {
    let item = numbered("step one");
    let item_id = item.id;
    let mut outline = Outline::seed(vec![item]);

    assert!(outline.update(item_id, BlockPatch::content("step 1")));

    let block = outline.block(item_id).unwrap();
    assert_eq!(block.content, "step 1");
    assert_eq!(
        block.kind,
        BlockKind::ListItem {
            style: ListStyle::Numbered,
            checked: false
        }
    );
}

#[test]
fn checked_and_list_style_patches_only_touch_list_items() {
    let item = Block::new_list_item(ListStyle::Task).with_content("todo");
    let item_id = item.id;
    let title = heading("Title");
    let title_id = title.id;
    let mut outline = Outline::seed(vec![title, item]);

    assert!(outline.update(item_id, BlockPatch::checked(true)));
    assert!(outline.update(
        title_id,
        BlockPatch {
            checked: Some(true),
            list_style: Some(ListStyle::Bullet),
            ..BlockPatch::default()
        }
    ));

    assert_eq!(
        outline.block(item_id).unwrap().kind,
        BlockKind::ListItem {
            style: ListStyle::Task,
            checked: true
        }
    );
    assert_eq!(
        outline.block(title_id).unwrap().kind,
        BlockKind::Heading {
            level: HeadingLevel::One
        }
    );
}

#[test]
fn operations_on_a_missing_id_leave_the_tree_untouched() {
    let root = heading("Atlas").with_children(vec![paragraph("body")]);
    let mut outline = Outline::seed(vec![root]);
    let before = outline.blocks();
    let stale = BlockId::new();

    assert!(!outline.update(stale, BlockPatch::content("ghost")));
    assert!(!outline.insert_sibling(stale, paragraph("ghost"), Placement::After));
    assert!(outline.insert_child(stale, BlockKind::Paragraph).is_none());
    assert!(!outline.remove(stale));

    assert_eq!(outline.blocks(), before);
}

#[test]
fn seeding_a_duplicate_id_keeps_the_first_occurrence() {
    let first = paragraph("kept");
    let mut second = paragraph("dropped");
    second.id = first.id;
    let outline = Outline::seed(vec![first, second]);

    let blocks = outline.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content, "kept");
}

#[test]
fn seeds_from_application_json() {
    let raw = r#"[
        {
            "id": "4f9c6e1a-0b0e-4a63-9a2e-4d2d3e6f7a81",
            "kind": { "Heading": { "level": "One" } },
            "content": "Gods of the Deep",
            "children": [
                { "id": "7b1f2c3d-4e5f-4a6b-8c9d-0e1f2a3b4c5d", "kind": "Paragraph", "content": "First age." },
                {
                    "id": "9d8c7b6a-5f4e-4d3c-8b2a-190807060504",
                    "kind": { "ListItem": { "style": "Task", "checked": true } },
                    "content": "Name the leviathan"
                }
            ]
        }
    ]"#;
    let seed: Vec<Block> = serde_json::from_str(raw).unwrap();
    let outline = Outline::seed(seed);

    let blocks = outline.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content, "Gods of the Deep");
    assert_eq!(blocks[0].children.len(), 2);
    assert_eq!(
        outline.to_markdown(),
        "# Gods of the Deep\n\nFirst age.\n\n  - [x] Name the leviathan"
    );
}

#[test]
fn cloned_outlines_are_independent_snapshots() {
    let root = heading("Era");
    let root_id = root.id;
    let mut outline = Outline::seed(vec![root]);
    let snapshot = outline.clone();

    assert!(outline.update(root_id, BlockPatch::content("Second Era")));

    assert_eq!(snapshot.block(root_id).unwrap().content, "Era");
    assert_eq!(outline.block(root_id).unwrap().content, "Second Era");
}

#[test]
fn numbered_ordinals_reset_on_foreign_siblings() {
    let siblings = vec![
        numbered("a"),
        numbered("b"),
        paragraph("break"),
        numbered("c"),
        bullet("dash"),
        numbered("d"),
        numbered("e"),
    ];

    let ordinals = numbered_ordinals(&siblings);

    assert_eq!(
        ordinals,
        vec![
            Some(1),
            Some(2),
            None,
            Some(1),
            None,
            Some(1),
            Some(2),
        ]
    );
}
