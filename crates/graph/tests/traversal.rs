use ftags_graph::{
    classify_icon, expand_ancestors, list_children, TagOracle, VaultFile, VaultGraph,
};
use ftags_protocol::{IgnoreRules, ItemIcon};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn graph_with(files: &[&str], tags: &[(&str, &str)]) -> VaultGraph {
    let mut graph = VaultGraph::new();
    for path in files {
        graph.add_file(VaultFile::new(*path));
    }
    for (file, tag) in tags {
        graph.add_tag(file, tag).expect("tag endpoints exist");
    }
    graph
}

fn paths(files: &[VaultFile]) -> Vec<&str> {
    files.iter().map(|f| f.path.as_str()).collect()
}

#[test]
fn diamond_ancestor_appears_once() {
    let graph = graph_with(
        &["a.md", "b.md", "c.md", "d.md"],
        &[("a.md", "b.md"), ("a.md", "c.md"), ("b.md", "d.md"), ("c.md", "d.md")],
    );
    let layers = expand_ancestors(&graph, &VaultFile::new("a.md"), "inbox");

    assert_eq!(paths(&layers.first), vec!["b.md", "c.md"]);
    assert_eq!(paths(&layers.second), vec!["d.md"]);
    assert!(layers.third.is_empty());
    assert!(layers.fourth.is_empty());
}

#[test]
fn cycle_terminates_without_duplicates() {
    let graph = graph_with(
        &["a.md", "b.md", "c.md"],
        &[("a.md", "b.md"), ("b.md", "c.md"), ("c.md", "a.md"), ("c.md", "b.md")],
    );
    let layers = expand_ancestors(&graph, &VaultFile::new("a.md"), "inbox");

    let all: Vec<&str> = layers.iter().map(|(_, f)| f.path.as_str()).collect();
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len(), "duplicates in {all:?}");
    assert_eq!(paths(&layers.first), vec!["b.md"]);
    assert_eq!(paths(&layers.second), vec!["c.md"]);
    // the origin sits on the cycle and shows up as its own ancestor
    assert_eq!(paths(&layers.third), vec!["a.md"]);
    assert!(layers.fourth.is_empty());
}

#[test]
fn expansion_stops_after_four_layers() {
    let chain: Vec<String> = (0..10).map(|i| format!("n{i}.md")).collect();
    let files: Vec<&str> = chain.iter().map(String::as_str).collect();
    let tags: Vec<(&str, &str)> = files.windows(2).map(|w| (w[0], w[1])).collect();
    let graph = graph_with(&files, &tags);

    let layers = expand_ancestors(&graph, &VaultFile::new("n0.md"), "inbox");
    assert_eq!(layers.len(), 4);
    assert_eq!(paths(&layers.fourth), vec!["n4.md"]);
    assert!(layers.iter().all(|(_, f)| f.path != "n5.md"));
}

#[test]
fn inbox_tag_is_a_leaf() {
    let graph = graph_with(
        &["note.md", "inbox/inbox.md", "meta.md", "topic.md", "area.md"],
        &[
            ("note.md", "inbox/inbox.md"),
            ("note.md", "topic.md"),
            ("inbox/inbox.md", "meta.md"),
            ("topic.md", "area.md"),
        ],
    );
    let layers = expand_ancestors(&graph, &VaultFile::new("note.md"), "inbox");

    assert_eq!(paths(&layers.first), vec!["inbox/inbox.md", "topic.md"]);
    assert_eq!(paths(&layers.second), vec!["area.md"]);
}

#[test]
fn folder_hierarchy_expands_through_index_files() {
    let graph = graph_with(
        &[
            "areas/areas.md",
            "areas/code/code.md",
            "areas/code/rust/rust.md",
            "areas/code/rust/lifetimes.md",
        ],
        &[],
    );
    let layers = expand_ancestors(&graph, &VaultFile::new("areas/code/rust/lifetimes.md"), "inbox");

    assert_eq!(paths(&layers.first), vec!["areas/code/rust/rust.md"]);
    assert_eq!(paths(&layers.second), vec!["areas/code/code.md"]);
    assert_eq!(paths(&layers.third), vec!["areas/areas.md"]);
}

#[test]
fn orphan_has_no_layers() {
    let graph = graph_with(&["lonely.md"], &[]);
    let layers = expand_ancestors(&graph, &VaultFile::new("lonely.md"), "inbox");
    assert!(layers.is_empty());
    assert_eq!(layers.len(), 0);
}

#[test]
fn seven_children_show_five_and_overflow() {
    let children: Vec<String> = (1..=7).map(|i| format!("child{i}.md")).collect();
    let mut files: Vec<&str> = vec!["tag.md"];
    files.extend(children.iter().map(String::as_str));
    let tags: Vec<(&str, &str)> = children.iter().map(|c| (c.as_str(), "tag.md")).collect();
    let graph = graph_with(&files, &tags);

    let listing = list_children(&graph, &VaultFile::new("tag.md"), &IgnoreRules::default());
    assert_eq!(
        paths(&listing.shown),
        vec!["child1.md", "child2.md", "child3.md", "child4.md", "child5.md"]
    );
    assert!(listing.overflowed);
}

#[test]
fn truncation_matches_child_count() {
    for count in 0..=7usize {
        let children: Vec<String> = (0..count).map(|i| format!("c{i}.md")).collect();
        let mut files: Vec<&str> = vec!["tag.md"];
        files.extend(children.iter().map(String::as_str));
        let tags: Vec<(&str, &str)> = children.iter().map(|c| (c.as_str(), "tag.md")).collect();
        let graph = graph_with(&files, &tags);

        let rules = IgnoreRules::parse(&["unrelated/"]);
        let listing = list_children(&graph, &VaultFile::new("tag.md"), &rules);
        assert_eq!(listing.shown.len(), count.min(5), "count={count}");
        assert_eq!(listing.overflowed, count > 5, "count={count}");
    }
}

#[test]
fn ignored_children_neither_show_nor_overflow() {
    let graph = graph_with(
        &[
            "tag.md",
            "archive/x.md",
            "notes/x.md",
            "templates/t.md",
            "n1.md",
            "n2.md",
            "n3.md",
            "n4.md",
        ],
        &[
            ("archive/x.md", "tag.md"),
            ("notes/x.md", "tag.md"),
            ("templates/t.md", "tag.md"),
            ("n1.md", "tag.md"),
            ("n2.md", "tag.md"),
            ("n3.md", "tag.md"),
            ("n4.md", "tag.md"),
        ],
    );
    let rules = IgnoreRules::parse(&["/^archive\\//", "templates"]);
    let listing = list_children(&graph, &VaultFile::new("tag.md"), &rules);

    assert_eq!(
        paths(&listing.shown),
        vec!["notes/x.md", "n1.md", "n2.md", "n3.md", "n4.md"]
    );
    assert!(!listing.overflowed);
}

#[test]
fn index_children_are_folders() {
    let graph = graph_with(&["media/media.md", "media/gallery/gallery.jpg", "media/cover.png"], &[]);
    let media = VaultFile::new("media/media.md");
    let icons: Vec<(String, ItemIcon)> = graph
        .direct_children(&media)
        .iter()
        .map(|c| (c.path.clone(), classify_icon(c)))
        .collect();

    assert_eq!(
        icons,
        vec![
            ("media/gallery/gallery.jpg".to_string(), ItemIcon::Folder),
            ("media/cover.png".to_string(), ItemIcon::Image),
        ]
    );
}
