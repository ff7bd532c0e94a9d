//! Collapsible checkbox-tree markup for the file picker.

use cyclops_core::html::escape;
use cyclops_entity::lms::{FileRecord, FolderNode};

/// Message shown in place of the children of an empty folder.
pub const EMPTY_FOLDER: &str = "No image files.";

/// Renders a [`FolderNode`] as nested `<ol>` lists.
///
/// Folders expand through a checkbox bound to their label; files link to
/// the load action with the launch ID attached.
#[derive(Debug, Clone)]
pub struct TreeRenderer<'a> {
    load_path: &'a str,
    launch_id: &'a str,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer whose file links target `load_path`.
    pub fn new(load_path: &'a str, launch_id: &'a str) -> Self {
        Self {
            load_path,
            launch_id,
        }
    }

    /// Render the whole tree. The root's checkbox is always checked.
    pub fn render(&self, root: &FolderNode) -> String {
        let mut out = String::from(r#"<ol class="tree">"#);
        out.push_str(&format!(
            r#"<li><label for="folder-{id}">{name}</label><input type="checkbox" checked disabled id="folder-{id}" /><ol>"#,
            id = root.folder.id,
            name = escape(root.name()),
        ));
        self.render_children(root, &mut out);
        out.push_str("</ol></li></ol>");
        out
    }

    fn render_children(&self, node: &FolderNode, out: &mut String) {
        if node.is_empty() {
            out.push_str(&format!("<li>{EMPTY_FOLDER}</li>"));
            return;
        }

        for child in &node.child_folders {
            out.push_str(&format!(
                r#"<li><label for="folder-{id}">{name}</label><input type="checkbox" id="folder-{id}" /><ol>"#,
                id = child.folder.id,
                name = escape(child.name()),
            ));
            self.render_children(child, out);
            out.push_str("</ol></li>");
        }

        for file in &node.child_files {
            out.push_str(&format!(
                r#"<li class="file" onclick=showLoad()><a class="file-link" href="{href}">{name}</a></li>"#,
                href = escape(&self.load_href(file)),
                name = escape(&file.name),
            ));
        }
    }

    fn load_href(&self, file: &FileRecord) -> String {
        format!(
            "{}?filename={}&fileid={}&launch_id={}",
            self.load_path,
            urlencoding::encode(&file.filename),
            file.id,
            urlencoding::encode(self.launch_id),
        )
    }
}
