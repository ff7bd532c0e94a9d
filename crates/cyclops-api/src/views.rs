//! HTML pages shown in the LMS editor dialog.

use cyclops_core::html::escape;

use crate::paths::RoutePaths;

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 1em; }
button { margin: 0.25em; padding: 0.4em 1em; }
ol.tree { list-style: none; padding-left: 0; }
ol.tree ol { list-style: none; padding-left: 1.2em; }
ol.tree input[type=checkbox] { display: none; }
ol.tree input[type=checkbox] + ol { display: none; }
ol.tree input[type=checkbox]:checked + ol { display: block; }
ol.tree label { cursor: pointer; font-weight: bold; }
ol.tree li.file { cursor: pointer; }
#loading { display: none; }
</style>"#;

const LOADING_SCRIPT: &str = r#"<script type="text/javascript">
function showLoad() {
  document.getElementById('loading').style.display = 'block';
  document.getElementById('content').style.display = 'none';
}
</script>"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>{title}</title>{STYLE}{LOADING_SCRIPT}</head><body>{body}<div id="loading"><p>Recognizing text, please wait...</p></div></body></html>"#,
        title = escape(title),
    )
}

fn hidden_launch_id(launch_id: &str) -> String {
    format!(
        r#"<input type="hidden" name="launch_id" value="{}" />"#,
        escape(launch_id)
    )
}

fn back_form(action: &str, launch_id: &str) -> String {
    format!(
        r#"<form action="{action}" method="POST">{hidden}<button type="submit">Back</button></form>"#,
        action = escape(action),
        hidden = hidden_launch_id(launch_id),
    )
}

/// Start page: choose between the course picker and an upload.
pub fn start_page(paths: &RoutePaths, launch_id: &str) -> String {
    let body = format!(
        r#"<div id="content"><h2>Cyclops: Text Recognition</h2><p>Choose an image to recognize.</p><form action="{select}" method="GET">{hidden}<button type="submit">Select from course files</button></form><form action="{upload}" method="GET">{hidden}<button type="submit">Upload an image</button></form></div>"#,
        select = escape(&paths.select),
        upload = escape(&paths.upload),
        hidden = hidden_launch_id(launch_id),
    );
    page("Cyclops", &body)
}

/// Course file picker around the rendered tree markup.
pub fn picker_page(paths: &RoutePaths, launch_id: &str, course_name: &str, tree: &str) -> String {
    let body = format!(
        r#"<div id="content"><h2>{course}</h2><p>Select an image file.</p>{tree}{back}</div>"#,
        course = escape(course_name),
        back = back_form(&paths.select_back, launch_id),
    );
    page("Select an image", &body)
}

/// Upload form.
pub fn upload_page(paths: &RoutePaths, launch_id: &str) -> String {
    let body = format!(
        r#"<div id="content"><h2>Upload an image</h2><form action="{uploader}" method="POST" enctype="multipart/form-data" onsubmit="showLoad()">{hidden}<input type="file" name="userfile" accept="image/*" /><button type="submit">Recognize</button></form>{back}</div>"#,
        uploader = escape(&paths.uploader),
        hidden = hidden_launch_id(launch_id),
        back = back_form(&paths.upload_back, launch_id),
    );
    page("Upload an image", &body)
}
