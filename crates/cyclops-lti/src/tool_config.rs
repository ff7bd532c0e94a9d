//! Canvas developer-key configuration document.

use serde_json::{Value, json};

use cyclops_core::config::lti::ToolPresentation;

/// Build the JSON configuration Canvas imports when the tool is installed.
///
/// `base_url` is the absolute URL the tool is mounted at, ending in `/`.
pub fn tool_configuration(tool: &ToolPresentation, base_url: &str, public_jwk: Value) -> Value {
    let base = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    let launch_url = format!("{base}launch/");

    json!({
        "title": tool.title,
        "description": tool.description,
        "scopes": [],
        "extensions": [
            {
                "platform": tool.platform,
                "privacy_level": "public",
                "settings": {
                    "platform": tool.platform,
                    "placements": [
                        {
                            "text": tool.placement_text,
                            "icon_url": format!("{base}icon/"),
                            "placement": "editor_button",
                            "message_type": "LtiDeepLinkingRequest",
                            "target_link_uri": launch_url,
                            "selection_width": tool.selection_width,
                            "selection_height": tool.selection_height,
                        }
                    ]
                }
            }
        ],
        "public_jwk": public_jwk,
        "custom_fields": {
            "canvas_user_id": "$Canvas.user.id",
            "canvas_course_id": "$Canvas.course.id",
        },
        "target_link_uri": launch_url,
        "oidc_initiation_url": format!("{base}login/"),
    })
}
