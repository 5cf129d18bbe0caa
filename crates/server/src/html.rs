//! HTML page rendering for the embed and gallery views.
//!
//! The two pages are small enough that a template engine would be more
//! code than the pages themselves; they are built with `format!` and every
//! user-controlled value goes through [`escape`] first.

use shutter_core::ImageRecord;

/// Escape a string for interpolation into HTML text or attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the single-image embed page with social preview tags.
pub fn embed_page(record: &ImageRecord, image_url: &str) -> String {
    let title = escape(&record.original_name);
    let image_url = escape(image_url);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta property="og:title" content="{title}">
<meta property="og:image" content="{image_url}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:image" content="{image_url}">
<style>
  body {{ margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #111; }}
  img {{ max-width: 100vw; max-height: 100vh; }}
</style>
</head>
<body>
<img src="{image_url}" alt="{title}">
</body>
</html>
"#
    )
}

/// Render the gallery page listing every record.
///
/// `entries` must already be sorted newest-first. Each card carries an open
/// link, an embed link, a copy-link button and a delete button; delete
/// prompts for the shared credentials client-side and calls the delete
/// endpoint with a Basic header.
pub fn gallery_page(entries: &[GalleryEntry]) -> String {
    let mut cards = String::new();
    for entry in entries {
        let id = escape(entry.record.id.as_str());
        let name = escape(&entry.record.original_name);
        let image_url = escape(&entry.image_url);
        let view_url = escape(&entry.view_url);
        let uploaded = escape(&entry.uploaded_at);

        cards.push_str(&format!(
            r#"  <div class="card">
    <a href="{image_url}"><img src="{image_url}" alt="{name}" loading="lazy"></a>
    <div class="meta">
      <span class="name" title="{name}">{name}</span>
      <span class="date">{uploaded}</span>
    </div>
    <div class="actions">
      <a href="{image_url}">open</a>
      <a href="{view_url}">embed</a>
      <button data-url="{image_url}" onclick="copyLink(this)">copy link</button>
      <button data-id="{id}" onclick="deleteImage(this)">delete</button>
    </div>
  </div>
"#
        ));
    }

    let count = entries.len();
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Gallery ({count})</title>
<style>
  body {{ margin: 1rem; background: #111; color: #ddd; font-family: system-ui, sans-serif; }}
  .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }}
  .card {{ background: #1c1c1c; border-radius: 6px; overflow: hidden; }}
  .card img {{ width: 100%; height: 160px; object-fit: cover; display: block; }}
  .meta {{ padding: 0.4rem 0.6rem; display: flex; justify-content: space-between; gap: 0.5rem; font-size: 0.85rem; }}
  .name {{ overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }}
  .date {{ color: #888; flex-shrink: 0; }}
  .actions {{ padding: 0 0.6rem 0.6rem; display: flex; gap: 0.6rem; font-size: 0.85rem; }}
  .actions a {{ color: #7ab8ff; text-decoration: none; }}
  .actions button {{ background: none; border: none; color: #7ab8ff; cursor: pointer; padding: 0; font: inherit; }}
</style>
</head>
<body>
<h1>Gallery ({count})</h1>
<div class="grid">
{cards}</div>
<script>
function copyLink(button) {{
  navigator.clipboard.writeText(button.dataset.url).then(function () {{
    button.textContent = "copied";
    setTimeout(function () {{ button.textContent = "copy link"; }}, 1500);
  }});
}}
function deleteImage(button) {{
  var id = button.dataset.id;
  if (!confirm("Delete " + id + "?")) return;
  var user = prompt("Username");
  if (user === null) return;
  var pass = prompt("Password");
  if (pass === null) return;
  fetch("/delete/" + encodeURIComponent(id), {{
    method: "DELETE",
    headers: {{ "Authorization": "Basic " + btoa(user + ":" + pass) }}
  }}).then(function (resp) {{
    if (resp.ok) {{ location.reload(); }}
    else {{ resp.json().then(function (body) {{ alert("Delete failed: " + body.message); }}); }}
  }});
}}
</script>
</body>
</html>
"#
    )
}

/// One gallery card's worth of data.
pub struct GalleryEntry {
    pub record: ImageRecord,
    pub image_url: String,
    pub view_url: String,
    /// Preformatted upload timestamp for display.
    pub uploaded_at: String,
}
